//! Global pose propagation
//!
//! Recomputes every joint's global matrix from the local matrices, top-down.
//! Kept as a free function over the joint slice so it only borrows the data
//! it touches; [`SceneTree::update_global_pose`] is the usual entry point.
//!
//! # Traversal
//!
//! One explicit-stack depth-first walk starting at the head of the top-level
//! list with the identity as the incoming parent transform. For each popped
//! joint:
//! 1. its next sibling is pushed with the *same* parent transform, so it runs
//!    after the current subtree
//! 2. `global = parent * local`
//! 3. optionally `inverse_bind = global⁻¹`
//! 4. its first child is pushed with the new global
//!
//! Exactly one matrix product per joint.

use glam::Mat4;
use smallvec::SmallVec;

use crate::scene::node::JointNode;
use crate::scene::tree::SceneTree;

/// Inline capacity of the traversal stack; deeper or wider rigs spill to the
/// heap.
const STACK_INLINE: usize = 32;

/// Propagates global matrices through `joints` starting at `head`.
///
/// # Arguments
/// * `joints` - Joint arena, linked through `first_child` / `next_sibling`
/// * `head` - First top-level joint (the synthetic root's first child)
/// * `with_inverse` - Also overwrite each inverse-bind matrix with the inverse
///   of the freshly computed global
pub fn propagate_global_pose(joints: &mut [JointNode], head: Option<usize>, with_inverse: bool) {
    let mut stack: SmallVec<[(usize, Mat4); STACK_INLINE]> = SmallVec::new();
    if let Some(head) = head {
        stack.push((head, Mat4::IDENTITY));
    }

    while let Some((idx, parent_global)) = stack.pop() {
        let joint = &mut joints[idx];

        if let Some(sibling) = joint.next_sibling {
            stack.push((sibling, parent_global));
        }

        let global = parent_global * joint.local_matrix;
        joint.global_matrix = global;
        if with_inverse {
            joint.inverse_bind_matrix = global.inverse();
        }

        if let Some(child) = joint.first_child {
            stack.push((child, global));
        }
    }
}

impl SceneTree {
    /// Recomputes global matrices from the current local matrices.
    ///
    /// Must run after any batch of local edits (pose writes, animation
    /// sampling) and before reading globals or extracting skinning data.
    pub fn update_global_pose(&mut self) {
        propagate_global_pose(&mut self.joints, self.root_first_child, false);
    }

    /// Like [`update_global_pose`](Self::update_global_pose), and also
    /// re-captures every inverse-bind matrix so the current pose becomes the
    /// new bind pose.
    pub fn update_global_pose_with_inverse(&mut self) {
        propagate_global_pose(&mut self.joints, self.root_first_child, true);
    }
}
