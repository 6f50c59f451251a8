//! Structural operations
//!
//! Each operation derives a new [`SceneTree`] and leaves the receiver
//! untouched. Derived trees start with a fresh animation clock and inherit
//! the receiver's settings.

use glam::Mat4;

use crate::errors::{Result, SceneTreeError};
use crate::scene::node::JointNode;
use crate::scene::tree::SceneTree;

impl SceneTree {
    /// Builds a smaller tree containing only `names`, in that order.
    ///
    /// Each kept joint is re-parented to its nearest kept ancestor. The local
    /// matrices of skipped ancestors are folded into the kept joint's local
    /// matrix, closest ancestor first, so its global pose is unchanged.
    /// Inverse-bind matrices are carried over.
    pub fn split<S: AsRef<str>>(&self, names: &[S]) -> Result<SceneTree> {
        let mut old_to_new: Vec<Option<usize>> = vec![None; self.joints.len()];
        for (new_idx, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let old_idx = self.require_index(name)?;
            if old_to_new[old_idx].replace(new_idx).is_some() {
                return Err(SceneTreeError::DuplicateJoint(name.to_string()));
            }
        }

        let mut slots: Vec<Option<JointNode>> = vec![None; names.len()];
        for (old_idx, joint) in self.joints.iter().enumerate() {
            let Some(new_idx) = old_to_new[old_idx] else {
                continue;
            };

            let mut local = joint.local_matrix;
            let mut new_parent = None;
            let mut ancestor = joint.parent;
            while let Some(anc_idx) = ancestor {
                if let Some(mapped) = old_to_new[anc_idx] {
                    new_parent = Some(mapped);
                    break;
                }
                let skipped = &self.joints[anc_idx];
                local = skipped.local_matrix * local;
                ancestor = skipped.parent;
            }

            let mut kept = JointNode::new(new_idx, new_parent, joint.name.clone(), local);
            kept.global_matrix = joint.global_matrix;
            kept.inverse_bind_matrix = joint.inverse_bind_matrix;
            slots[new_idx] = Some(kept);
        }

        // Every slot is filled: names map one-to-one onto existing joints.
        let joints = slots.into_iter().flatten().collect();
        Ok(SceneTree::assemble(joints, self.settings))
    }

    /// Returns a tree where each named joint's local matrix is
    /// right-multiplied by its delta: `local' = local · delta`.
    pub fn update_transform<S: AsRef<str>>(&self, names: &[S], deltas: &[Mat4]) -> Result<SceneTree> {
        if names.len() != deltas.len() {
            return Err(SceneTreeError::LengthMismatch {
                context: "joint names vs transforms",
                left: names.len(),
                right: deltas.len(),
            });
        }

        let mut joints = self.joints.clone();
        for (name, delta) in names.iter().zip(deltas) {
            let idx = self.require_index(name.as_ref())?;
            joints[idx].local_matrix = joints[idx].local_matrix * *delta;
        }
        Ok(SceneTree::assemble(joints, self.settings))
    }

    /// Returns a tree with synthetic joints grafted under existing ones.
    ///
    /// Joint `i` is named `names[i]`, hangs under `parents[i]` with local
    /// matrix `rest_locals[i]`, and becomes the first child of that parent.
    /// Its global is `parent.global · rest_local` using the parent's cached
    /// global, and its inverse-bind is the inverse of that. A parent may be a
    /// joint grafted earlier in the same call.
    pub fn with_faked_joints<S: AsRef<str>, P: AsRef<str>>(
        &self,
        names: &[S],
        parents: &[P],
        rest_locals: &[Mat4],
    ) -> Result<SceneTree> {
        if names.len() != parents.len() {
            return Err(SceneTreeError::LengthMismatch {
                context: "faked joint names vs parent names",
                left: names.len(),
                right: parents.len(),
            });
        }
        if names.len() != rest_locals.len() {
            return Err(SceneTreeError::LengthMismatch {
                context: "faked joint names vs rest matrices",
                left: names.len(),
                right: rest_locals.len(),
            });
        }

        let mut tree = self.duplicate();
        for ((name, parent), rest) in names.iter().zip(parents).zip(rest_locals) {
            let name = name.as_ref();
            if tree.index_of(name).is_some() {
                return Err(SceneTreeError::DuplicateJoint(name.to_string()));
            }
            let parent_idx = tree.require_index(parent.as_ref())?;

            let idx = tree.joints.len();
            let global = tree.joints[parent_idx].global_matrix * *rest;
            let mut joint = JointNode::new(idx, Some(parent_idx), name, *rest);
            joint.global_matrix = global;
            joint.inverse_bind_matrix = global.inverse();

            tree.joints.push(joint);
            tree.name_to_index.insert(name.to_string(), idx);
            tree.attach(idx);
            log::debug!("Grafted joint '{name}' ({idx}) under '{}'", parent.as_ref());
        }
        Ok(tree)
    }

    /// Verbatim duplicate: links and cached matrices copied as they are.
    fn duplicate(&self) -> SceneTree {
        SceneTree {
            joints: self.joints.clone(),
            name_to_index: self.name_to_index.clone(),
            root_first_child: self.root_first_child,
            built: self.built,
            clock: Default::default(),
            settings: self.settings,
        }
    }
}
