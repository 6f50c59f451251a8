//! Pose recovery for solvers
//!
//! Evaluates world-space joint positions for a candidate pose without
//! touching the tree: the rest local matrices are optionally re-translated
//! from per-joint offsets and post-multiplied by per-joint Euler rotations.
//! Optimizers call this in a tight loop, sometimes in double precision, so
//! the same traversal is generated for `f32` ([`SceneTree::recover_pose`])
//! and `f64` ([`SceneTree::recover_pose_f64`]).
//!
//! The walk order is identical to the global pose pass.

use glam::{DMat3, DMat4, DVec3, Mat3, Mat4, Vec3};
use smallvec::SmallVec;

use crate::errors::{Result, SceneTreeError};
use crate::scene::tree::SceneTree;

/// Composition order of the three Euler parameters `(p0, p1, p2)` of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EulerOrder {
    /// `Rz(p2) · Ry(p1) · Rx(p0)`
    #[default]
    Zyx,
    /// `Rx(p0) · Ry(p1) · Rz(p2)`
    Xyz,
}

/// Inputs of a pose recovery pass.
///
/// Empty slices disable the corresponding step.
#[derive(Debug, Clone, Copy)]
pub struct PoseRecovery<'a, T> {
    /// Three Euler angles per joint, indexed `3 * joint + axis`. Applied only
    /// to joints that have children, since a leaf's rotation does not move
    /// any position.
    pub euler_params: &'a [T],
    /// Replacement local translation per joint.
    pub joint_offsets: &'a [DVec3],
    /// Joint that keeps its rest translation even when offsets are given.
    pub pinned_joint: Option<&'a str>,
    pub order: EulerOrder,
}

impl<T> Default for PoseRecovery<'_, T> {
    fn default() -> Self {
        Self {
            euler_params: &[],
            joint_offsets: &[],
            pinned_joint: None,
            order: EulerOrder::Zyx,
        }
    }
}

impl<T> PoseRecovery<'_, T> {
    fn check(&self, joint_count: usize) -> Result<()> {
        if !self.euler_params.is_empty() && self.euler_params.len() < 3 * joint_count {
            return Err(SceneTreeError::LengthMismatch {
                context: "pose recovery euler parameters",
                left: self.euler_params.len(),
                right: 3 * joint_count,
            });
        }
        if !self.joint_offsets.is_empty() && self.joint_offsets.len() < joint_count {
            return Err(SceneTreeError::LengthMismatch {
                context: "pose recovery joint offsets",
                left: self.joint_offsets.len(),
                right: joint_count,
            });
        }
        Ok(())
    }
}

macro_rules! impl_recover_pose {
    (
        $(#[$meta:meta])*
        $fn_name:ident, $scalar:ty, $mat4:ty, $mat3:ty, $vec3:ty,
        cast_mat: $cast_mat:expr,
        cast_vec: $cast_vec:expr
    ) => {
        impl SceneTree {
            $(#[$meta])*
            pub fn $fn_name(&self, recovery: &PoseRecovery<'_, $scalar>) -> Result<Vec<$vec3>> {
                recovery.check(self.joints.len())?;

                let params = recovery.euler_params;
                let offsets = recovery.joint_offsets;
                let mut positions = vec![<$vec3>::ZERO; self.joints.len()];

                let mut stack: SmallVec<[(usize, $mat4); 32]> = SmallVec::new();
                if let Some(head) = self.root_first_child {
                    stack.push((head, <$mat4>::IDENTITY));
                }

                while let Some((idx, parent_global)) = stack.pop() {
                    let joint = &self.joints[idx];

                    if let Some(sibling) = joint.next_sibling {
                        stack.push((sibling, parent_global));
                    }

                    let mut rest: $mat4 = $cast_mat(&joint.local_matrix);
                    if !offsets.is_empty() && recovery.pinned_joint != Some(joint.name.as_str()) {
                        let offset: $vec3 = $cast_vec(offsets[idx]);
                        rest.w_axis = offset.extend(rest.w_axis.w);
                    }
                    let mut global = parent_global * rest;

                    if joint.first_child.is_some() && !params.is_empty() {
                        let (p0, p1, p2) = (params[3 * idx], params[3 * idx + 1], params[3 * idx + 2]);
                        let rotation = match recovery.order {
                            EulerOrder::Zyx => {
                                <$mat3>::from_rotation_z(p2)
                                    * <$mat3>::from_rotation_y(p1)
                                    * <$mat3>::from_rotation_x(p0)
                            }
                            EulerOrder::Xyz => {
                                <$mat3>::from_rotation_x(p0)
                                    * <$mat3>::from_rotation_y(p1)
                                    * <$mat3>::from_rotation_z(p2)
                            }
                        };
                        global = global * <$mat4>::from_mat3(rotation);
                    }

                    positions[idx] = global.w_axis.truncate();

                    if let Some(child) = joint.first_child {
                        stack.push((child, global));
                    }
                }

                Ok(positions)
            }
        }
    };
}

impl_recover_pose! {
    /// Recovers world-space joint positions in single precision.
    ///
    /// Returns one position per joint, indexed by joint index.
    recover_pose, f32, Mat4, Mat3, Vec3,
    cast_mat: |m: &Mat4| *m,
    cast_vec: |v: DVec3| v.as_vec3()
}

impl_recover_pose! {
    /// Recovers world-space joint positions in double precision.
    ///
    /// Local matrices are widened from `f32` before composition.
    recover_pose_f64, f64, DMat4, DMat3, DVec3,
    cast_mat: |m: &Mat4| m.as_dmat4(),
    cast_vec: |v: DVec3| v
}
