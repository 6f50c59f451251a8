//! Direct pose manipulation
//!
//! Local matrix edits driven by the host (UI gizmos, solvers, snapshots).
//! None of these run a global pose pass on their own; call
//! [`SceneTree::update_global_pose`] before reading globals again.

use glam::{Mat4, Vec3};

use crate::errors::{Result, SceneTreeError};
use crate::scene::transform::{rotation_block, set_translation};
use crate::scene::tree::SceneTree;
use crate::settings::MATRIX_FLOATS;

impl SceneTree {
    /// Replaces every joint's local matrix from a flat buffer of exactly
    /// `16 * joint_count` floats, in joint index order.
    pub fn set_local_pose(&mut self, transforms: &[f32]) -> Result<()> {
        if self.joints.is_empty() {
            return Err(SceneTreeError::EmptyTree);
        }
        let expected = self.joints.len() * MATRIX_FLOATS;
        if transforms.len() != expected {
            return Err(SceneTreeError::BufferSizeMismatch {
                expected,
                actual: transforms.len(),
            });
        }

        let layout = self.settings.matrix_layout;
        for (joint, chunk) in self.joints.iter_mut().zip(transforms.chunks_exact(MATRIX_FLOATS)) {
            joint.local_matrix = layout.read(chunk);
        }
        Ok(())
    }

    /// Snapshot of every local matrix as `16 * joint_count` floats, in joint
    /// index order. Feeding it back to [`set_local_pose`](Self::set_local_pose)
    /// restores the pose.
    pub fn local_pose(&self) -> Result<Vec<f32>> {
        if self.joints.is_empty() {
            return Err(SceneTreeError::EmptyTree);
        }

        let layout = self.settings.matrix_layout;
        let mut out = vec![0.0; self.joints.len() * MATRIX_FLOATS];
        for (joint, chunk) in self.joints.iter().zip(out.chunks_exact_mut(MATRIX_FLOATS)) {
            layout.write(&joint.local_matrix, chunk);
        }
        Ok(out)
    }

    /// Overwrites the translation column of one joint's local matrix.
    pub fn set_joint_translation(&mut self, name: &str, translation: Vec3) -> Result<()> {
        let idx = self.require_index(name)?;
        set_translation(&mut self.joints[idx].local_matrix, translation);
        Ok(())
    }

    /// Overwrites the translation of joint `name` inside a caller-owned flat
    /// pose buffer laid out like [`local_pose`](Self::local_pose).
    ///
    /// The tree itself is not modified.
    pub fn write_joint_translation(
        &self,
        name: &str,
        translation: Vec3,
        transforms: &mut [f32],
    ) -> Result<()> {
        let idx = self.require_index(name)?;
        let offset = idx * MATRIX_FLOATS;
        let Some(chunk) = transforms.get_mut(offset..offset + MATRIX_FLOATS) else {
            return Err(SceneTreeError::BufferSizeMismatch {
                expected: offset + MATRIX_FLOATS,
                actual: transforms.len(),
            });
        };
        self.settings.matrix_layout.write_translation(translation, chunk);
        Ok(())
    }

    /// Converts per-joint rotations expressed in each joint's frame into the
    /// equivalent rotations in the global frame.
    ///
    /// For joint `i` with cached global rotation block `G`:
    /// `global_rot[i] = G · local_rot[i] · G⁻¹`. Translation of the global
    /// matrix is ignored.
    pub fn local_to_global_rotations(&self, local_rotations: &[Mat4]) -> Result<Vec<Mat4>> {
        if local_rotations.len() != self.joints.len() {
            return Err(SceneTreeError::LengthMismatch {
                context: "local rotations vs joints",
                left: local_rotations.len(),
                right: self.joints.len(),
            });
        }

        Ok(self
            .joints
            .iter()
            .zip(local_rotations)
            .map(|(joint, local_rot)| {
                let frame = rotation_block(&joint.global_matrix);
                frame * *local_rot * frame.inverse()
            })
            .collect())
    }
}
