use glam::Vec3;

use crate::assets::SkinDescription;
use crate::errors::Result;
use crate::scene::tree::SceneTree;
use crate::settings::MATRIX_FLOATS;

impl SceneTree {
    /// Writes the skinning matrices of `joints_used` into `out`.
    ///
    /// For each listed joint, in the given order, 16 floats equal to
    /// `global_matrix * inverse_bind_matrix` are written using the tree's
    /// matrix layout. `out` is resized to `16 * joints_used.len()`.
    ///
    /// Reads cached globals only; run a global pose pass first if any local
    /// matrix changed. On error `out` is left as it was.
    pub fn write_skinning_pose(&self, joints_used: &[usize], out: &mut Vec<f32>) -> Result<()> {
        for &joint_idx in joints_used {
            self.check_index(joint_idx, "skin joint")?;
        }

        out.resize(joints_used.len() * MATRIX_FLOATS, 0.0);
        let layout = self.settings.matrix_layout;
        for (&joint_idx, chunk) in joints_used.iter().zip(out.chunks_exact_mut(MATRIX_FLOATS)) {
            layout.write(&self.joints[joint_idx].skinning_matrix(), chunk);
        }
        Ok(())
    }

    /// Allocating variant of [`write_skinning_pose`](Self::write_skinning_pose).
    pub fn skinning_pose(&self, joints_used: &[usize]) -> Result<Vec<f32>> {
        let mut out = Vec::with_capacity(joints_used.len() * MATRIX_FLOATS);
        self.write_skinning_pose(joints_used, &mut out)?;
        Ok(out)
    }

    /// Skinning matrices for every joint of `skin`.
    pub fn skin_pose(&self, skin: &SkinDescription) -> Result<Vec<f32>> {
        self.skinning_pose(&skin.joints)
    }

    /// Runs a global pose pass, then returns the world position of each named
    /// joint in request order.
    ///
    /// Unknown names are logged and skipped, so the result may be shorter
    /// than `names`.
    pub fn global_keypoints<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<Vec3> {
        self.update_global_pose();

        names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let joint = self.joint_by_name(name);
                if joint.is_none() {
                    log::warn!("Keypoint '{name}' does not match any joint; skipping");
                }
                joint.map(|j| j.global_translation())
            })
            .collect()
    }

    /// World translation of the head of the top-level joint list.
    #[must_use]
    pub fn root_translation(&self) -> Option<Vec3> {
        self.root_first_child
            .map(|idx| self.joints[idx].global_translation())
    }
}
