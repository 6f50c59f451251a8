use glam::{Mat3, Mat4, Quat, Vec3};

/// Quaternion / translation / uniform-scale decomposition of a 4×4 transform.
///
/// The animation sampler splits a joint's local matrix into this form,
/// overwrites one component from a channel, and composes it back. Only
/// rotation, translation and a single uniform scale survive the round trip:
/// shear and non-uniform scale are flattened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qts {
    pub rotation: Quat,
    pub translation: Vec3,
    /// Mean of the three axis scales.
    pub scale: f32,
}

impl Qts {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: 1.0,
    };

    #[must_use]
    pub fn new(rotation: Quat, translation: Vec3, scale: f32) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    /// Decomposes `mat`.
    ///
    /// Each basis column is measured for its length and then normalized; the
    /// normalized 3×3 block becomes the rotation and the mean length becomes
    /// the scale.
    ///
    /// Warning: a zero-length axis produces a non-finite rotation.
    #[must_use]
    pub fn from_matrix(mat: &Mat4) -> Self {
        let x_axis = mat.x_axis.truncate();
        let y_axis = mat.y_axis.truncate();
        let z_axis = mat.z_axis.truncate();

        let (sx, sy, sz) = (x_axis.length(), y_axis.length(), z_axis.length());
        let rot_mat = Mat3::from_cols(x_axis / sx, y_axis / sy, z_axis / sz);

        Self {
            rotation: Quat::from_mat3(&rot_mat).normalize(),
            translation: mat.w_axis.truncate(),
            scale: (sx + sy + sz) / 3.0,
        }
    }

    /// Composes `T · R · S` with a uniform scale.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }
}

impl Default for Qts {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Qts {
    fn from(mat: Mat4) -> Self {
        Self::from_matrix(&mat)
    }
}

impl From<Qts> for Mat4 {
    fn from(qts: Qts) -> Self {
        qts.to_matrix()
    }
}

/// Composes a local matrix from separate translation, rotation and scale.
#[inline]
#[must_use]
pub fn compose_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

/// Returns the translation column of `mat`.
#[inline]
#[must_use]
pub fn translation_of(mat: &Mat4) -> Vec3 {
    mat.w_axis.truncate()
}

/// Overwrites the translation column of `mat`, leaving the 3×3 block as is.
#[inline]
pub fn set_translation(mat: &mut Mat4, translation: Vec3) {
    mat.w_axis = translation.extend(mat.w_axis.w);
}

/// Keeps only the 3×3 rotation block of `mat`, dropping translation.
#[inline]
#[must_use]
pub fn rotation_block(mat: &Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(*mat))
}
