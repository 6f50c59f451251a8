//! Scene Tree Settings
//!
//! Per-tree configuration that changes how poses are exchanged with the host
//! and how animation channels are applied.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use skintree::settings::{MatrixLayout, SceneTreeSettings};
//!
//! // Default: row-major flat buffers, scale channels ignored
//! let settings = SceneTreeSettings::default();
//!
//! // Column-major buffers for a GL/WGSL upload path
//! let settings = SceneTreeSettings {
//!     matrix_layout: MatrixLayout::ColumnMajor,
//!     ..Default::default()
//! };
//! ```

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Number of floats occupied by one 4×4 matrix in a flat buffer.
pub const MATRIX_FLOATS: usize = 16;

// ---------------------------------------------------------------------------
// MatrixLayout
// ---------------------------------------------------------------------------

/// Element order of each 4×4 matrix inside a flat `f32` pose buffer.
///
/// Every flat buffer produced or consumed by a tree (skinning pose, local
/// pose snapshot, bulk local overwrite, external translation edits) uses the
/// layout of that tree's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatrixLayout {
    /// `m[row * 4 + col]`. Translation lives at elements 3, 7 and 11.
    #[default]
    RowMajor,
    /// `m[col * 4 + row]`, the native glam / GLSL order. Translation lives at
    /// elements 12, 13 and 14.
    ColumnMajor,
}

impl MatrixLayout {
    /// Writes `mat` into the first 16 elements of `out`.
    #[inline]
    pub fn write(self, mat: &Mat4, out: &mut [f32]) {
        let data = match self {
            Self::RowMajor => mat.transpose().to_cols_array(),
            Self::ColumnMajor => mat.to_cols_array(),
        };
        out[..MATRIX_FLOATS].copy_from_slice(&data);
    }

    /// Reads a matrix from the first 16 elements of `data`.
    #[inline]
    #[must_use]
    pub fn read(self, data: &[f32]) -> Mat4 {
        let mat = Mat4::from_cols_slice(&data[..MATRIX_FLOATS]);
        match self {
            Self::RowMajor => mat.transpose(),
            Self::ColumnMajor => mat,
        }
    }

    /// Element offsets of the translation x, y and z components.
    #[inline]
    #[must_use]
    pub fn translation_offsets(self) -> [usize; 3] {
        match self {
            Self::RowMajor => [3, 7, 11],
            Self::ColumnMajor => [12, 13, 14],
        }
    }

    /// Overwrites only the translation of the matrix stored in `out`.
    #[inline]
    pub fn write_translation(self, translation: Vec3, out: &mut [f32]) {
        let [x, y, z] = self.translation_offsets();
        out[x] = translation.x;
        out[y] = translation.y;
        out[z] = translation.z;
    }
}

// ---------------------------------------------------------------------------
// ScaleChannelMode
// ---------------------------------------------------------------------------

/// How scale animation channels are applied to a joint's local matrix.
///
/// The sampler tracks a single uniform scale through matrix decomposition.
/// By default scale channels are sampled but not written back, so an
/// animated scale never reaches the composed matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleChannelMode {
    /// Scale channels leave the local matrix untouched.
    #[default]
    Ignore,
    /// The interpolated scale vector is averaged into the uniform scale.
    Uniform,
}

// ---------------------------------------------------------------------------
// SceneTreeSettings
// ---------------------------------------------------------------------------

/// Configuration carried by a [`SceneTree`](crate::scene::SceneTree) and
/// inherited by every tree derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTreeSettings {
    /// Element order of flat matrix buffers.
    pub matrix_layout: MatrixLayout,
    /// Treatment of scale animation channels.
    pub scale_channels: ScaleChannelMode,
}
