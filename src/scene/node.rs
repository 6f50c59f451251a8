use glam::{Mat4, Vec3};

use crate::scene::transform::translation_of;

/// One joint of a [`SceneTree`](crate::scene::SceneTree).
///
/// # Design Principles
///
/// - Joints live in a single contiguous array owned by the tree; every link
///   is an index into that array
/// - The synthetic root is not stored; a `None` parent means the joint hangs
///   directly under it
/// - Children are encoded as a singly linked list: `first_child` points at the
///   most recently attached child, `next_sibling` walks the rest
///
/// # Matrices
///
/// - `local_matrix`: transform relative to the parent, mutated by pose edits
///   and animation
/// - `global_matrix`: transform relative to the tree root, only valid right
///   after a global pose pass
/// - `inverse_bind_matrix`: inverse of the rest-pose global, captured at build
#[derive(Debug, Clone)]
pub struct JointNode {
    // === Identity ===
    pub(crate) index: usize,
    pub(crate) name: String,

    // === Hierarchy ===
    pub(crate) parent: Option<usize>,
    pub(crate) first_child: Option<usize>,
    pub(crate) next_sibling: Option<usize>,

    // === Spatial Data ===
    pub(crate) local_matrix: Mat4,
    pub(crate) global_matrix: Mat4,
    pub(crate) inverse_bind_matrix: Mat4,
}

impl JointNode {
    /// Creates an unlinked joint whose global and inverse-bind matrices are
    /// the identity.
    #[must_use]
    pub fn new(index: usize, parent: Option<usize>, name: impl Into<String>, local: Mat4) -> Self {
        Self {
            index,
            name: name.into(),
            parent,
            first_child: None,
            next_sibling: None,
            local_matrix: local,
            global_matrix: Mat4::IDENTITY,
            inverse_bind_matrix: Mat4::IDENTITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent joint index (None for joints under the synthetic root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn first_child(&self) -> Option<usize> {
        self.first_child
    }

    #[inline]
    #[must_use]
    pub fn next_sibling(&self) -> Option<usize> {
        self.next_sibling
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    /// Returns the global matrix computed by the last pose pass.
    ///
    /// Stale if the local matrix of this joint or any ancestor was edited
    /// since then.
    #[inline]
    #[must_use]
    pub fn global_matrix(&self) -> &Mat4 {
        &self.global_matrix
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrix(&self) -> &Mat4 {
        &self.inverse_bind_matrix
    }

    /// World-space position of the joint.
    #[inline]
    #[must_use]
    pub fn global_translation(&self) -> Vec3 {
        translation_of(&self.global_matrix)
    }

    /// `global_matrix * inverse_bind_matrix`, the matrix uploaded for GPU
    /// skinning.
    #[inline]
    #[must_use]
    pub fn skinning_matrix(&self) -> Mat4 {
        self.global_matrix * self.inverse_bind_matrix
    }

    /// Drops all tree links, keeping matrices and identity.
    pub(crate) fn unlink(&mut self) {
        self.first_child = None;
        self.next_sibling = None;
    }
}
