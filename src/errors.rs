//! Error Types
//!
//! This module defines the error type returned by every fallible scene tree
//! operation.
//!
//! # Overview
//!
//! [`SceneTreeError`] covers structural precondition violations:
//! - Building a tree twice without a reset
//! - Unknown or duplicated joint names
//! - Joint indices and parent links that point outside the joint array
//! - Flat pose buffers or parallel input arrays with the wrong length
//!
//! Soft misses (a best-effort keypoint query naming an unknown joint) are not
//! errors; they are logged and skipped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use skintree::errors::{SceneTreeError, Result};
//!
//! fn retarget(tree: &SceneTree) -> Result<SceneTree> {
//!     tree.split(&["Hips", "Spine", "Head"])
//! }
//! ```

use thiserror::Error;

/// The error type for scene tree construction, pose editing and derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneTreeError {
    // ========================================================================
    // Construction
    // ========================================================================
    /// `build` was called on a tree that already holds a hierarchy.
    #[error("Scene tree is already built; call reset() before building again")]
    AlreadyBuilt,

    /// A node names a parent index that does not exist.
    #[error("Joint '{joint}' references parent index {parent}, but only {count} joints exist")]
    InvalidParent {
        /// Name of the offending joint
        joint: String,
        /// The parent index it referenced
        parent: usize,
        /// Number of joints in the description
        count: usize,
    },

    /// Following parent links from a joint leads back to itself.
    #[error("Joint '{0}' is part of a parent cycle")]
    Cycle(String),

    /// The operation needs at least one joint.
    #[error("Scene tree has no joints")]
    EmptyTree,

    // ========================================================================
    // Lookup
    // ========================================================================
    /// No joint with this name exists in the tree.
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    /// A joint name was supplied twice where names must be unique.
    #[error("Duplicate joint: {0}")]
    DuplicateJoint(String),

    /// A joint index is outside the joint array.
    #[error("Joint index out of range: {context} (index: {index}, joints: {count})")]
    JointIndexOutOfRange {
        /// Description of what was being accessed
        context: &'static str,
        /// The invalid index
        index: usize,
        /// Number of joints in the tree
        count: usize,
    },

    // ========================================================================
    // Buffer & Argument Shape
    // ========================================================================
    /// A flat pose buffer does not have the required number of floats.
    #[error("Pose buffer size mismatch: expected {expected} floats, got {actual}")]
    BufferSizeMismatch {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Two inputs that must have matching lengths do not.
    #[error("Length mismatch in {context}: {left} vs {right}")]
    LengthMismatch {
        /// Description of the mismatched inputs
        context: &'static str,
        /// Length of the first input
        left: usize,
        /// Length of the second input
        right: usize,
    },
}

/// Alias for `Result<T, SceneTreeError>`.
pub type Result<T> = std::result::Result<T, SceneTreeError>;
