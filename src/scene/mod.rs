//! Scene tree
//!
//! The joint hierarchy and everything computed over it:
//! - [`SceneTree`]: joint arena, name lookup, child/sibling topology
//! - [`JointNode`]: one joint with local, global and inverse-bind matrices
//! - [`Qts`]: matrix ⇄ quaternion/translation/uniform-scale codec
//! - `transform_system`: depth-first global pose propagation
//! - `skeleton`: skinning buffers and keypoints
//! - `pose`: direct local pose edits
//! - `structure`: split / retarget / graft
//! - `recover`: solver-facing pose recovery in `f32` and `f64`

pub mod node;
pub mod pose;
pub mod recover;
pub mod skeleton;
pub mod structure;
pub mod transform;
pub mod transform_system;
pub mod tree;

pub use node::JointNode;
pub use recover::{EulerOrder, PoseRecovery};
pub use transform::Qts;
pub use tree::{SceneTree, Siblings};
