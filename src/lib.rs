//! Hierarchical transform and skeletal pose engine.
//!
//! A [`SceneTree`] owns a joint hierarchy built from a loader-supplied
//! [`SceneDescription`](assets::SceneDescription). Each frame the host:
//! 1. samples animation into local matrices ([`SceneTree::set_animation_frame`])
//! 2. propagates global matrices ([`SceneTree::update_global_pose`])
//! 3. extracts skinning matrices ([`SceneTree::skinning_pose`]) for upload
//!
//! ```rust,ignore
//! use skintree::{SceneTree, SceneTreeSettings};
//!
//! let mut tree = SceneTree::from_description(&desc, SceneTreeSettings::default())?;
//! let clock = skintree::utils::HostClock::new();
//! loop {
//!     tree.set_animation_frame(&desc.animations, clock.timestamp())?;
//!     tree.update_global_pose();
//!     let pose = tree.skin_pose(&desc.skins[0])?;
//!     // upload `pose`
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track};
pub use assets::{NodeDescription, NodeTransform, SceneDescription, SkinDescription};
pub use errors::{Result, SceneTreeError};
pub use scene::{JointNode, Qts, SceneTree};
pub use settings::{MatrixLayout, ScaleChannelMode, SceneTreeSettings};
