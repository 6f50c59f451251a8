//! Keyframe animation
//!
//! Clips hold tracks; each track targets the rotation, translation or scale
//! of one joint by index. Sampling is driven through
//! [`SceneTree::set_animation_frame`](crate::scene::SceneTree::set_animation_frame).

pub mod binding;
pub mod clip;
pub mod clock;
pub mod system;
pub mod tracks;
pub mod values;

pub use binding::{TargetPath, TrackMeta};
pub use clip::{AnimationClip, Track, TrackData};
pub use clock::AnimationClock;
pub use tracks::{InterpolationMode, KeyframeBracket, KeyframeTrack};
pub use values::Interpolatable;
