use serde::{Deserialize, Serialize};

/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetPath {
    Translation, // Overwrites the decomposed translation
    Rotation,    // Overwrites the decomposed rotation
    Scale,       // Only applied under ScaleChannelMode::Uniform
}

/// Target of one animation channel: a property of a joint, by joint index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMeta {
    pub joint: usize,
    pub target: TargetPath,
}
