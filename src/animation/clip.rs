use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::binding::{TargetPath, TrackMeta};
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    /// Last key time of the underlying track.
    #[must_use]
    pub fn cycle_length(&self) -> f64 {
        match self {
            Self::Vector3(track) => track.cycle_length(),
            Self::Quaternion(track) => track.cycle_length(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Vector3(track) => track.is_empty(),
            Self::Quaternion(track) => track.is_empty(),
        }
    }
}

/// One animation channel: target metadata plus keyframe data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    #[must_use]
    pub fn rotation(joint: usize, track: KeyframeTrack<Quat>) -> Self {
        Self {
            meta: TrackMeta {
                joint,
                target: TargetPath::Rotation,
            },
            data: TrackData::Quaternion(track),
        }
    }

    #[must_use]
    pub fn translation(joint: usize, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta {
                joint,
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(track),
        }
    }

    #[must_use]
    pub fn scale(joint: usize, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta {
                joint,
                target: TargetPath::Scale,
            },
            data: TrackData::Vector3(track),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Longest track cycle. Tracks still wrap on their own cycle length.
    pub duration: f64,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.cycle_length())
            .fold(0.0_f64, f64::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }
}
