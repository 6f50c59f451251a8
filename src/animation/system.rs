use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData};
use crate::animation::clock::AnimationClock;
use crate::errors::Result;
use crate::scene::node::JointNode;
use crate::scene::transform::Qts;
use crate::scene::tree::SceneTree;
use crate::settings::ScaleChannelMode;

impl SceneTree {
    /// Advances animation to the host timestamp `now` (seconds, monotonic).
    ///
    /// The first call anchors the clock at `now`. Local matrices are updated
    /// in place; run [`update_global_pose`](Self::update_global_pose)
    /// afterwards.
    pub fn set_animation_frame(&mut self, clips: &[AnimationClip], now: f64) -> Result<()> {
        let elapsed = self.clock.elapsed(now);
        self.sample_animations_at(clips, elapsed)
    }

    /// Samples every track of `clips` at `elapsed` seconds since the start
    /// of playback, bypassing the clock.
    ///
    /// Each track wraps `elapsed` on its own cycle length, so tracks of
    /// different length drift out of phase. Track targets are validated up
    /// front; on error no joint is modified.
    pub fn sample_animations_at(&mut self, clips: &[AnimationClip], elapsed: f64) -> Result<()> {
        for track in clips.iter().flat_map(|clip| &clip.tracks) {
            self.check_index(track.meta.joint, "animation track target")?;
        }

        let scale_mode = self.settings.scale_channels;
        for clip in clips {
            for track in &clip.tracks {
                let joint = &mut self.joints[track.meta.joint];
                apply_track(joint, track, elapsed, scale_mode, &clip.name);
            }
        }
        Ok(())
    }

    /// Clears the animation anchor; the next
    /// [`set_animation_frame`](Self::set_animation_frame) restarts at zero.
    pub fn reset_animation_clock(&mut self) {
        self.clock.reset();
    }

    #[inline]
    #[must_use]
    pub fn animation_clock(&self) -> &AnimationClock {
        &self.clock
    }
}

/// Decomposes the joint's current local matrix, overwrites the component
/// targeted by `track`, and recomposes it.
fn apply_track(
    joint: &mut JointNode,
    track: &Track,
    elapsed: f64,
    scale_mode: ScaleChannelMode,
    clip_name: &str,
) {
    if track.data.is_empty() {
        log::warn!(
            "Clip '{clip_name}': empty {:?} track on joint '{}' skipped",
            track.meta.target,
            joint.name
        );
        return;
    }

    let mut qts = Qts::from_matrix(&joint.local_matrix);

    match (&track.data, track.meta.target) {
        (TrackData::Quaternion(t), TargetPath::Rotation) => {
            let Some(rotation) = t.sample(t.reduce_time(elapsed)) else {
                log::warn!("Clip '{clip_name}': malformed rotation track on '{}'", joint.name);
                return;
            };
            qts.rotation = rotation;
        }
        (TrackData::Vector3(t), TargetPath::Translation) => {
            let Some(translation) = t.sample(t.reduce_time(elapsed)) else {
                log::warn!("Clip '{clip_name}': malformed translation track on '{}'", joint.name);
                return;
            };
            qts.translation = translation;
        }
        (TrackData::Vector3(t), TargetPath::Scale) => match scale_mode {
            ScaleChannelMode::Ignore => {}
            ScaleChannelMode::Uniform => {
                let Some(scale) = t.sample(t.reduce_time(elapsed)) else {
                    log::warn!("Clip '{clip_name}': malformed scale track on '{}'", joint.name);
                    return;
                };
                qts.scale = (scale.x + scale.y + scale.z) / 3.0;
            }
        },
        (_, target) => {
            log::warn!(
                "Clip '{clip_name}': {target:?} track on '{}' carries mismatched value type",
                joint.name
            );
            return;
        }
    }

    joint.local_matrix = qts.to_matrix();
}
