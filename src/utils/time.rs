#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Monotonic seconds source for
/// [`SceneTree::set_animation_frame`](crate::scene::SceneTree::set_animation_frame),
/// for hosts without a frame clock of their own.
///
/// Only the difference between readings matters: the tree anchors its
/// animation clock at the first timestamp it sees.
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    origin: Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created.
    #[must_use]
    pub fn timestamp(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
