/// Animation time anchor.
///
/// The first call to [`elapsed`](Self::elapsed) records the supplied
/// timestamp as the anchor; later calls measure from it. Clearing the anchor
/// with [`reset`](Self::reset) restarts playback from zero on the next frame.
/// Without a reset, a tree that is handed new clips resumes them mid-cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    anchor: Option<f64>,
}

impl AnimationClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the anchor, setting the anchor to `now` if unset.
    pub fn elapsed(&mut self, now: f64) -> f64 {
        now - *self.anchor.get_or_insert(now)
    }

    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Option<f64> {
        self.anchor
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }
}
