//! Frame timing.

/// Measures the time between consecutive frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    previous_ms: Option<u64>,
}

/// Timing of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameTime {
    pub elapsed_ms: u32,
    pub fps: u32,
}

impl FrameClock {
    pub const fn new() -> Self {
        Self { previous_ms: None }
    }

    /// Record a frame starting at `now_ms`. The first frame counts as 1 ms.
    pub fn tick(&mut self, now_ms: u64) -> FrameTime {
        let elapsed = match self.previous_ms {
            Some(previous) => now_ms.saturating_sub(previous),
            None => 1,
        };
        self.previous_ms = Some(now_ms);
        let elapsed_ms = u32::try_from(elapsed).unwrap_or(u32::MAX);
        FrameTime {
            elapsed_ms,
            fps: 1000 / elapsed_ms.max(1),
        }
    }
}
