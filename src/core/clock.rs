use std::time::Instant;

use super::frame::FrameInfo;

/// Wall clock for the render loop - elapsed time plus per-frame delta
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    frame_number: u64,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_number: 0,
        }
    }

    /// Advance the clock by one frame
    pub fn tick(&mut self) -> FrameInfo {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameInfo {
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        let time = now.duration_since(self.start).as_secs_f32();
        self.last_tick = now;

        let info = FrameInfo::new(self.frame_number, time, delta);
        self.frame_number += 1;
        info
    }

    /// Forget the time spent since the last tick (e.g. while minimized)
    pub fn skip(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
