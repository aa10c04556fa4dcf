use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::InputError;

/// Wall-clock budget for drawing and showing frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Time each frame occupies on screen, drawing included.
    pub frame_interval_ms: u64,
    /// Pause after each cell so the application keeps up with the clicks.
    pub per_cell_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self { frame_interval_ms: 3_000, per_cell_delay_ms: 10 }
    }
}

impl Timing {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn per_cell_delay(&self) -> Duration {
        Duration::from_millis(self.per_cell_delay_ms)
    }

    /// Minimum time spent drawing one frame of `cell_count` cells.
    pub fn draw_time(&self, cell_count: usize) -> Duration {
        Duration::from_millis(self.per_cell_delay_ms.saturating_mul(cell_count as u64))
    }

    /// Fails when drawing a frame cannot fit inside its display interval.
    pub fn validate(&self, cell_count: usize) -> Result<(), InputError> {
        let draw = self.draw_time(cell_count);
        if draw > self.frame_interval() {
            return Err(InputError::FrameTooSlow { draw, interval: self.frame_interval() });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Time left in the current frame slot.
    Sleep(Duration),
    /// The slot was exceeded by this much.
    Overrun(Duration),
}

/// Splits time into fixed slots, one per frame.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pace(&self, elapsed: Duration) -> Pace {
        match self.interval.checked_sub(elapsed) {
            Some(remaining) if remaining > Duration::ZERO => Pace::Sleep(remaining),
            _ => Pace::Overrun(elapsed.saturating_sub(self.interval)),
        }
    }
}

pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Never sleeps; remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pub requests: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.requests.push(duration);
    }
}
