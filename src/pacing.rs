//! Animation-frame timestamps to simulation steps

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};

/// Ticks to run this frame, each advancing the virtual clock by `dt_ms`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub ticks: u32,
    pub dt_ms: f64,
}

/// Converts frame timestamps into simulation steps
#[derive(Debug, Clone)]
pub struct FramePacer {
    fixed: bool,
    accumulator_ms: f64,
    last_time_ms: Option<f64>,
}

impl FramePacer {
    /// `fixed`: 60Hz accumulator; otherwise one tick per frame
    pub fn new(fixed: bool) -> Self {
        Self {
            fixed,
            accumulator_ms: 0.0,
            last_time_ms: None,
        }
    }

    /// Forget timing history (after a long pause or a restart)
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.last_time_ms = None;
    }

    /// Steps owed for a frame presented at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Steps {
        let elapsed = match self.last_time_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => SIM_DT_MS,
        };
        self.last_time_ms = Some(now_ms);

        if !self.fixed {
            return Steps {
                ticks: 1,
                dt_ms: elapsed,
            };
        }

        self.accumulator_ms += elapsed;
        let mut ticks = 0;
        while self.accumulator_ms >= SIM_DT_MS && ticks < MAX_SUBSTEPS {
            self.accumulator_ms -= SIM_DT_MS;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog instead of chasing it
            self.accumulator_ms = self.accumulator_ms.min(SIM_DT_MS);
        }

        Steps {
            ticks,
            dt_ms: SIM_DT_MS,
        }
    }
}
