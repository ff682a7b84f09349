//! Frame pacing
//!
//! Turns render-callback deltas into a number of simulation ticks. The
//! default runs one tick per frame, so physics speed follows the display
//! refresh rate. The fixed mode decouples them with an accumulator.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::error::ConfigError;

/// How ticks are scheduled relative to render frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum TickMode {
    /// Exactly one tick per frame
    #[default]
    PerFrame,
    /// Fixed tick rate, independent of the display
    Fixed { hz: f32 },
}

/// Accumulator driving the simulation from render callbacks
#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: TickMode,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(mode: TickMode) -> Result<Self, ConfigError> {
        if let TickMode::Fixed { hz } = mode {
            if !(hz.is_finite() && hz > 0.0) {
                return Err(ConfigError::invalid("tick_mode.hz", format!("must be > 0, got {hz}")));
            }
        }
        Ok(Self {
            mode,
            accumulator: 0.0,
        })
    }

    /// Ticks to run for a frame that took `frame_dt` seconds
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        match self.mode {
            TickMode::PerFrame => 1,
            TickMode::Fixed { hz } => {
                let step = 1.0 / hz;
                // Clamp stalls such as a hidden tab
                self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

                let mut substeps = 0;
                while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                    self.accumulator -= step;
                    substeps += 1;
                }
                substeps
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_HZ;

    #[test]
    fn test_per_frame_always_one_tick() {
        let mut clock = FrameClock::new(TickMode::PerFrame).unwrap();
        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(clock.advance(0.5), 1);
        assert_eq!(clock.advance(1.0 / 144.0), 1);
    }

    #[test]
    fn test_fixed_accumulates_short_frames() {
        let mut clock = FrameClock::new(TickMode::Fixed { hz: SIM_HZ }).unwrap();
        // 120 Hz display: a tick every other frame
        let ticks: u32 = (0..120).map(|_| clock.advance(1.0 / 120.0)).sum();
        assert!((59..=60).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn test_fixed_catches_up_on_slow_frames() {
        let mut clock = FrameClock::new(TickMode::Fixed { hz: SIM_HZ }).unwrap();
        // 30 Hz display: two ticks per frame
        let ticks: u32 = (0..30).map(|_| clock.advance(1.0 / 30.0)).sum();
        assert!((59..=60).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn test_fixed_caps_stalls() {
        let mut clock = FrameClock::new(TickMode::Fixed { hz: SIM_HZ }).unwrap();
        let ticks = clock.advance(5.0);
        assert!((5..=6).contains(&ticks), "ticks = {ticks}");
        // Leftover stall time is dropped, not replayed next frame
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        assert!(FrameClock::new(TickMode::Fixed { hz: 0.0 }).is_err());
        assert!(FrameClock::new(TickMode::Fixed { hz: f32::NAN }).is_err());
    }
}
