//! Duty cycle ramp.
//!
//! Ramps up by a fixed increment per cycle, but drops instantly: releasing the
//! pedal cuts the output to zero in the same cycle, and selecting a lower
//! speed tier clamps it straight down to the new target.

use crate::config::RampConfig;
use crate::gate::Engagement;

/// Owns the present PWM magnitude, independent of direction.
#[derive(Debug)]
pub struct RampController {
    config: RampConfig,
    duty: u8,
}

impl RampController {
    pub fn new(config: RampConfig) -> Self {
        Self { config, duty: 0 }
    }

    /// Advances the ramp by one cycle and returns the new duty cycle.
    pub fn update(&mut self, engagement: Engagement, target: u8) -> u8 {
        if !engagement.active {
            self.duty = 0;
            return self.duty;
        }

        if engagement.reset {
            self.duty = self.config.starting_duty;
        }

        if self.duty < target {
            // Can overshoot the target by up to increment - 1 for one cycle.
            self.duty = self.duty.saturating_add(self.config.increment);
        } else if self.duty > target {
            self.duty = target;
        }

        self.duty
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }
}
