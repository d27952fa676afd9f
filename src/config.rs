//! Tunable constants and the hardware profile the control loop runs under.

/// Duty cycle the ramp jumps to when the accelerator is pressed again.
pub const STARTING_DUTY_CYCLE: u8 = 100;

/// How far the duty cycle climbs per cycle while below the target.
pub const DUTY_CYCLE_INCREMENT: u8 = 5;

/// Target duty cycle per speed tier, out of 255.
///
/// 175/255 = 68%, 215/255 = 85%, 255/255 = 100%.
pub const TARGET_DUTY_CYCLES: [u8; 4] = [0, 175, 215, 255];

/// Divider voltage above which the pedal counts as pressed, in millivolts.
///
/// The 470 and 100 ohm divider keeps a 12-24 volt pedal line inside the 5 volt
/// range of the ADC.
pub const PEDAL_THRESHOLD_MV: u16 = 500;

/// Time the inactive channel is given to settle at zero before the active one
/// is driven, in microseconds.
pub const SETTLE_DELAY_US: u32 = 50;

/// What the two board revisions can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    /// Reverse / low / high selector and a second PWM channel are present.
    pub has_gear_selector: bool,
    /// Pacing delay at the end of every cycle, in milliseconds.
    pub cycle_period_ms: u32,
}

impl Profile {
    /// One PWM channel, forward only.
    pub const SINGLE_DIRECTION: Self = Self {
        name: "single-direction",
        has_gear_selector: false,
        cycle_period_ms: 20,
    };

    /// Reverse / low / high gears on two complementary PWM channels.
    pub const DUAL_GEAR: Self = Self {
        name: "dual-gear",
        has_gear_selector: true,
        cycle_period_ms: 10,
    };
}

/// How the accelerator pedal is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedalSense {
    /// Pedal line fed through a voltage divider into an analog pin.
    AnalogDivider { threshold_mv: u16 },
    /// Pedal closes a pulled-up switch to ground.
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampConfig {
    pub starting_duty: u8,
    pub increment: u8,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            starting_duty: STARTING_DUTY_CYCLE,
            increment: DUTY_CYCLE_INCREMENT,
        }
    }
}

/// Everything the control loop needs besides the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub profile: Profile,
    pub ramp: RampConfig,
    pub targets: [u8; 4],
    pub pedal: PedalSense,
    pub settle_delay_us: u32,
    /// Consecutive identical reads a selector line needs before it changes
    /// state. `1` passes every read straight through.
    pub debounce_samples: u8,
}

impl Config {
    pub const fn new(profile: Profile) -> Self {
        Self {
            profile,
            ramp: RampConfig {
                starting_duty: STARTING_DUTY_CYCLE,
                increment: DUTY_CYCLE_INCREMENT,
            },
            targets: TARGET_DUTY_CYCLES,
            pedal: PedalSense::AnalogDivider {
                threshold_mv: PEDAL_THRESHOLD_MV,
            },
            settle_delay_us: SETTLE_DELAY_US,
            debounce_samples: 1,
        }
    }

    pub const fn with_pedal(mut self, pedal: PedalSense) -> Self {
        self.pedal = pedal;
        self
    }

    pub const fn with_debounce(mut self, samples: u8) -> Self {
        self.debounce_samples = samples;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Profile::SINGLE_DIRECTION)
    }
}
