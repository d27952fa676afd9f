//! The per-cycle control loop.
//!
//! [`ControlLoop`] is the only thing that carries state from one cycle to the
//! next: the accelerator edge detector and the ramped duty cycle. Everything
//! else is recomputed from the inputs each cycle.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use ufmt::uWrite;

use crate::config::Config;
use crate::diagnostics::{self, Snapshot};
use crate::gate::AcceleratorGate;
use crate::gear::Gear;
use crate::input::{AcceleratorInput, Inputs, Sampler};
use crate::motor::{MotorDriver, MotorError};
use crate::ramp::RampController;
use crate::speed::SpeedTier;

pub struct ControlLoop {
    config: Config,
    gate: AcceleratorGate,
    ramp: RampController,
}

impl ControlLoop {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            gate: AcceleratorGate::new(),
            ramp: RampController::new(config.ramp),
        }
    }

    /// Runs gear resolution, the accelerator gate and the ramp for one cycle.
    pub fn step(&mut self, inputs: &Inputs) -> Snapshot {
        let [one, two, three] = inputs.speed;
        let tier = SpeedTier::from_selectors(one, two, three);
        let gear = self.gear(inputs);

        let engagement = self.gate.update(inputs.pedal, self.config.pedal, gear);
        let duty = self
            .ramp
            .update(engagement, tier.target_duty(&self.config.targets));

        Snapshot {
            tier,
            gear,
            pedal: inputs.pedal,
            engagement,
            duty,
        }
    }

    /// Boards without a selector only drive forward.
    fn gear(&self, inputs: &Inputs) -> Gear {
        if !self.config.profile.has_gear_selector {
            return Gear::LowForward;
        }
        // Missing lines on a geared board read as neutral.
        Gear::resolve(inputs.gear.unwrap_or_default())
    }

    pub fn duty(&self) -> u8 {
        self.ramp.duty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// The whole vehicle: inputs, control loop, motor outputs and the serial report.
pub struct Vehicle<P, A, F, R, E, W> {
    sampler: Sampler<P, A>,
    control: ControlLoop,
    motor: MotorDriver<F, R, E>,
    diagnostics: W,
}

impl<P, A, F, R, E, W> Vehicle<P, A, F, R, E, W>
where
    P: InputPin,
    A: AcceleratorInput,
    F: SetDutyCycle,
    R: SetDutyCycle,
    E: OutputPin,
    W: uWrite,
{
    /// Prints the startup banner.
    pub fn new(
        config: Config,
        sampler: Sampler<P, A>,
        motor: MotorDriver<F, R, E>,
        mut diagnostics: W,
    ) -> Self {
        diagnostics::banner(&mut diagnostics, &config.profile).ok();
        Self {
            sampler,
            control: ControlLoop::new(config),
            motor,
            diagnostics,
        }
    }

    /// Runs one full cycle, including the pacing delay at the end.
    ///
    /// All inputs are read before any output is written. The report and the
    /// pacing delay happen even if an output write failed.
    pub fn cycle<D: DelayNs>(&mut self, delay: &mut D) -> Result<Snapshot, MotorError<F, R, E>> {
        let inputs = self.sampler.sample();
        let snapshot = self.control.step(&inputs);

        let driven = self.motor.drive(snapshot.gear, snapshot.duty, delay);
        diagnostics::report(&mut self.diagnostics, &snapshot).ok();
        delay.delay_ms(self.control.config().profile.cycle_period_ms);

        driven.map(|()| snapshot)
    }

    pub fn control(&self) -> &ControlLoop {
        &self.control
    }

    pub fn diagnostics(&self) -> &W {
        &self.diagnostics
    }
}
