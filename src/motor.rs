//! Two-channel PWM output for the H-bridge motor controller.
//!
//! The controller has one PWM input per bridge leg. Driving both at once
//! shorts the legs, so the idle channel is always written to zero and given
//! time to settle before the active channel is written.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::DriveError;
use crate::gear::Gear;

/// Full-scale duty cycle of the control loop.
pub const DUTY_MAX: u8 = u8::MAX;

pub struct MotorDriver<F, R, E> {
    forward: F,
    reverse: R,
    /// R_EN and L_EN. Held high for the lifetime of the driver.
    enable: [E; 2],
    settle_delay_us: u32,
}

/// [`DriveError`] for a particular set of channel and enable pin types.
pub type MotorError<F, R, E> = DriveError<
    <F as embedded_hal::pwm::ErrorType>::Error,
    <R as embedded_hal::pwm::ErrorType>::Error,
    <E as embedded_hal::digital::ErrorType>::Error,
>;

impl<F, R, E> MotorDriver<F, R, E>
where
    F: SetDutyCycle,
    R: SetDutyCycle,
    E: OutputPin,
{
    /// Zeroes both channels, then enables the motor controller.
    pub fn new(
        forward: F,
        reverse: R,
        enable: [E; 2],
        settle_delay_us: u32,
    ) -> Result<Self, MotorError<F, R, E>> {
        let mut driver = Self {
            forward,
            reverse,
            enable,
            settle_delay_us,
        };
        driver.stop()?;
        for pin in &mut driver.enable {
            pin.set_high().map_err(DriveError::Enable)?;
        }
        Ok(driver)
    }

    /// Drives the motor in the direction of `gear` at `duty` out of 255.
    ///
    /// The idle channel is zeroed before the delay and the active channel is
    /// written after it. If zeroing fails, nothing else is written.
    pub fn drive<D: DelayNs>(
        &mut self,
        gear: Gear,
        duty: u8,
        delay: &mut D,
    ) -> Result<(), MotorError<F, R, E>> {
        match gear {
            Gear::Neutral => self.stop(),
            Gear::Reverse => {
                self.forward
                    .set_duty_cycle_fully_off()
                    .map_err(DriveError::Forward)?;
                delay.delay_us(self.settle_delay_us);
                self.reverse
                    .set_duty_cycle_fraction(u16::from(duty), u16::from(DUTY_MAX))
                    .map_err(DriveError::Reverse)
            }
            Gear::LowForward | Gear::HighForward => {
                self.reverse
                    .set_duty_cycle_fully_off()
                    .map_err(DriveError::Reverse)?;
                delay.delay_us(self.settle_delay_us);
                self.forward
                    .set_duty_cycle_fraction(u16::from(duty), u16::from(DUTY_MAX))
                    .map_err(DriveError::Forward)
            }
        }
    }

    /// Zeroes both channels.
    pub fn stop(&mut self) -> Result<(), MotorError<F, R, E>> {
        self.forward
            .set_duty_cycle_fully_off()
            .map_err(DriveError::Forward)?;
        self.reverse
            .set_duty_cycle_fully_off()
            .map_err(DriveError::Reverse)
    }
}
