//! Motor control loop for a ride-on vehicle conversion.
//!
//! Reads the speed jumpers, the optional gear selector and the accelerator
//! pedal, ramps a PWM duty cycle towards the selected speed, and drives the
//! H-bridge motor controller one leg at a time. The hardware is reached only
//! through `embedded-hal` traits so the loop runs unchanged on the host.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod gear;
pub mod input;
pub mod motor;
pub mod ramp;
pub mod speed;

pub use config::{Config, PedalSense, Profile};
pub use control::{ControlLoop, Vehicle};
pub use diagnostics::Snapshot;
pub use error::DriveError;
pub use gear::{Gear, GearLines};
pub use input::{AcceleratorInput, Inputs, PedalReading, Sampler};
pub use motor::MotorDriver;
pub use speed::SpeedTier;
