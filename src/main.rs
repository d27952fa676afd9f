//! Firmware for the SparkFun Pro Micro (ATmega32U4, 5 V) driving a BTS7960-style
//! dual half-bridge motor controller.
//!
//! ```text
//!                              Arduino Pro Micro
//!                            +-------------------+
//!                            | [ ]TX      RAW[ ] | POWER IN
//!                            | [ ]RX      GND[ ] | GND
//!                        GND | [ ]GND     RST[ ] |
//!                        GND | [ ]GND     VCC[ ] | MotorControllers
//!             Speed 1 Jumper | [ ]2        A3[ ] |
//!             Speed 2 Jumper | [ ]3~       A2[ ] |
//!             Speed 3 Jumper | [ ]4        A1[ ] |
//!                            | [ ]5~       A0[ ] | Accelerator
//!                            | [ ]6~       15[ ] | Gear: low forward
//!              MCEnable_R_EN | [ ]7        14[ ] | Gear: reverse
//!              MCEnable_L_EN | [ ]8        16[ ] | Gear: high forward
//!                       RPWM | [ ]9~      ~10[ ] | LPWM
//!                            +-------------------+
//! ```
//!
//! Build with `--features avr` (plus `gear-selector` and/or `pedal-switch`
//! for the other board revisions).

#![no_std]
#![no_main]

use arduino_hal::{
    hal::{
        port::{mode, Pin},
        usart::BaudrateArduinoExt,
    },
    simple_pwm::{IntoPwmPin, Prescaler, PwmPinOps, Timer1Pwm},
};
use core::convert::Infallible;
use embedded_hal::{delay::DelayNs, pwm::SetDutyCycle};
use panic_halt as _;
use powerwheels::{Config, MotorDriver, Profile, Sampler, Vehicle};

/// Bitrate for the diagnostic serial port.
const BITRATE: u32 = 9600;

#[cfg(feature = "gear-selector")]
const PROFILE: Profile = Profile::DUAL_GEAR;
#[cfg(not(feature = "gear-selector"))]
const PROFILE: Profile = Profile::SINGLE_DIRECTION;

#[cfg(feature = "pedal-switch")]
const CONFIG: Config = Config::new(PROFILE).with_pedal(powerwheels::PedalSense::Switch);
#[cfg(not(feature = "pedal-switch"))]
const CONFIG: Config = Config::new(PROFILE);

/// Timer1 PWM output seen through `embedded-hal`.
struct PwmChannel<PIN>(Pin<mode::PwmOutput<Timer1Pwm>, PIN>);

impl<PIN: PwmPinOps<Timer1Pwm>> PwmChannel<PIN> {
    fn new(mut pin: Pin<mode::PwmOutput<Timer1Pwm>, PIN>) -> Self {
        pin.set_duty(0);
        pin.enable();
        Self(pin)
    }
}

impl<PIN> embedded_hal::pwm::ErrorType for PwmChannel<PIN> {
    type Error = Infallible;
}

impl<PIN: PwmPinOps<Timer1Pwm>> SetDutyCycle for PwmChannel<PIN> {
    fn max_duty_cycle(&self) -> u16 {
        u16::from(u8::MAX)
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.set_duty(duty.min(u16::from(u8::MAX)) as u8);
        Ok(())
    }
}

/// Accelerator behind the 470/100 ohm divider on A0.
#[cfg(not(feature = "pedal-switch"))]
struct AnalogPedal {
    adc: arduino_hal::Adc,
    pin: Pin<mode::Analog, arduino_hal::hal::port::PF7>,
}

#[cfg(not(feature = "pedal-switch"))]
impl powerwheels::AcceleratorInput for AnalogPedal {
    fn sample(&mut self) -> powerwheels::PedalReading {
        powerwheels::PedalReading::Analog {
            raw: self.pin.analog_read(&mut self.adc),
        }
    }
}

/// Busy-wait delays on the 16 MHz core clock.
struct BusyWait;

impl DelayNs for BusyWait {
    fn delay_ns(&mut self, ns: u32) {
        arduino_hal::delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        arduino_hal::delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        arduino_hal::delay_ms(ms);
    }
}

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().expect("peripherals already taken");
    let pins = arduino_hal::pins!(dp);
    let serial = arduino_hal::Usart::new(
        dp.USART1,
        pins.d0,
        pins.d1.into_output(),
        BaudrateArduinoExt::into_baudrate(BITRATE),
    );

    let speed = [
        pins.d2.into_pull_up_input().downgrade(),
        pins.d3.into_pull_up_input().downgrade(),
        pins.d4.into_pull_up_input().downgrade(),
    ];

    #[cfg(feature = "gear-selector")]
    let gear = Some([
        pins.d14.into_pull_up_input().downgrade(),
        pins.d15.into_pull_up_input().downgrade(),
        pins.d16.into_pull_up_input().downgrade(),
    ]);
    #[cfg(not(feature = "gear-selector"))]
    let gear = None;

    #[cfg(not(feature = "pedal-switch"))]
    let pedal = {
        let mut adc = arduino_hal::Adc::new(dp.ADC, Default::default());
        let pin = pins.a0.into_analog_input(&mut adc);
        AnalogPedal { adc, pin }
    };
    #[cfg(feature = "pedal-switch")]
    let pedal = powerwheels::input::PedalSwitch::new(pins.a0.into_pull_up_input());

    let sampler = Sampler::new(speed, gear, pedal, CONFIG.debounce_samples);

    let timer1 = Timer1Pwm::new(dp.TC1, Prescaler::Prescale64);
    let rpwm = PwmChannel::new(pins.d9.into_output().into_pwm(&timer1));
    let lpwm = PwmChannel::new(pins.d10.into_output().into_pwm(&timer1));
    let enable = [
        pins.d7.into_output().downgrade(),
        pins.d8.into_output().downgrade(),
    ];

    // The forward-only board drives the motor through RPWM alone.
    #[cfg(feature = "gear-selector")]
    let (forward, reverse) = (lpwm, rpwm);
    #[cfg(not(feature = "gear-selector"))]
    let (forward, reverse) = (rpwm, lpwm);

    let motor = MotorDriver::new(forward, reverse, enable, CONFIG.settle_delay_us)
        .expect("motor outputs are infallible");

    let mut vehicle = Vehicle::new(CONFIG, sampler, motor, serial);
    let mut delay = BusyWait;

    loop {
        vehicle.cycle(&mut delay).ok();
    }
}
