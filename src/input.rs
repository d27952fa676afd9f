//! Input sampling.
//!
//! Every selector line is pulled up and asserted by shorting it to ground, so a
//! disconnected line simply reads as released. The accelerator is either an
//! analog voltage divider or a pulled-up switch, depending on the board.

use embedded_hal::digital::InputPin;
use ufmt::{uDisplay, uWrite, Formatter};

use crate::config::PedalSense;
use crate::gear::GearLines;

/// Full-scale reading of the 10-bit ADC.
pub const ADC_MAX: u16 = 1023;

/// ADC reference voltage, in millivolts.
pub const ADC_REFERENCE_MV: u32 = 5000;

/// A voltage in millivolts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Millivolts(pub u16);

impl Millivolts {
    /// Scales a raw 0..=1023 reading onto 0..=5000 mV.
    pub fn from_raw(raw: u16) -> Self {
        let raw = u32::from(raw.min(ADC_MAX));
        Self((raw * ADC_REFERENCE_MV / u32::from(ADC_MAX)) as u16)
    }
}

impl uDisplay for Millivolts {
    /// Prints volts with two decimals, e.g. `2.49`.
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let volts = self.0 / 1000;
        let hundredths = (self.0 % 1000) / 10;
        uDisplay::fmt(&volts, f)?;
        f.write_str(".")?;
        if hundredths < 10 {
            f.write_str("0")?;
        }
        uDisplay::fmt(&hundredths, f)
    }
}

/// One sample of the accelerator pedal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedalReading {
    /// Raw 10-bit ADC value of the divider output.
    Analog { raw: u16 },
    /// Pulled-up switch; `low` means closed.
    Switch { low: bool },
}

impl PedalReading {
    /// Divider voltage, if this is an analog reading.
    pub fn voltage(self) -> Option<Millivolts> {
        match self {
            Self::Analog { raw } => Some(Millivolts::from_raw(raw)),
            Self::Switch { .. } => None,
        }
    }

    /// Whether the pedal counts as pressed under the given wiring.
    ///
    /// A reading that does not match the configured wiring never counts.
    pub fn is_pressed(self, sense: PedalSense) -> bool {
        match (self, sense) {
            (Self::Analog { raw }, PedalSense::AnalogDivider { threshold_mv }) => {
                Millivolts::from_raw(raw).0 > threshold_mv
            }
            (Self::Switch { low }, PedalSense::Switch) => low,
            _ => false,
        }
    }
}

/// Source of accelerator samples.
pub trait AcceleratorInput {
    fn sample(&mut self) -> PedalReading;
}

/// Pedal wired as a pulled-up switch on any digital input.
pub struct PedalSwitch<P> {
    pin: P,
}

impl<P: InputPin> PedalSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> AcceleratorInput for PedalSwitch<P> {
    fn sample(&mut self) -> PedalReading {
        PedalReading::Switch {
            low: self.pin.is_low().unwrap_or(false),
        }
    }
}

/// Holds a line's logical state until the raw reading has disagreed with it
/// for `samples` consecutive reads.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    samples: u8,
    state: bool,
    count: u8,
}

impl Debouncer {
    pub fn new(samples: u8) -> Self {
        Self {
            samples: samples.max(1),
            state: false,
            count: 0,
        }
    }

    pub fn update(&mut self, raw: bool) -> bool {
        if raw == self.state {
            self.count = 0;
        } else {
            self.count += 1;
            if self.count >= self.samples {
                self.state = raw;
                self.count = 0;
            }
        }
        self.state
    }

    pub fn state(&self) -> bool {
        self.state
    }
}

/// An active-low selector input and its debounce stage.
struct Line<P> {
    pin: P,
    debounce: Debouncer,
}

impl<P: InputPin> Line<P> {
    fn new(pin: P, samples: u8) -> Self {
        Self {
            pin,
            debounce: Debouncer::new(samples),
        }
    }

    fn read(&mut self) -> bool {
        // A failed read is treated like the pull-up: released.
        let asserted = self.pin.is_low().unwrap_or(false);
        self.debounce.update(asserted)
    }
}

/// Logical inputs of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inputs {
    /// Speed selectors 1, 2 and 3.
    pub speed: [bool; 3],
    /// `None` on boards without a gear selector.
    pub gear: Option<GearLines>,
    pub pedal: PedalReading,
}

/// Reads every operator input once per cycle.
pub struct Sampler<P, A> {
    speed: [Line<P>; 3],
    gear: Option<[Line<P>; 3]>,
    pedal: A,
}

impl<P: InputPin, A: AcceleratorInput> Sampler<P, A> {
    /// `speed` holds selectors 1, 2 and 3; `gear` holds reverse, low forward
    /// and high forward.
    pub fn new(speed: [P; 3], gear: Option<[P; 3]>, pedal: A, debounce_samples: u8) -> Self {
        Self {
            speed: speed.map(|pin| Line::new(pin, debounce_samples)),
            gear: gear.map(|pins| pins.map(|pin| Line::new(pin, debounce_samples))),
            pedal,
        }
    }

    pub fn sample(&mut self) -> Inputs {
        let [s1, s2, s3] = &mut self.speed;
        let speed = [s1.read(), s2.read(), s3.read()];

        let gear = self.gear.as_mut().map(|[reverse, low, high]| GearLines {
            reverse: reverse.read(),
            low_forward: low.read(),
            high_forward: high.read(),
        });

        Inputs {
            speed,
            gear,
            pedal: self.pedal.sample(),
        }
    }
}
