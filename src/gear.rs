//! Gear selector resolution.

use ufmt::{uDisplay, uWrite, Formatter};

/// Signed direction / range. Negative is reverse, positive the forward ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gear {
    Reverse = -1,
    Neutral = 0,
    LowForward = 1,
    HighForward = 2,
}

/// Raw asserted state of the three gear selector lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GearLines {
    pub reverse: bool,
    pub low_forward: bool,
    pub high_forward: bool,
}

impl Gear {
    /// Resolves the selector lines, reverse first.
    ///
    /// Engaging reverse also pulls the low-forward line on this shifter, so
    /// low-forward only counts while reverse is released. When low and high
    /// forward are both asserted, low forward wins.
    pub fn resolve(lines: GearLines) -> Self {
        let low_forward = lines.low_forward && !lines.reverse;

        if lines.reverse {
            Self::Reverse
        } else if low_forward {
            Self::LowForward
        } else if lines.high_forward {
            Self::HighForward
        } else {
            Self::Neutral
        }
    }

    pub fn as_i8(self) -> i8 {
        self as i8
    }

    pub fn is_neutral(self) -> bool {
        self == Self::Neutral
    }
}

impl uDisplay for Gear {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uDisplay::fmt(&self.as_i8(), f)
    }
}
