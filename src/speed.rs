//! Speed tier selected by the three jumper inputs.

use ufmt::{uDisplay, uWrite, Formatter};

/// Forward power cap chosen by the operator, independent of gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpeedTier {
    Neutral = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl SpeedTier {
    /// Resolves the asserted selectors; the highest tier wins.
    pub fn from_selectors(one: bool, two: bool, three: bool) -> Self {
        if three {
            Self::Three
        } else if two {
            Self::Two
        } else if one {
            Self::One
        } else {
            Self::Neutral
        }
    }

    /// Looks up the duty cycle this tier ramps towards.
    pub fn target_duty(self, targets: &[u8; 4]) -> u8 {
        targets[self as usize]
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl uDisplay for SpeedTier {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uDisplay::fmt(&self.as_u8(), f)
    }
}
