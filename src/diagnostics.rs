//! One-line-per-cycle serial report. Nothing reads it back.

use ufmt::{uDisplay, uWrite, uwrite, uwriteln, Formatter};

use crate::config::Profile;
use crate::gate::Engagement;
use crate::gear::Gear;
use crate::input::PedalReading;
use crate::speed::SpeedTier;

/// State of one finished cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub tier: SpeedTier,
    pub gear: Gear,
    pub pedal: PedalReading,
    pub engagement: Engagement,
    pub duty: u8,
}

impl uDisplay for Snapshot {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        if !self.engagement.active {
            return uwrite!(
                f,
                "Accelerator Inactive... Speed: {}, Gear: {}, Accelerating: 0, Duty Cycle: {}",
                self.tier,
                self.gear,
                self.duty
            );
        }

        f.write_str("Accelerator Voltage: ")?;
        match self.pedal.voltage() {
            Some(mv) => uwrite!(f, "{}", mv)?,
            None => f.write_str("switch")?,
        }
        uwrite!(
            f,
            ", Speed: {}, Gear: {}, Accelerating: {}, Duty Cycle: {}",
            self.tier,
            self.gear,
            u8::from(self.engagement.active),
            self.duty
        )
    }
}

/// Printed once after setup.
pub fn banner<W: uWrite + ?Sized>(w: &mut W, profile: &Profile) -> Result<(), W::Error> {
    uwriteln!(w, "Ready! ({})", profile.name)
}

pub fn report<W: uWrite + ?Sized>(w: &mut W, snapshot: &Snapshot) -> Result<(), W::Error> {
    uwriteln!(w, "{}", snapshot)
}
