//! Accelerator gate: whether propulsion is allowed this cycle.

use crate::config::PedalSense;
use crate::gear::Gear;
use crate::input::PedalReading;

/// Result of one pass through the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engagement {
    /// Pedal pressed with a gear selected.
    pub active: bool,
    /// `active` just went from false to true.
    pub reset: bool,
}

/// Remembers whether the previous cycle was engaged.
#[derive(Debug, Default)]
pub struct AcceleratorGate {
    previous_active: bool,
}

impl AcceleratorGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates the pedal for this cycle. Must be called exactly once per
    /// cycle, since it advances the edge detector.
    pub fn update(&mut self, pedal: PedalReading, sense: PedalSense, gear: Gear) -> Engagement {
        let active = !gear.is_neutral() && pedal.is_pressed(sense);
        let reset = active && !self.previous_active;
        self.previous_active = active;

        Engagement { active, reset }
    }

    pub fn previous_active(&self) -> bool {
        self.previous_active
    }
}
