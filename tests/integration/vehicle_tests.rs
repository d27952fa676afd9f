//! Whole-vehicle scenarios.

use crate::mock_hw::{Event, Rig};
use powerwheels::config::SETTLE_DELAY_US;
use powerwheels::{Config, Gear, Profile, SpeedTier};

fn geared() -> Rig {
    Rig::new(Config::new(Profile::DUAL_GEAR))
}

#[test]
fn setup_zeroes_outputs_then_enables_controller() {
    let rig = geared();
    assert_eq!(
        rig.journal.events(),
        [
            Event::Forward(0),
            Event::Reverse(0),
            Event::Enable(0),
            Event::Enable(1),
        ]
    );
    assert_eq!(rig.vehicle.diagnostics().lines(), ["Ready! (dual-gear)"]);
}

#[test]
fn tier_two_ramps_from_starting_duty_and_holds() {
    let mut rig = geared();
    rig.controls.speed(SpeedTier::Two);
    rig.controls.gear(Gear::LowForward);
    rig.controls.press();

    let duties: Vec<u8> = (0..40).map(|_| rig.cycle().duty).collect();

    // The first engaged cycle lands on 100 and takes one 5-step.
    let expected: Vec<u8> = (1..=23).map(|k| 100 + 5 * k).collect();
    assert_eq!(&duties[..23], &expected[..]);
    assert_eq!(duties[22], 215);
    assert!(duties[23..].iter().all(|&d| d == 215));
    assert!(duties.iter().all(|&d| d <= 215 + 4));
}

#[test]
fn releasing_mid_ramp_cuts_both_channels() {
    let mut rig = geared();
    rig.controls.speed(SpeedTier::Three);
    rig.controls.gear(Gear::HighForward);
    rig.controls.press();
    for _ in 0..10 {
        rig.cycle();
    }
    assert_eq!(rig.duty(), 150);

    rig.controls.release();
    rig.journal.take();
    let s = rig.cycle();

    assert_eq!(s.duty, 0);
    assert!(!s.engagement.active);
    assert_eq!(rig.journal.levels().last(), Some(&(0, 0)));
}

#[test]
fn reverse_zeroes_forward_before_driving() {
    let mut rig = geared();
    rig.controls.speed(SpeedTier::Three);
    rig.controls.gear(Gear::Reverse);
    rig.controls.press();
    for _ in 0..19 {
        rig.cycle();
    }

    rig.journal.take();
    let s = rig.cycle();
    assert_eq!(s.gear, Gear::Reverse);
    assert_eq!(s.duty, 200);
    assert_eq!(
        rig.journal.events(),
        [
            Event::Forward(0),
            Event::Settle(SETTLE_DELAY_US),
            Event::Reverse(200),
            Event::Pace(Profile::DUAL_GEAR.cycle_period_ms),
        ]
    );
}

#[test]
fn shifting_under_load_never_overlaps_channels() {
    let mut rig = geared();
    rig.controls.speed(SpeedTier::Three);
    rig.controls.press();

    let script = [
        Gear::LowForward,
        Gear::Reverse,
        Gear::HighForward,
        Gear::Reverse,
        Gear::Neutral,
        Gear::LowForward,
    ];
    for gear in script {
        rig.controls.gear(gear);
        for _ in 0..8 {
            rig.cycle();
        }
    }

    for (forward, reverse) in rig.journal.levels() {
        assert!(forward == 0 || reverse == 0, "both legs driven: {forward} / {reverse}");
    }
}

#[test]
fn neutral_gear_keeps_motor_off_with_pedal_down() {
    let mut rig = geared();
    rig.controls.speed(SpeedTier::Three);
    rig.controls.gear(Gear::Neutral);
    rig.controls.press();

    for _ in 0..5 {
        let s = rig.cycle();
        assert_eq!(s.duty, 0);
        assert!(!s.engagement.active);
    }
    assert!(rig.journal.levels().iter().all(|&l| l == (0, 0)));
}

#[test]
fn downshift_drops_in_one_cycle() {
    let mut rig = geared();
    rig.controls.speed(SpeedTier::Three);
    rig.controls.gear(Gear::LowForward);
    rig.controls.press();
    while rig.duty() < 255 {
        rig.cycle();
    }

    rig.controls.speed(SpeedTier::One);
    assert_eq!(rig.cycle().duty, 175);
}

#[test]
fn single_direction_board_never_drives_reverse() {
    let mut rig = Rig::new(Config::new(Profile::SINGLE_DIRECTION));
    // Gear lines are not wired on this board; asserting them changes nothing.
    rig.controls.gear(Gear::Reverse);
    rig.controls.speed(SpeedTier::One);
    rig.controls.press();

    for _ in 0..30 {
        let s = rig.cycle();
        assert_eq!(s.gear, Gear::LowForward);
    }
    assert_eq!(rig.duty(), 175);
    assert!(rig.journal.levels().iter().all(|&(_, reverse)| reverse == 0));
    assert!(rig
        .journal
        .events()
        .contains(&Event::Pace(Profile::SINGLE_DIRECTION.cycle_period_ms)));
}

#[test]
fn every_cycle_writes_one_report_line() {
    let mut rig = Rig::new(Config::default());
    rig.controls.speed(SpeedTier::Two);
    rig.cycle();
    rig.controls.pedal_raw(512);
    rig.cycle();

    let serial = rig.vehicle.diagnostics();
    assert_eq!(
        serial.lines(),
        [
            "Ready! (single-direction)",
            "Accelerator Inactive... Speed: 2, Gear: 1, Accelerating: 0, Duty Cycle: 0",
            "Accelerator Voltage: 2.50, Speed: 2, Gear: 1, Accelerating: 1, Duty Cycle: 105",
        ]
    );
}

#[test]
fn debounced_selector_waits_for_stable_reads() {
    let mut rig = Rig::new(Config::new(Profile::SINGLE_DIRECTION).with_debounce(3));
    rig.controls.speed(SpeedTier::Three);
    rig.controls.press();

    assert_eq!(rig.cycle().tier, SpeedTier::Neutral);
    assert_eq!(rig.cycle().tier, SpeedTier::Neutral);
    assert_eq!(rig.cycle().tier, SpeedTier::Three);
}
