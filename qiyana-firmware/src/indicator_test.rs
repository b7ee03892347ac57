use super::*;
use crate::pins_test_stub::FakeLed;

#[test]
fn blinks_at_interval() {
    let mut indicator = Indicator::new();
    let mut led = FakeLed::default();

    for now in 0..250 {
        indicator.tick(now, 250, &mut led);
    }
    assert_eq!(led.toggles, 0);

    indicator.tick(250, 250, &mut led);
    assert!(led.is_on);
    assert!(indicator.is_on());

    for now in 251..1000 {
        indicator.tick(now, 250, &mut led);
    }
    assert_eq!(led.toggles, 3);
    indicator.tick(1000, 250, &mut led);
    assert_eq!(led.toggles, 4);
    assert!(!led.is_on);
}

#[test]
fn late_tick_keeps_cadence() {
    let mut indicator = Indicator::new();
    let mut led = FakeLed::default();

    indicator.tick(0, 1000, &mut led);
    indicator.tick(1300, 1000, &mut led);
    assert_eq!(led.toggles, 1);
    // the next toggle is due at 2000, not 2300
    indicator.tick(2000, 1000, &mut led);
    assert_eq!(led.toggles, 2);
}

#[test]
fn first_tick_starts_cycle() {
    let mut indicator = Indicator::new();
    let mut led = FakeLed::default();

    indicator.tick(50_000, 250, &mut led);
    indicator.tick(50_001, 250, &mut led);
    assert_eq!(led.toggles, 0);
    indicator.tick(50_250, 250, &mut led);
    assert_eq!(led.toggles, 1);
}

#[test]
fn zero_interval_is_solid() {
    let mut indicator = Indicator::new();
    let mut led = FakeLed::default();

    indicator.solid(true, &mut led);
    for now in 0..5000 {
        indicator.tick(now, 0, &mut led);
    }
    assert!(led.is_on);
    assert_eq!(led.toggles, 1);
}

#[test]
fn blinking_resumes_after_solid() {
    let mut indicator = Indicator::new();
    let mut led = FakeLed::default();

    indicator.solid(true, &mut led);
    for now in 0..3000 {
        indicator.tick(now, 0, &mut led);
    }
    indicator.solid(false, &mut led);
    assert!(!led.is_on);

    indicator.tick(3000, 1000, &mut led);
    indicator.tick(3999, 1000, &mut led);
    assert!(!led.is_on);
    indicator.tick(4000, 1000, &mut led);
    assert!(led.is_on);
}
