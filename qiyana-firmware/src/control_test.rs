extern crate std;

use std::{vec, vec::Vec};

use super::*;
use crate::link::LinkState;
use crate::pins::{GuardedPins, ReArmedRead};
use crate::pins_test_stub::{FakeLed, FakeMatrix};
use crate::scheduler::Chain;
use crate::transport_test_stub::FakeTransport;
use crate::KeyCode;

const ROWS: [u8; 6] = [17, 18, 19, 20, 21, 22];
const COLS: [u8; 17] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];

type Pins = GuardedPins<FakeMatrix, ReArmedRead>;

struct Rig {
    control: ControlLoop<6, 17, 16>,
    pins: Pins,
    transport: FakeTransport,
    led: FakeLed,
}

impl Rig {
    fn new() -> Self {
        let mut key_map = KeyMap::empty();
        key_map.set(0, 0, KeyCode::A);
        key_map.set(5, 16, KeyCode::VOLUME_UP);
        let mut rig = Self {
            control: ControlLoop::new(
                MatrixTopology::new(ROWS, COLS),
                key_map,
                Timing::default(),
            ),
            pins: GuardedPins::new(FakeMatrix::latching(), ReArmedRead),
            transport: FakeTransport::default(),
            led: FakeLed::default(),
        };
        rig.control.init(&mut rig.pins, &mut rig.led);
        rig
    }

    fn run(&mut self, from: u64, to: u64) {
        for now in from..to {
            self.control
                .tick(now, &mut self.pins, &mut self.transport, &mut self.led);
            while let Chain::Sending(rt) = self.control.state().scheduler.chain() {
                self.control.on_send_complete(rt, &mut self.transport);
            }
        }
    }

    fn event(&mut self, event: LinkEvent) {
        self.control
            .on_link_event(&event, &self.transport, &mut self.led);
    }
}

#[test]
fn single_key_press_and_release() {
    let mut rig = Rig::new();

    rig.pins.inner_mut().press(ROWS[0], COLS[0]);
    rig.run(0, 15);
    assert_eq!(
        rig.transport.take_sent(),
        vec![(ReportType::Keyboard, vec![0, 0, 4, 0, 0, 0, 0, 0])]
    );

    rig.pins.inner_mut().release(ROWS[0], COLS[0]);
    rig.run(15, 60);
    assert_eq!(
        rig.transport.take_sent(),
        vec![(ReportType::Keyboard, vec![0; 8])]
    );
    assert_eq!(rig.pins.inner().max_hot_columns, 1);
}

#[test]
fn keyboard_and_consumer_in_one_period() {
    let mut rig = Rig::new();

    rig.pins.inner_mut().press(ROWS[0], COLS[0]);
    rig.pins.inner_mut().press(ROWS[5], COLS[16]);
    rig.run(0, 5);
    assert_eq!(
        rig.transport.take_sent(),
        vec![
            (ReportType::Keyboard, vec![0, 0, 4, 0, 0, 0, 0, 0]),
            (ReportType::Consumer, vec![0xe9, 0]),
        ]
    );
    assert_eq!(rig.control.queue().as_slice(), &[KeyCode::A, KeyCode::VOLUME_UP]);
}

#[test]
fn mount_changes_blink_interval_once() {
    let mut rig = Rig::new();
    let mut seen = Vec::new();
    let mut record = |rig: &Rig| {
        let interval = rig.control.state().link.blink_interval();
        if seen.last() != Some(&interval) {
            seen.push(interval);
        }
    };

    record(&rig);
    rig.run(0, 600);
    record(&rig);
    rig.event(LinkEvent::Mount);
    record(&rig);
    rig.run(600, 3000);
    record(&rig);

    assert_eq!(seen, vec![250, 1000]);
    assert_eq!(rig.control.state().link.state(), LinkState::Mounted);
}

#[test]
fn suspended_key_press_wakes_host() {
    let mut rig = Rig::new();
    rig.event(LinkEvent::Mount);
    rig.transport.suspended = true;
    rig.event(LinkEvent::Suspend);
    assert_eq!(rig.control.state().link.blink_interval(), 2500);

    rig.pins.inner_mut().press(ROWS[0], COLS[0]);
    rig.run(0, 5);
    assert_eq!(rig.transport.wakeups, 1);
    assert!(rig.transport.sent.is_empty());

    rig.transport.suspended = false;
    rig.event(LinkEvent::Resume);
    assert_eq!(rig.control.state().link.state(), LinkState::Mounted);
    rig.run(5, 15);
    assert_eq!(rig.transport.sent_of(ReportType::Keyboard).len(), 1);
}

#[test]
fn caps_lock_lights_indicator() {
    let mut rig = Rig::new();
    rig.event(LinkEvent::Mount);
    rig.event(LinkEvent::output_state(1, &[0x02]));
    assert!(rig.led.is_on);

    rig.run(0, 5000);
    assert!(rig.led.is_on);
    assert_eq!(rig.control.state().link.blink_interval(), 0);

    rig.event(LinkEvent::output_state(1, &[0x00]));
    assert!(!rig.led.is_on);
    assert_eq!(rig.control.state().link.blink_interval(), 1000);
}

#[test]
fn unmount_drops_caps_lock_indicator() {
    let mut rig = Rig::new();
    rig.event(LinkEvent::Mount);
    rig.event(LinkEvent::output_state(1, &[0x02]));
    rig.run(0, 100);
    assert!(rig.led.is_on);

    rig.event(LinkEvent::Unmount);
    assert!(!rig.led.is_on);
    assert_eq!(rig.control.state().link.blink_interval(), 250);

    let toggles = rig.led.toggles;
    rig.run(100, 1101);
    assert_eq!(rig.led.toggles - toggles, 4);
}

#[test]
fn remount_resends_held_key() {
    let mut rig = Rig::new();
    rig.pins.inner_mut().press(ROWS[0], COLS[0]);
    rig.run(0, 15);
    assert_eq!(rig.transport.sent.len(), 1);

    rig.event(LinkEvent::Unmount);
    rig.event(LinkEvent::Mount);
    rig.run(15, 25);
    assert_eq!(rig.transport.sent.len(), 2);
}
