extern crate std;

use embassy_futures::{block_on, yield_now};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use std::vec;

use super::*;
use crate::{
    clock::EmbassyClock,
    config::Timing,
    matrix::{KeyMap, MatrixTopology},
    pins::{GuardedPins, ReArmedRead},
    pins_test_stub::{FakeLed, FakeMatrix},
    report::ReportType,
    scheduler::Transport,
    time_driver_test_stub::set_time,
    usb_test_stub::{MyDriver, MyEndpointIn},
    KeyCode,
};
use embassy_usb::Handler;

type Link = UsbLink<NoopRawMutex>;

#[test]
fn writer_posts_completion_after_write() {
    let link = Link::new();
    let ep_in = MyEndpointIn::default();
    let messages = ep_in.messages.clone();
    let mut writer = KeyboardHidWriter::<'_, MyDriver>::new(ep_in);
    assert!(link.transport().send(ReportType::Consumer, &[0xe9, 0]));

    let result = block_on(select(report_writer_run(&mut writer, &link), async {
        let message = messages.receive().await;
        loop {
            if let Some(report_type) = link.try_completion() {
                return (message, report_type);
            }
            yield_now().await;
        }
    }));

    match result {
        Either::Second((message, report_type)) => {
            assert_eq!(message, vec![3, 0xe9, 0]);
            assert_eq!(report_type, ReportType::Consumer);
        }
        Either::First(_) => unreachable!(),
    }
}

#[test]
fn failed_write_posts_no_completion() {
    let link = Link::new();
    let ep_in = MyEndpointIn {
        fail: true,
        ..MyEndpointIn::default()
    };
    let mut writer = KeyboardHidWriter::<'_, MyDriver>::new(ep_in);
    assert!(link.transport().send(ReportType::Keyboard, &[0; 8]));

    block_on(select(report_writer_run(&mut writer, &link), async {
        for _ in 0..5 {
            yield_now().await;
        }
    }));

    assert_eq!(link.try_completion(), None);
}

struct Board {
    control: ControlLoop<2, 2, 4>,
    pins: GuardedPins<FakeMatrix, ReArmedRead>,
    led: FakeLed,
}

impl Board {
    fn new() -> Self {
        let mut key_map = KeyMap::empty();
        key_map.set(0, 0, KeyCode::A);
        key_map.set(1, 1, KeyCode::VOLUME_UP);
        Self {
            control: ControlLoop::new(MatrixTopology::new([4, 5], [0, 1]), key_map, Timing::default()),
            pins: GuardedPins::new(FakeMatrix::latching(), ReArmedRead),
            led: FakeLed::default(),
        }
    }
}

#[test]
fn control_loop_sends_pressed_key() {
    set_time(1_000_000);
    let link = Link::new();
    link.device_handler().configured(true);
    let mut board = Board::new();
    board.pins.inner_mut().press(4, 0);

    let result = block_on(select(
        control_loop_run(
            &mut board.control,
            &mut board.pins,
            &mut board.led,
            &EmbassyClock,
            &link,
        ),
        link.next_report(),
    ));

    match result {
        Either::Second(report) => {
            assert_eq!(report.report_type, ReportType::Keyboard);
            assert_eq!(report.payload.as_slice(), &[0, 0, 0x04, 0, 0, 0, 0, 0]);
        }
        Either::First(_) => unreachable!(),
    }
}

#[test]
fn control_loop_wakes_suspended_host() {
    set_time(1_000_000);
    let link = Link::new();
    let mut handler = link.device_handler();
    handler.configured(true);
    handler.remote_wakeup_enabled(true);
    handler.suspended(true);
    let mut board = Board::new();
    board.pins.inner_mut().press(5, 1);

    let result = block_on(select(
        control_loop_run(
            &mut board.control,
            &mut board.pins,
            &mut board.led,
            &EmbassyClock,
            &link,
        ),
        link.wait_wakeup(),
    ));

    assert!(matches!(result, Either::Second(())));
    assert!(!link.transport().is_ready(ReportType::Consumer));
    assert_eq!(link.try_completion(), None);
}
