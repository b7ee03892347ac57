extern crate std;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use std::vec::Vec;

use super::*;
use crate::{
    config::Timing,
    link::{Link as LinkMachine, LinkState},
};

type Link = UsbLink<NoopRawMutex>;

fn events(link: &Link) -> Vec<LinkEvent> {
    core::iter::from_fn(|| link.try_event()).collect()
}

#[test]
fn configured_posts_mount_once() {
    let link = Link::new();
    let mut handler = link.device_handler();

    handler.configured(true);
    handler.configured(true);
    assert!(link.is_mounted());
    assert_eq!(events(&link), [LinkEvent::Mount]);

    handler.configured(false);
    assert!(!link.is_mounted());
    assert_eq!(events(&link), [LinkEvent::Unmount]);
}

#[test]
fn bus_reset_unmounts() {
    let link = Link::new();
    let mut handler = link.device_handler();

    handler.configured(true);
    handler.suspended(true);
    handler.reset();
    assert!(!link.is_mounted());
    assert!(!link.is_suspended());
    assert_eq!(
        events(&link),
        [
            LinkEvent::Mount,
            LinkEvent::Suspend,
            LinkEvent::Resume,
            LinkEvent::Unmount
        ]
    );

    handler.reset();
    handler.enabled(false);
    assert!(events(&link).is_empty());
}

#[test]
fn reset_after_early_suspend_returns_to_not_mounted() {
    let link = Link::new();
    let mut handler = link.device_handler();
    let mut state = LinkMachine::new(Timing::default());

    handler.suspended(true);
    handler.reset();
    assert!(!link.is_suspended());
    assert!(!link.is_mounted());

    for event in events(&link) {
        state.handle(&event, || link.is_mounted());
    }
    assert_eq!(state.state(), LinkState::NotMounted);
    assert_eq!(state.blink_interval(), 250);
}

#[test]
fn disable_ends_suspend() {
    let link = Link::new();
    let mut handler = link.device_handler();

    handler.suspended(true);
    handler.enabled(false);
    assert!(!link.is_suspended());
    assert_eq!(events(&link), [LinkEvent::Suspend, LinkEvent::Resume]);
}

#[test]
fn suspend_and_resume() {
    let link = Link::new();
    let mut handler = link.device_handler();

    handler.suspended(true);
    handler.suspended(true);
    assert!(link.is_suspended());
    handler.suspended(false);
    assert!(!link.is_suspended());
    assert_eq!(events(&link), [LinkEvent::Suspend, LinkEvent::Resume]);
}

#[test]
fn transport_ready_needs_mounted_awake_and_room() {
    let link = Link::new();
    let mut transport = link.transport();
    let mut handler = link.device_handler();

    assert!(!transport.is_ready(ReportType::Keyboard));
    handler.configured(true);
    assert!(transport.is_ready(ReportType::Keyboard));

    handler.suspended(true);
    assert!(transport.is_suspended());
    assert!(!transport.is_ready(ReportType::Keyboard));
    handler.suspended(false);

    assert!(transport.send(ReportType::Consumer, &[0xe9, 0]));
    assert!(!transport.is_ready(ReportType::Keyboard));
    assert!(!transport.send(ReportType::Keyboard, &[0; 8]));

    let report = embassy_futures::block_on(link.next_report());
    assert_eq!(report.report_type, ReportType::Consumer);
    assert_eq!(report.payload.as_slice(), &[0xe9, 0]);
    assert!(transport.is_ready(ReportType::Keyboard));
}

#[test]
fn wakeup_only_when_host_allows_it() {
    let link = Link::new();
    let mut transport = link.transport();
    let mut handler = link.device_handler();

    transport.request_remote_wakeup();
    assert!(!link.wakeup.signaled());

    handler.remote_wakeup_enabled(true);
    transport.request_remote_wakeup();
    assert!(link.wakeup.signaled());

    link.reset_wakeup();
    assert!(!link.wakeup.signaled());
}

#[test]
fn completions_are_drained_in_order() {
    let link = Link::new();
    link.complete(ReportType::Keyboard);
    link.complete(ReportType::Consumer);

    assert_eq!(link.try_completion(), Some(ReportType::Keyboard));
    assert_eq!(link.try_completion(), Some(ReportType::Consumer));
    assert_eq!(link.try_completion(), None);
}

#[test]
fn full_event_queue_drops_newest() {
    let link = Link::new();
    for _ in 0..EVENT_QUEUE_LEN {
        link.post_event(LinkEvent::Suspend);
    }
    link.post_event(LinkEvent::Resume);

    let events = events(&link);
    assert_eq!(events.len(), EVENT_QUEUE_LEN);
    assert!(events.iter().all(|e| *e == LinkEvent::Suspend));
}

#[test]
fn output_report_becomes_event() {
    let link = Link::new();
    let mut handler = link.output_handler();

    assert!(matches!(
        handler.set_report(ReportId::Out(1), &[0x02]),
        OutResponse::Accepted
    ));
    assert!(matches!(
        handler.set_report(ReportId::Feature(1), &[0x02]),
        OutResponse::Rejected
    ));

    assert_eq!(events(&link), [LinkEvent::output_state(1, &[0x02])]);
}
