//! Glue between the embassy-usb tasks and the control loop.
//!
//! The USB device, report writer and output report reader run as their own tasks. They only touch
//! the control loop's world through a [`UsbLink`]: a one slot report channel, a completion
//! channel, a link event channel and a few flags. The control loop drains the channels at the top
//! of each iteration.

use core::sync::atomic::{AtomicBool, Ordering};
use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, TrySendError},
    signal::Signal,
};
use embassy_usb::{
    class::hid::{ReportId, RequestHandler},
    control::OutResponse,
    Handler,
};

use crate::{
    debug, info,
    link::LinkEvent,
    report::{Report, ReportType},
    scheduler::Transport,
    warn,
};

pub const COMPLETION_QUEUE_LEN: usize = 4;
pub const EVENT_QUEUE_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReport {
    pub report_type: ReportType,
    pub payload: Report,
}

pub struct UsbLink<M: RawMutex> {
    reports: Channel<M, OutgoingReport, 1>,
    completions: Channel<M, ReportType, COMPLETION_QUEUE_LEN>,
    events: Channel<M, LinkEvent, EVENT_QUEUE_LEN>,
    wakeup: Signal<M, ()>,
    mounted: AtomicBool,
    suspended: AtomicBool,
    remote_wakeup_enabled: AtomicBool,
}

impl<M: RawMutex> Default for UsbLink<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> UsbLink<M> {
    pub const fn new() -> Self {
        Self {
            reports: Channel::new(),
            completions: Channel::new(),
            events: Channel::new(),
            wakeup: Signal::new(),
            mounted: AtomicBool::new(false),
            suspended: AtomicBool::new(false),
            remote_wakeup_enabled: AtomicBool::new(false),
        }
    }

    pub fn transport(&self) -> UsbTransport<'_, M> {
        UsbTransport { link: self }
    }

    pub fn device_handler(&self) -> UsbLinkHandler<'_, M> {
        UsbLinkHandler { link: self }
    }

    pub fn output_handler(&self) -> OutputReportHandler<'_, M> {
        OutputReportHandler { link: self }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Acquire)
    }

    pub fn remote_wakeup_enabled(&self) -> bool {
        self.remote_wakeup_enabled.load(Ordering::Acquire)
    }

    pub fn try_event(&self) -> Option<LinkEvent> {
        self.events.try_receive().ok()
    }

    pub fn try_completion(&self) -> Option<ReportType> {
        self.completions.try_receive().ok()
    }

    pub async fn next_report(&self) -> OutgoingReport {
        self.reports.receive().await
    }

    /// Tell the control loop a report of `report_type` has gone out.
    pub fn complete(&self, report_type: ReportType) {
        if self.completions.try_send(report_type).is_err() {
            warn!("completion queue full; dropped {:?}", report_type);
        }
    }

    pub fn post_event(&self, event: LinkEvent) {
        if let Err(TrySendError::Full(event)) = self.events.try_send(event) {
            warn!("link event queue full; dropped {:?}", event);
        }
    }

    pub async fn wait_wakeup(&self) {
        self.wakeup.wait().await;
    }

    pub fn reset_wakeup(&self) {
        self.wakeup.reset();
    }
}

/// [`Transport`] over a [`UsbLink`].
pub struct UsbTransport<'a, M: RawMutex> {
    link: &'a UsbLink<M>,
}

impl<M: RawMutex> Transport for UsbTransport<'_, M> {
    fn is_ready(&mut self, _report_type: ReportType) -> bool {
        self.link.is_mounted() && !self.link.is_suspended() && !self.link.reports.is_full()
    }

    fn send(&mut self, report_type: ReportType, payload: &[u8]) -> bool {
        self.link
            .reports
            .try_send(OutgoingReport {
                report_type,
                payload: Report::from_slice(payload),
            })
            .is_ok()
    }

    fn is_suspended(&self) -> bool {
        self.link.is_suspended()
    }

    fn is_mounted(&self) -> bool {
        self.link.is_mounted()
    }

    fn request_remote_wakeup(&mut self) {
        if self.link.remote_wakeup_enabled() {
            self.link.wakeup.signal(());
        } else {
            debug!("host has not enabled remote wakeup");
        }
    }
}

/// Device level callbacks turned into [`LinkEvent`]s.
pub struct UsbLinkHandler<'a, M: RawMutex> {
    link: &'a UsbLink<M>,
}

impl<M: RawMutex> UsbLinkHandler<'_, M> {
    fn set_suspended(&self, suspended: bool) {
        if self.link.suspended.swap(suspended, Ordering::AcqRel) != suspended {
            self.link.post_event(if suspended {
                LinkEvent::Suspend
            } else {
                LinkEvent::Resume
            });
        }
    }

    fn set_mounted(&self, mounted: bool) {
        if self.link.mounted.swap(mounted, Ordering::AcqRel) != mounted {
            self.link.post_event(if mounted {
                LinkEvent::Mount
            } else {
                LinkEvent::Unmount
            });
        }
    }
}

impl<M: RawMutex> Handler for UsbLinkHandler<'_, M> {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.set_suspended(false);
            self.set_mounted(false);
        }
    }

    /// A reset ends any suspend. Resume is posted before Unmount so the link leaves `Suspended`
    /// even if the device was never configured.
    fn reset(&mut self) {
        self.set_suspended(false);
        self.set_mounted(false);
    }

    fn configured(&mut self, configured: bool) {
        info!("USB configured: {}", configured);
        self.set_mounted(configured);
    }

    fn suspended(&mut self, suspended: bool) {
        self.set_suspended(suspended);
    }

    fn remote_wakeup_enabled(&mut self, enabled: bool) {
        debug!("remote wakeup enabled: {}", enabled);
        self.link
            .remote_wakeup_enabled
            .store(enabled, Ordering::Release);
    }
}

/// Host output reports, from either the control pipe or the interrupt OUT endpoint.
pub struct OutputReportHandler<'a, M: RawMutex> {
    link: &'a UsbLink<M>,
}

impl<M: RawMutex> RequestHandler for OutputReportHandler<'_, M> {
    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        match id {
            ReportId::Out(id) => {
                self.link.post_event(LinkEvent::output_state(id, data));
                OutResponse::Accepted
            }
            _ => OutResponse::Rejected,
        }
    }

    fn set_idle_ms(&mut self, id: Option<ReportId>, dur: u32) {
        debug!("Set idle rate for {:?} to {:?}", id, dur);
    }
}

#[cfg(test)]
#[path = "usb_link_test.rs"]
mod test;
