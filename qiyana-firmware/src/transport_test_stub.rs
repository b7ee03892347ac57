extern crate std;

use std::vec::Vec;

use crate::{report::ReportType, scheduler::Transport};

/// Records everything the scheduler asks of the link.
#[derive(Debug)]
pub struct FakeTransport {
    pub ready: bool,
    pub suspended: bool,
    pub mounted: bool,
    pub refuse_send: bool,
    pub sent: Vec<(ReportType, Vec<u8>)>,
    pub wakeups: usize,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self {
            ready: true,
            suspended: false,
            mounted: true,
            refuse_send: false,
            sent: Vec::new(),
            wakeups: 0,
        }
    }
}

impl FakeTransport {
    pub fn sent_of(&self, report_type: ReportType) -> Vec<Vec<u8>> {
        self.sent
            .iter()
            .filter(|(rt, _)| *rt == report_type)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn take_sent(&mut self) -> Vec<(ReportType, Vec<u8>)> {
        core::mem::take(&mut self.sent)
    }
}

impl Transport for FakeTransport {
    fn is_ready(&mut self, _report_type: ReportType) -> bool {
        self.ready && self.mounted && !self.suspended
    }

    fn send(&mut self, report_type: ReportType, payload: &[u8]) -> bool {
        if self.refuse_send {
            return false;
        }
        self.sent.push((report_type, Vec::from(payload)));
        true
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn request_remote_wakeup(&mut self) {
        self.wakeups += 1;
    }
}
