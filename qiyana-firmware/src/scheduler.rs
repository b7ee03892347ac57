use crate::{
    debug,
    key_queue::KeyQueue,
    report::{Report, ReportType},
};

/// The link the scheduler sends reports over.
pub trait Transport {
    /// Can a report of `report_type` be accepted right now.
    fn is_ready(&mut self, report_type: ReportType) -> bool;

    /// Queue `payload` for transmission. Completion comes back later through
    /// [`ReportScheduler::on_send_complete`]. Returns false if the transport refused it.
    fn send(&mut self, report_type: ReportType, payload: &[u8]) -> bool;

    fn is_suspended(&self) -> bool;

    fn is_mounted(&self) -> bool;

    fn request_remote_wakeup(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chain {
    Idle,
    Sending(ReportType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offer {
    Sent,
    NotReady,
    Nothing,
}

#[derive(Debug, Default, Clone)]
struct ReportState {
    has_active_key: bool,
    last_sent: Report,
}

pub struct ReportScheduler {
    period_ms: u64,
    next_due: Option<u64>,
    chain: Chain,
    states: [ReportState; ReportType::COUNT],
}

impl ReportScheduler {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            next_due: None,
            chain: Chain::Idle,
            states: Default::default(),
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn has_active_key(&self, report_type: ReportType) -> bool {
        self.states[report_type.index()].has_active_key
    }

    /// Forget what the host was last told, so the current key set is sent again.
    pub fn reset(&mut self) {
        self.states = Default::default();
        self.chain = Chain::Idle;
    }

    /// Run the primary send if a period boundary has been reached. Each boundary that fires
    /// moves the deadline on by exactly one period.
    pub fn tick<T: Transport, const N: usize>(
        &mut self,
        now_ms: u64,
        queue: &KeyQueue<N>,
        transport: &mut T,
    ) {
        match self.next_due {
            Some(due) if now_ms < due => return,
            Some(due) => self.next_due = Some(due + self.period_ms),
            None => self.next_due = Some(now_ms + self.period_ms),
        }

        if transport.is_suspended() {
            if !queue.is_empty() {
                debug!("key down while suspended; requesting wakeup");
                transport.request_remote_wakeup();
            }
            return;
        }

        self.run_chain(Some(ReportType::FIRST), queue, transport);
    }

    /// The transport finished sending a report of `report_type`.
    pub fn on_send_complete<T: Transport, const N: usize>(
        &mut self,
        report_type: ReportType,
        queue: &KeyQueue<N>,
        transport: &mut T,
    ) {
        match self.chain {
            Chain::Sending(in_flight) if in_flight == report_type => {
                self.run_chain(report_type.next(), queue, transport);
            }
            chain => debug!("ignoring completion of {:?} in {:?}", report_type, chain),
        }
    }

    fn run_chain<T: Transport, const N: usize>(
        &mut self,
        mut next: Option<ReportType>,
        queue: &KeyQueue<N>,
        transport: &mut T,
    ) {
        while let Some(report_type) = next {
            match self.offer(report_type, queue, transport) {
                Offer::Sent => {
                    self.chain = Chain::Sending(report_type);
                    return;
                }
                Offer::NotReady => break,
                Offer::Nothing => next = report_type.next(),
            }
        }
        self.chain = Chain::Idle;
    }

    fn offer<T: Transport, const N: usize>(
        &mut self,
        report_type: ReportType,
        queue: &KeyQueue<N>,
        transport: &mut T,
    ) -> Offer {
        let report = report_type.build(queue);
        let state = &mut self.states[report_type.index()];

        if report.is_empty() {
            if !state.has_active_key {
                return Offer::Nothing;
            }
        } else if state.has_active_key && report == state.last_sent {
            return Offer::Nothing;
        }

        if !transport.is_ready(report_type) || !transport.send(report_type, report.as_slice()) {
            return Offer::NotReady;
        }

        state.has_active_key = !report.is_empty();
        state.last_sent = report;
        Offer::Sent
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod test;
