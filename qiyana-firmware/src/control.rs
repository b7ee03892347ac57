use embedded_hal::digital::OutputPin;

use crate::{
    config::Timing,
    indicator::Indicator,
    key_queue::KeyQueue,
    link::{Link, LinkEvent},
    matrix::{KeyMap, MatrixScanner, MatrixTopology, ScanPass},
    pins::MatrixPins,
    report::ReportType,
    scheduler::{ReportScheduler, Transport},
};

/// Everything the control loop mutates between ticks.
pub struct DeviceState {
    pub link: Link,
    pub scheduler: ReportScheduler,
    pub indicator: Indicator,
}

impl DeviceState {
    pub fn new(timing: Timing) -> Self {
        Self {
            link: Link::new(timing),
            scheduler: ReportScheduler::new(timing.report_period_ms),
            indicator: Indicator::new(),
        }
    }

    /// Run the report scheduler and then the indicator.
    pub fn tick<T: Transport, L: OutputPin, const N: usize>(
        &mut self,
        now_ms: u64,
        queue: &KeyQueue<N>,
        transport: &mut T,
        led: &mut L,
    ) {
        self.scheduler.tick(now_ms, queue, transport);
        self.indicator.tick(now_ms, self.link.blink_interval(), led);
    }

    pub fn on_link_event<T: Transport, L: OutputPin>(
        &mut self,
        event: &LinkEvent,
        transport: &T,
        led: &mut L,
    ) {
        if let Some(level) = self.link.handle(event, || transport.is_mounted()) {
            self.indicator.solid(level, led);
        }
        if matches!(event, LinkEvent::Mount | LinkEvent::Unmount) {
            // a freshly configured host knows nothing of held keys
            self.scheduler.reset();
        }
    }
}

/// One iteration: scan the matrix, schedule reports, tick the indicator.
pub struct ControlLoop<const R: usize, const C: usize, const Q: usize> {
    scanner: MatrixScanner<R, C>,
    queue: KeyQueue<Q>,
    state: DeviceState,
}

impl<const R: usize, const C: usize, const Q: usize> ControlLoop<R, C, Q> {
    pub fn new(topology: MatrixTopology<R, C>, key_map: KeyMap<R, C>, timing: Timing) -> Self {
        Self {
            scanner: MatrixScanner::new(topology, key_map),
            queue: KeyQueue::new(),
            state: DeviceState::new(timing),
        }
    }

    pub fn init<P: MatrixPins, L: OutputPin>(&mut self, pins: &mut P, led: &mut L) {
        self.scanner.init(pins);
        led.set_low().ok();
    }

    pub fn tick<P: MatrixPins, T: Transport, L: OutputPin>(
        &mut self,
        now_ms: u64,
        pins: &mut P,
        transport: &mut T,
        led: &mut L,
    ) -> ScanPass {
        let pass = self.scanner.scan(pins, &mut self.queue);
        self.state.tick(now_ms, &self.queue, transport, led);
        pass
    }

    pub fn on_link_event<T: Transport, L: OutputPin>(
        &mut self,
        event: &LinkEvent,
        transport: &T,
        led: &mut L,
    ) {
        self.state.on_link_event(event, transport, led);
    }

    pub fn on_send_complete<T: Transport>(&mut self, report_type: ReportType, transport: &mut T) {
        self.state
            .scheduler
            .on_send_complete(report_type, &self.queue, transport);
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn queue(&self) -> &KeyQueue<Q> {
        &self.queue
    }

    pub fn scanner(&self) -> &MatrixScanner<R, C> {
        &self.scanner
    }
}

#[cfg(test)]
#[path = "control_test.rs"]
mod test;
