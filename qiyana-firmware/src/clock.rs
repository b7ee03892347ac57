use embassy_time::Instant;

/// Monotonic millisecond time source for the control loop.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod test;
