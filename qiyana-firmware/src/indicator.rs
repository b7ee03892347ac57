use embedded_hal::digital::{OutputPin, PinState};

/// Drives the status LED at the link's blink rate.
#[derive(Debug)]
pub struct Indicator {
    last_toggle_ms: u64,
    level: bool,
    /// Take the next tick as the start of a blink cycle.
    resync: bool,
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator {
    pub const fn new() -> Self {
        Self {
            last_toggle_ms: 0,
            level: false,
            resync: true,
        }
    }

    pub fn is_on(&self) -> bool {
        self.level
    }

    /// Toggle the LED once `interval_ms` has elapsed since the last toggle. The toggle timestamp
    /// advances by exactly one interval. An interval of 0 leaves the LED alone.
    pub fn tick<L: OutputPin>(&mut self, now_ms: u64, interval_ms: u32, led: &mut L) {
        if interval_ms == 0 {
            return;
        }
        if self.resync {
            self.resync = false;
            self.last_toggle_ms = now_ms;
            return;
        }
        let interval = u64::from(interval_ms);
        if now_ms.saturating_sub(self.last_toggle_ms) >= interval {
            self.last_toggle_ms += interval;
            self.set(!self.level, led);
        }
    }

    /// Force the LED to `on`. Blinking restarts from the next tick.
    pub fn solid<L: OutputPin>(&mut self, on: bool, led: &mut L) {
        self.set(on, led);
        self.resync = true;
    }

    fn set<L: OutputPin>(&mut self, on: bool, led: &mut L) {
        self.level = on;
        led.set_state(PinState::from(on)).ok();
    }
}

#[cfg(test)]
#[path = "indicator_test.rs"]
mod test;
