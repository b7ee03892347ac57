use heapless::Vec;
use qiyana_common::hid_ids::{keyboard_led, report_id};

use crate::{config::Timing, debug, info, report::MAX_PAYLOAD_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    NotMounted,
    Mounted,
    Suspended,
}

/// Something the USB stack told us about the link.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    Mount,
    Unmount,
    Suspend,
    Resume,
    /// An output report from the host, id prefix removed.
    OutputState {
        report_id: u8,
        payload: Vec<u8, MAX_PAYLOAD_LEN>,
    },
}

impl LinkEvent {
    pub fn output_state(report_id: u8, data: &[u8]) -> Self {
        let mut payload = Vec::new();
        let len = data.len().min(MAX_PAYLOAD_LEN);
        let _ = payload.extend_from_slice(&data[..len]);
        LinkEvent::OutputState { report_id, payload }
    }
}

/// Link power state and the indicator blink rate derived from it.
///
/// While the host has Caps Lock on the indicator is held solid and `blink_interval` stays 0
/// whatever the link does, until the host clears it or the link unmounts.
pub struct Link {
    timing: Timing,
    state: LinkState,
    caps_lock: bool,
    blink_interval: u32,
}

impl Link {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            state: LinkState::NotMounted,
            caps_lock: false,
            blink_interval: timing.blink_interval(LinkState::NotMounted),
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Indicator toggle period in ms; 0 holds the indicator solid.
    pub fn blink_interval(&self) -> u32 {
        self.blink_interval
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Apply `event`. `is_mounted` is asked only on resume. Returns the level the indicator must be
    /// forced to, if any.
    pub fn handle(&mut self, event: &LinkEvent, is_mounted: impl FnOnce() -> bool) -> Option<bool> {
        match event {
            LinkEvent::Mount => self.enter(LinkState::Mounted),
            LinkEvent::Unmount => {
                // no host is left to clear it
                let released = core::mem::replace(&mut self.caps_lock, false);
                self.enter(LinkState::NotMounted);
                if released {
                    return Some(false);
                }
            }
            LinkEvent::Suspend => self.enter(LinkState::Suspended),
            LinkEvent::Resume => {
                if self.state == LinkState::Suspended {
                    self.enter(if is_mounted() {
                        LinkState::Mounted
                    } else {
                        LinkState::NotMounted
                    });
                }
            }
            LinkEvent::OutputState { report_id, payload } => {
                return self.on_output_state(*report_id, payload);
            }
        }
        None
    }

    pub fn on_output_state(&mut self, id: u8, payload: &[u8]) -> Option<bool> {
        if id != report_id::KEYBOARD {
            return None;
        }
        let leds = *payload.first()?;
        let caps_lock = leds & keyboard_led::CAPS_LOCK != 0;
        if caps_lock == self.caps_lock {
            return None;
        }
        self.caps_lock = caps_lock;
        if caps_lock {
            self.blink_interval = 0;
        } else {
            self.blink_interval = self.timing.blink_interval(self.state);
        }
        info!("caps lock {}", caps_lock);
        Some(caps_lock)
    }

    fn enter(&mut self, state: LinkState) {
        if self.state != state {
            debug!("link {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        if !self.caps_lock {
            self.blink_interval = self.timing.blink_interval(state);
        }
    }
}

#[cfg(test)]
#[path = "link_test.rs"]
mod test;
