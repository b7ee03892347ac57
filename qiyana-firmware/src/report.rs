//! HID report types and the encoders that turn a key queue into report payloads.

use heapless::Vec;
use qiyana_common::hid_ids::{
    report_id, CONSUMER_PAYLOAD_LEN, KEYBOARD_KEY_SLOTS, KEYBOARD_PAYLOAD_LEN,
};

use crate::{key_queue::KeyQueue, KeyCode};

pub const MAX_PAYLOAD_LEN: usize = KEYBOARD_PAYLOAD_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportType {
    Keyboard,
    Consumer,
}

impl ReportType {
    pub const COUNT: usize = 2;

    /// Where every chain starts.
    pub const FIRST: ReportType = ReportType::Keyboard;

    pub const fn report_id(self) -> u8 {
        match self {
            ReportType::Keyboard => report_id::KEYBOARD,
            ReportType::Consumer => report_id::CONSUMER,
        }
    }

    /// The type sent after this one in a chain; `None` ends the chain.
    pub const fn next(self) -> Option<ReportType> {
        match self {
            ReportType::Keyboard => Some(ReportType::Consumer),
            ReportType::Consumer => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            ReportType::Keyboard => 0,
            ReportType::Consumer => 1,
        }
    }

    /// Encode the keys in `queue` as this type's payload.
    pub fn build<const N: usize>(self, queue: &KeyQueue<N>) -> Report {
        match self {
            ReportType::Keyboard => KeyboardReport::from_keys(queue.iter()).into(),
            ReportType::Consumer => ConsumerReport::from_keys(queue.iter()).into(),
        }
    }
}

/// A report payload, without the report id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report(Vec<u8, MAX_PAYLOAD_LEN>);

impl Report {
    pub fn from_slice(payload: &[u8]) -> Self {
        let len = payload.len().min(MAX_PAYLOAD_LEN);
        let mut data = Vec::new();
        // len is bounded by the capacity
        let _ = data.extend_from_slice(&payload[..len]);
        Self(data)
    }

    /// An all-zero payload means no key of this type is active.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// Boot keyboard layout: modifier byte, reserved byte, six key slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardReport {
    pub modifier: u8,
    pub keycodes: [u8; KEYBOARD_KEY_SLOTS],
}

impl KeyboardReport {
    /// Keys past the sixth are dropped. Duplicate codes take one slot.
    pub fn from_keys(keys: impl Iterator<Item = KeyCode>) -> Self {
        let mut report = Self::default();
        let mut used = 0;
        for key in keys {
            if let Some(bit) = key.modifier_bit() {
                report.modifier |= bit;
            } else if key.is_basic() && used < KEYBOARD_KEY_SLOTS {
                let code = key.0 as u8;
                if !report.keycodes[..used].contains(&code) {
                    report.keycodes[used] = code;
                    used += 1;
                }
            }
        }
        report
    }

    pub fn to_bytes(&self) -> [u8; KEYBOARD_PAYLOAD_LEN] {
        let mut bytes = [0; KEYBOARD_PAYLOAD_LEN];
        bytes[0] = self.modifier;
        bytes[2..].copy_from_slice(&self.keycodes);
        bytes
    }
}

impl From<KeyboardReport> for Report {
    fn from(value: KeyboardReport) -> Self {
        Report::from_slice(&value.to_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsumerReport {
    pub usage: u16,
}

impl ConsumerReport {
    /// Takes the first consumer control key; the rest are ignored.
    pub fn from_keys(mut keys: impl Iterator<Item = KeyCode>) -> Self {
        let usage = keys.find_map(|k| k.consumer_usage()).unwrap_or(0);
        Self { usage }
    }

    pub fn to_bytes(&self) -> [u8; CONSUMER_PAYLOAD_LEN] {
        self.usage.to_le_bytes()
    }
}

impl From<ConsumerReport> for Report {
    fn from(value: ConsumerReport) -> Self {
        Report::from_slice(&value.to_bytes())
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod test;
