use heapless::Vec;

use crate::KeyCode;

/// Key codes found active in the last scan pass, in scan order.
///
/// The queue is rebuilt on every pass. Reading past the last entry yields [`KeyCode::NONE`] so a
/// consumer can walk it until the sentinel. A full queue has no room for a terminator; its length
/// ends the sequence.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KeyQueue<const N: usize> {
    keys: Vec<KeyCode, N>,
}

impl<const N: usize> KeyQueue<N> {
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Append `code`. A full queue rejects the push and hands the code back.
    pub fn push(&mut self, code: KeyCode) -> Result<(), KeyCode> {
        self.keys.push(code)
    }

    pub fn get(&self, index: usize) -> KeyCode {
        self.keys.get(index).copied().unwrap_or(KeyCode::NONE)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.keys.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }

    pub fn as_slice(&self) -> &[KeyCode] {
        &self.keys
    }
}

#[cfg(test)]
#[path = "key_queue_test.rs"]
mod test;
