//! Report ids and LED bits that make up the fixed wire contract with the host.

pub mod report_id {
    pub const KEYBOARD: u8 = 1;
    pub const CONSUMER: u8 = 3;
}

/// Bits of the keyboard LED output report sent by the host.
pub mod keyboard_led {
    pub const NUM_LOCK: u8 = 1 << 0;
    pub const CAPS_LOCK: u8 = 1 << 1;
    pub const SCROLL_LOCK: u8 = 1 << 2;
    pub const COMPOSE: u8 = 1 << 3;
    pub const KANA: u8 = 1 << 4;
}

/// Number of simultaneously reportable keys in a boot keyboard report.
pub const KEYBOARD_KEY_SLOTS: usize = 6;

/// Boot keyboard payload: modifier byte, reserved byte, key slots.
pub const KEYBOARD_PAYLOAD_LEN: usize = 2 + KEYBOARD_KEY_SLOTS;

/// Consumer control payload: one little-endian 16 bit usage.
pub const CONSUMER_PAYLOAD_LEN: usize = 2;
