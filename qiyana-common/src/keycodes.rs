pub mod key_range {
    pub const NONE: u16 = 0;

    pub const BASIC_MIN: u16 = 0x4;
    pub const BASIC_A: u16 = 0x4;
    pub const BASIC_1: u16 = 0x1e;
    pub const BASIC_0: u16 = 0x27;
    pub const BASIC_MAX: u16 = 0xfe;
    pub const MODIFIER_MIN: u16 = 0xe0;
    pub const MODIFIER_MAX: u16 = 0xe7;
    pub const CONSUMER_MIN: u16 = 0x100;
    pub const CONSUMER_MAX: u16 = 0x3a0;
}

/// A logical key identity, as stored in the key map and the key event queue.
///
/// The value is opaque to the scanner; only the report encoders look at the ranges in
/// [`key_range`]. `KeyCode::NONE` marks unused matrix cells and terminates the key queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const NONE: KeyCode = KeyCode(key_range::NONE);

    pub const A: KeyCode = KeyCode(0x04);
    pub const B: KeyCode = KeyCode(0x05);
    pub const C: KeyCode = KeyCode(0x06);
    pub const D: KeyCode = KeyCode(0x07);
    pub const E: KeyCode = KeyCode(0x08);
    pub const F: KeyCode = KeyCode(0x09);
    pub const G: KeyCode = KeyCode(0x0a);
    pub const H: KeyCode = KeyCode(0x0b);
    pub const I: KeyCode = KeyCode(0x0c);
    pub const J: KeyCode = KeyCode(0x0d);
    pub const K: KeyCode = KeyCode(0x0e);
    pub const L: KeyCode = KeyCode(0x0f);
    pub const M: KeyCode = KeyCode(0x10);
    pub const N: KeyCode = KeyCode(0x11);
    pub const O: KeyCode = KeyCode(0x12);
    pub const P: KeyCode = KeyCode(0x13);
    pub const Q: KeyCode = KeyCode(0x14);
    pub const R: KeyCode = KeyCode(0x15);
    pub const S: KeyCode = KeyCode(0x16);
    pub const T: KeyCode = KeyCode(0x17);
    pub const U: KeyCode = KeyCode(0x18);
    pub const V: KeyCode = KeyCode(0x19);
    pub const W: KeyCode = KeyCode(0x1a);
    pub const X: KeyCode = KeyCode(0x1b);
    pub const Y: KeyCode = KeyCode(0x1c);
    pub const Z: KeyCode = KeyCode(0x1d);

    pub const N1: KeyCode = KeyCode(0x1e);
    pub const N2: KeyCode = KeyCode(0x1f);
    pub const N3: KeyCode = KeyCode(0x20);
    pub const N4: KeyCode = KeyCode(0x21);
    pub const N5: KeyCode = KeyCode(0x22);
    pub const N6: KeyCode = KeyCode(0x23);
    pub const N7: KeyCode = KeyCode(0x24);
    pub const N8: KeyCode = KeyCode(0x25);
    pub const N9: KeyCode = KeyCode(0x26);
    pub const N0: KeyCode = KeyCode(0x27);

    pub const ENTER: KeyCode = KeyCode(0x28);
    pub const ESCAPE: KeyCode = KeyCode(0x29);
    pub const BACKSPACE: KeyCode = KeyCode(0x2a);
    pub const TAB: KeyCode = KeyCode(0x2b);
    pub const SPACE: KeyCode = KeyCode(0x2c);
    pub const MINUS: KeyCode = KeyCode(0x2d);
    pub const EQUAL: KeyCode = KeyCode(0x2e);
    pub const LEFT_BRACE: KeyCode = KeyCode(0x2f);
    pub const RIGHT_BRACE: KeyCode = KeyCode(0x30);
    pub const BACKSLASH: KeyCode = KeyCode(0x31);
    pub const SEMICOLON: KeyCode = KeyCode(0x33);
    pub const APOSTROPHE: KeyCode = KeyCode(0x34);
    pub const GRAVE: KeyCode = KeyCode(0x35);
    pub const COMMA: KeyCode = KeyCode(0x36);
    pub const DOT: KeyCode = KeyCode(0x37);
    pub const SLASH: KeyCode = KeyCode(0x38);
    pub const CAPS_LOCK: KeyCode = KeyCode(0x39);

    pub const F1: KeyCode = KeyCode(0x3a);
    pub const F2: KeyCode = KeyCode(0x3b);
    pub const F3: KeyCode = KeyCode(0x3c);
    pub const F4: KeyCode = KeyCode(0x3d);
    pub const F5: KeyCode = KeyCode(0x3e);
    pub const F6: KeyCode = KeyCode(0x3f);
    pub const F7: KeyCode = KeyCode(0x40);
    pub const F8: KeyCode = KeyCode(0x41);
    pub const F9: KeyCode = KeyCode(0x42);
    pub const F10: KeyCode = KeyCode(0x43);
    pub const F11: KeyCode = KeyCode(0x44);
    pub const F12: KeyCode = KeyCode(0x45);

    pub const PRINT_SCREEN: KeyCode = KeyCode(0x46);
    pub const SCROLL_LOCK: KeyCode = KeyCode(0x47);
    pub const PAUSE: KeyCode = KeyCode(0x48);
    pub const INSERT: KeyCode = KeyCode(0x49);
    pub const HOME: KeyCode = KeyCode(0x4a);
    pub const PAGE_UP: KeyCode = KeyCode(0x4b);
    pub const DELETE: KeyCode = KeyCode(0x4c);
    pub const END: KeyCode = KeyCode(0x4d);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x4e);
    pub const RIGHT: KeyCode = KeyCode(0x4f);
    pub const LEFT: KeyCode = KeyCode(0x50);
    pub const DOWN: KeyCode = KeyCode(0x51);
    pub const UP: KeyCode = KeyCode(0x52);
    pub const NUM_LOCK: KeyCode = KeyCode(0x53);
    pub const KP_SLASH: KeyCode = KeyCode(0x54);
    pub const KP_ASTERISK: KeyCode = KeyCode(0x55);
    pub const KP_MINUS: KeyCode = KeyCode(0x56);
    pub const KP_PLUS: KeyCode = KeyCode(0x57);
    pub const KP_ENTER: KeyCode = KeyCode(0x58);
    pub const KP_1: KeyCode = KeyCode(0x59);
    pub const KP_2: KeyCode = KeyCode(0x5a);
    pub const KP_3: KeyCode = KeyCode(0x5b);
    pub const KP_4: KeyCode = KeyCode(0x5c);
    pub const KP_5: KeyCode = KeyCode(0x5d);
    pub const KP_6: KeyCode = KeyCode(0x5e);
    pub const KP_7: KeyCode = KeyCode(0x5f);
    pub const KP_8: KeyCode = KeyCode(0x60);
    pub const KP_9: KeyCode = KeyCode(0x61);
    pub const KP_0: KeyCode = KeyCode(0x62);
    pub const KP_DOT: KeyCode = KeyCode(0x63);
    pub const NON_US_BACKSLASH: KeyCode = KeyCode(0x64);
    pub const APPLICATION: KeyCode = KeyCode(0x65);

    pub const LEFT_CTRL: KeyCode = KeyCode(0xe0);
    pub const LEFT_SHIFT: KeyCode = KeyCode(0xe1);
    pub const LEFT_ALT: KeyCode = KeyCode(0xe2);
    pub const LEFT_GUI: KeyCode = KeyCode(0xe3);
    pub const RIGHT_CTRL: KeyCode = KeyCode(0xe4);
    pub const RIGHT_SHIFT: KeyCode = KeyCode(0xe5);
    pub const RIGHT_ALT: KeyCode = KeyCode(0xe6);
    pub const RIGHT_GUI: KeyCode = KeyCode(0xe7);

    pub const MEDIA_NEXT: KeyCode = KeyCode::consumer(0xb5);
    pub const MEDIA_PREV: KeyCode = KeyCode::consumer(0xb6);
    pub const MEDIA_STOP: KeyCode = KeyCode::consumer(0xb7);
    pub const MEDIA_PLAY_PAUSE: KeyCode = KeyCode::consumer(0xcd);
    pub const MUTE: KeyCode = KeyCode::consumer(0xe2);
    pub const VOLUME_UP: KeyCode = KeyCode::consumer(0xe9);
    pub const VOLUME_DOWN: KeyCode = KeyCode::consumer(0xea);

    /// Key code for a consumer page usage.
    pub const fn consumer(usage: u16) -> KeyCode {
        KeyCode(key_range::CONSUMER_MIN + usage)
    }

    pub const fn is_none(self) -> bool {
        self.0 == key_range::NONE
    }

    pub const fn is_modifier(self) -> bool {
        self.0 >= key_range::MODIFIER_MIN && self.0 <= key_range::MODIFIER_MAX
    }

    /// A key that occupies a slot of the boot keyboard report.
    pub const fn is_basic(self) -> bool {
        self.0 >= key_range::BASIC_MIN && self.0 <= key_range::BASIC_MAX && !self.is_modifier()
    }

    pub const fn is_consumer(self) -> bool {
        self.0 >= key_range::CONSUMER_MIN && self.0 <= key_range::CONSUMER_MAX
    }

    /// Bit of the keyboard report modifier byte, if this is a modifier key.
    pub const fn modifier_bit(self) -> Option<u8> {
        if self.is_modifier() {
            Some(1 << (self.0 - key_range::MODIFIER_MIN))
        } else {
            None
        }
    }

    /// Consumer page usage id, if this is a consumer control key.
    pub const fn consumer_usage(self) -> Option<u16> {
        if self.is_consumer() {
            Some(self.0 - key_range::CONSUMER_MIN)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "keycodes_test.rs"]
mod test;
