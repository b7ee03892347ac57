#![no_std]
#![no_main]

#[cfg(not(feature = "defmt"))]
use panic_halt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;

use qiyana_builder::{config::UsbIdentity, matrix::KeyMap, KeyCode as K};

// USB config
const IDENTITY: UsbIdentity = UsbIdentity {
    manufacturer: "Qiyana",
    product: "Qiyana 6x17",
    serial_number: "qiyana:0001",
    max_power: 100,
    ..UsbIdentity::new(0x6e0f, 0x0003)
};

#[rustfmt::skip]
const KEY_MAP: KeyMap<6, 17> = KeyMap::from_rows([
    [K::A, K::S, K::D, K::F, K::G, K::H, K::J, K::K, K::L, K::SEMICOLON, K::APOSTROPHE, K::ENTER,
        K::CAPS_LOCK, K::MEDIA_PREV, K::MEDIA_NEXT, K::NONE, K::NONE],
    [K::ESCAPE, K::F1, K::F2, K::F3, K::F4, K::F5, K::F6, K::F7, K::F8, K::F9, K::F10, K::F11,
        K::F12, K::PRINT_SCREEN, K::SCROLL_LOCK, K::PAUSE, K::MUTE],
    [K::GRAVE, K::N1, K::N2, K::N3, K::N4, K::N5, K::N6, K::N7, K::N8, K::N9, K::N0, K::MINUS,
        K::EQUAL, K::BACKSPACE, K::INSERT, K::HOME, K::PAGE_UP],
    [K::TAB, K::Q, K::W, K::E, K::R, K::T, K::Y, K::U, K::I, K::O, K::P, K::LEFT_BRACE,
        K::RIGHT_BRACE, K::BACKSLASH, K::DELETE, K::END, K::PAGE_DOWN],
    [K::LEFT_SHIFT, K::Z, K::X, K::C, K::V, K::B, K::N, K::M, K::COMMA, K::DOT, K::SLASH,
        K::RIGHT_SHIFT, K::NONE, K::NONE, K::VOLUME_DOWN, K::UP, K::VOLUME_UP],
    [K::LEFT_CTRL, K::LEFT_GUI, K::LEFT_ALT, K::SPACE, K::NONE, K::NONE, K::NONE, K::NONE,
        K::NONE, K::RIGHT_ALT, K::RIGHT_GUI, K::APPLICATION, K::RIGHT_CTRL, K::MEDIA_PLAY_PAUSE,
        K::LEFT, K::DOWN, K::RIGHT],
]);

// GPIO numbers, not package pins
qiyana_builder::rp_run_keyboard! {
    identity: IDENTITY,
    rows: [PIN_17, PIN_18, PIN_19, PIN_20, PIN_21, PIN_22],
    columns: [PIN_0, PIN_1, PIN_2, PIN_3, PIN_4, PIN_5, PIN_6, PIN_7, PIN_8,
        PIN_9, PIN_10, PIN_11, PIN_12, PIN_13, PIN_14, PIN_15, PIN_16],
    led: PIN_25,
    key_map: KEY_MAP,
}
