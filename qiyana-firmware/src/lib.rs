#![no_std]
pub mod clock;
pub mod config;
pub mod control;
pub mod exec;
pub mod hid;
pub mod indicator;
pub mod key_queue;
pub mod link;
pub mod matrix;
pub mod pins;
pub mod report;
pub mod scheduler;
pub mod usb;
pub mod usb_link;

#[cfg(any(test, feature = "test-utils"))]
pub mod pins_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod time_driver_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod transport_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod usb_test_stub;

#[macro_use]
mod macros;

pub use qiyana_common::keycodes::KeyCode;
