#![no_std]

#[cfg(feature = "rp")]
pub mod rp;
pub mod usb;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

pub use embassy_sync::blocking_mutex::raw::NoopRawMutex;
pub use qiyana_firmware::*;
pub use static_cell::StaticCell;
