#![no_std]
pub mod hid_ids;
pub mod keycodes;
