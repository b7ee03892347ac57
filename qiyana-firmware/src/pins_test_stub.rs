extern crate std;

use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin};
use std::vec::Vec;

use crate::pins::{Direction, Pull, RawPins};

pub const PIN_COUNT: usize = 48;

/// A switch matrix on a simulated GPIO block.
///
/// A switch connects a column (output) pin to a row (input) pin. When `latching` is set the pads
/// behave like RP2350 pads with erratum E9: an input that is read high while its buffer is enabled
/// stays high until the buffer is disabled.
#[derive(Debug)]
pub struct FakeMatrix {
    pub directions: [Option<(Direction, Pull)>; PIN_COUNT],
    pub levels: [bool; PIN_COUNT],
    pub input_enabled: [bool; PIN_COUNT],
    pub latched: [bool; PIN_COUNT],
    pub latching: bool,
    pub switches: Vec<(u8, u8)>,
    pub reads: usize,
    pub settles: usize,
    pub max_hot_columns: usize,
    pub writes: Vec<(u8, bool)>,
}

impl Default for FakeMatrix {
    fn default() -> Self {
        Self {
            directions: [None; PIN_COUNT],
            levels: [false; PIN_COUNT],
            input_enabled: [true; PIN_COUNT],
            latched: [false; PIN_COUNT],
            latching: false,
            switches: Vec::new(),
            reads: 0,
            settles: 0,
            max_hot_columns: 0,
            writes: Vec::new(),
        }
    }
}

impl FakeMatrix {
    pub fn latching() -> Self {
        Self {
            latching: true,
            ..Self::default()
        }
    }

    pub fn press(&mut self, row_pin: u8, col_pin: u8) {
        if !self.is_pressed(row_pin, col_pin) {
            self.switches.push((row_pin, col_pin));
        }
    }

    pub fn release(&mut self, row_pin: u8, col_pin: u8) {
        self.switches.retain(|&s| s != (row_pin, col_pin));
    }

    pub fn release_all(&mut self) {
        self.switches.clear();
    }

    pub fn is_pressed(&self, row_pin: u8, col_pin: u8) -> bool {
        self.switches.contains(&(row_pin, col_pin))
    }

    fn live_level(&self, pin: u8) -> bool {
        self.switches
            .iter()
            .any(|&(row, col)| row == pin && self.is_driven_high(col))
    }

    fn is_driven_high(&self, pin: u8) -> bool {
        matches!(self.directions[pin as usize], Some((Direction::Output, _)))
            && self.levels[pin as usize]
    }

    fn hot_columns(&self) -> usize {
        (0..PIN_COUNT as u8)
            .filter(|&p| self.is_driven_high(p))
            .count()
    }
}

impl RawPins for FakeMatrix {
    fn configure(&mut self, pin: u8, direction: Direction, pull: Pull) {
        self.directions[pin as usize] = Some((direction, pull));
    }

    fn write(&mut self, pin: u8, high: bool) {
        self.writes.push((pin, high));
        self.levels[pin as usize] = high;
        self.max_hot_columns = self.max_hot_columns.max(self.hot_columns());
    }

    fn read(&mut self, pin: u8) -> bool {
        self.reads += 1;
        let i = pin as usize;
        if !self.input_enabled[i] {
            return false;
        }
        let live = self.live_level(pin);
        if self.latching && live {
            self.latched[i] = true;
        }
        live || self.latched[i]
    }

    fn set_input_enabled(&mut self, pin: u8, enabled: bool) {
        let i = pin as usize;
        self.input_enabled[i] = enabled;
        if !enabled {
            self.latched[i] = false;
        }
    }

    fn settle(&mut self) {
        self.settles += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeLed {
    pub is_on: bool,
    pub toggles: usize,
    pub writes: usize,
}

impl ErrorType for FakeLed {
    type Error = Infallible;
}

impl OutputPin for FakeLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

impl FakeLed {
    fn set(&mut self, on: bool) {
        self.writes += 1;
        if self.is_on != on {
            self.toggles += 1;
        }
        self.is_on = on;
    }
}
