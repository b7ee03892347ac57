//! The pin driver seam between the matrix scanner and the board.
//!
//! Boards implement [`RawPins`], the bare primitives of their GPIO block. [`GuardedPins`] pairs
//! those primitives with a [`ReadStrategy`] and is what the scanner talks to, through
//! [`MatrixPins`]. The scanner never knows which strategy is in use.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Pin operations needed to scan a matrix. Pins are addressed by GPIO number.
pub trait MatrixPins {
    fn configure(&mut self, pin: u8, direction: Direction, pull: Pull);

    fn write(&mut self, pin: u8, high: bool);

    /// Sample an input pin, applying whatever sequence the silicon needs for the value to be
    /// trustworthy.
    fn guarded_read(&mut self, pin: u8) -> bool;

    /// Called after a column is driven high and before its rows are sampled.
    fn settle(&mut self) {}
}

/// GPIO primitives of a board.
pub trait RawPins {
    fn configure(&mut self, pin: u8, direction: Direction, pull: Pull);

    fn write(&mut self, pin: u8, high: bool);

    fn read(&mut self, pin: u8) -> bool;

    /// Connect or disconnect the pad's input buffer.
    fn set_input_enabled(&mut self, pin: u8, enabled: bool);

    fn settle(&mut self) {}
}

/// How a single input sample is taken.
pub trait ReadStrategy {
    fn sample<P: RawPins>(&self, pins: &mut P, pin: u8) -> bool;
}

/// Plain read, for silicon whose pull-downs behave.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectRead;

impl ReadStrategy for DirectRead {
    #[inline]
    fn sample<P: RawPins>(&self, pins: &mut P, pin: u8) -> bool {
        pins.read(pin)
    }
}

/// Read for RP2350 pads affected by erratum E9.
///
/// A pad left with its input buffer enabled and the internal pull-down active can latch high. The
/// buffer is enabled just for the sample and disabled again straight after, which clears the latch
/// before every read.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReArmedRead;

impl ReadStrategy for ReArmedRead {
    #[inline]
    fn sample<P: RawPins>(&self, pins: &mut P, pin: u8) -> bool {
        pins.set_input_enabled(pin, true);
        let level = pins.read(pin);
        pins.set_input_enabled(pin, false);
        level
    }
}

pub struct GuardedPins<P: RawPins, S: ReadStrategy> {
    pins: P,
    strategy: S,
}

impl<P: RawPins, S: ReadStrategy> GuardedPins<P, S> {
    pub fn new(pins: P, strategy: S) -> Self {
        Self { pins, strategy }
    }

    pub fn inner(&self) -> &P {
        &self.pins
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn into_inner(self) -> P {
        self.pins
    }
}

impl<P: RawPins, S: ReadStrategy> MatrixPins for GuardedPins<P, S> {
    fn configure(&mut self, pin: u8, direction: Direction, pull: Pull) {
        self.pins.configure(pin, direction, pull);
    }

    fn write(&mut self, pin: u8, high: bool) {
        self.pins.write(pin, high);
    }

    fn guarded_read(&mut self, pin: u8) -> bool {
        self.strategy.sample(&mut self.pins, pin)
    }

    fn settle(&mut self) {
        self.pins.settle();
    }
}

#[cfg(test)]
#[path = "pins_test.rs"]
mod test;
