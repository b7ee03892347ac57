use crate::{
    debug,
    key_queue::KeyQueue,
    pins::{Direction, MatrixPins, Pull},
    KeyCode,
};

/// GPIO numbers of the sense lines (`rows`) and drive lines (`columns`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixTopology<const R: usize, const C: usize> {
    pub rows: [u8; R],
    pub columns: [u8; C],
}

impl<const R: usize, const C: usize> MatrixTopology<R, C> {
    pub const fn new(rows: [u8; R], columns: [u8; C]) -> Self {
        Self { rows, columns }
    }
}

/// Key code of every matrix position. Positions are stored column by column so the linear index
/// of `(row, col)` is `row + col * R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap<const R: usize, const C: usize> {
    codes: [[KeyCode; R]; C],
}

impl<const R: usize, const C: usize> Default for KeyMap<R, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const R: usize, const C: usize> KeyMap<R, C> {
    pub const fn empty() -> Self {
        Self {
            codes: [[KeyCode::NONE; R]; C],
        }
    }

    /// Build from a table written row by row, the way a layout reads on paper.
    pub const fn from_rows(rows: [[KeyCode; C]; R]) -> Self {
        let mut codes = [[KeyCode::NONE; R]; C];
        let mut row = 0;
        while row < R {
            let mut col = 0;
            while col < C {
                codes[col][row] = rows[row][col];
                col += 1;
            }
            row += 1;
        }
        Self { codes }
    }

    /// Build from codes in linear index order. Missing entries are `NONE`; extra entries are
    /// ignored.
    pub fn from_linear(linear: &[KeyCode]) -> Self {
        let mut map = Self::empty();
        for (i, &code) in linear.iter().take(R * C).enumerate() {
            map.codes[i / R][i % R] = code;
        }
        map
    }

    pub fn get(&self, row: usize, col: usize) -> KeyCode {
        if row < R && col < C {
            self.codes[col][row]
        } else {
            KeyCode::NONE
        }
    }

    pub fn get_linear(&self, index: usize) -> KeyCode {
        if R == 0 {
            return KeyCode::NONE;
        }
        self.get(index % R, index / R)
    }

    pub fn set(&mut self, row: usize, col: usize, code: KeyCode) {
        if row < R && col < C {
            self.codes[col][row] = code;
        }
    }

    pub const fn index(row: usize, col: usize) -> usize {
        row + col * R
    }
}

/// Result of one scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanPass {
    Complete,
    /// The queue filled up; the remaining positions were not sampled.
    Truncated,
}

pub struct MatrixScanner<const R: usize, const C: usize> {
    topology: MatrixTopology<R, C>,
    key_map: KeyMap<R, C>,
}

impl<const R: usize, const C: usize> MatrixScanner<R, C> {
    pub fn new(topology: MatrixTopology<R, C>, key_map: KeyMap<R, C>) -> Self {
        Self { topology, key_map }
    }

    pub fn topology(&self) -> &MatrixTopology<R, C> {
        &self.topology
    }

    pub fn key_map(&self) -> &KeyMap<R, C> {
        &self.key_map
    }

    /// Rows become pulled-down inputs; columns become outputs driven low.
    pub fn init<P: MatrixPins>(&self, pins: &mut P) {
        for &row in self.topology.rows.iter() {
            pins.configure(row, Direction::Input, Pull::Down);
        }
        for &col in self.topology.columns.iter() {
            pins.configure(col, Direction::Output, Pull::None);
            pins.write(col, false);
        }
    }

    /// Refill `queue` with the key codes of every active position, column by column.
    ///
    /// At most one column is driven high at any time, including when the pass is cut short by a
    /// full queue.
    pub fn scan<P: MatrixPins, const N: usize>(
        &self,
        pins: &mut P,
        queue: &mut KeyQueue<N>,
    ) -> ScanPass {
        queue.clear();
        for (col, &col_pin) in self.topology.columns.iter().enumerate() {
            pins.write(col_pin, true);
            pins.settle();
            for (row, &row_pin) in self.topology.rows.iter().enumerate() {
                if !pins.guarded_read(row_pin) {
                    continue;
                }
                let code = self.key_map.get(row, col);
                if code.is_none() {
                    continue;
                }
                if queue.push(code).is_err() {
                    pins.write(col_pin, false);
                    debug!("key queue full at row {} col {}", row, col);
                    return ScanPass::Truncated;
                }
            }
            pins.write(col_pin, false);
        }
        ScanPass::Complete
    }
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod test;
