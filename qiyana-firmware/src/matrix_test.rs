use super::*;
use crate::pins::{GuardedPins, ReArmedRead};
use crate::pins_test_stub::FakeMatrix;

const ROWS: [u8; 3] = [10, 11, 12];
const COLS: [u8; 2] = [0, 1];

fn scanner() -> MatrixScanner<3, 2> {
    let key_map = KeyMap::from_rows([
        [KeyCode::A, KeyCode::B],
        [KeyCode::C, KeyCode::D],
        [KeyCode::NONE, KeyCode::F],
    ]);
    MatrixScanner::new(MatrixTopology::new(ROWS, COLS), key_map)
}

fn pins() -> GuardedPins<FakeMatrix, ReArmedRead> {
    GuardedPins::new(FakeMatrix::latching(), ReArmedRead)
}

#[test]
fn init_configures_pins() {
    let scanner = scanner();
    let mut pins = pins();
    scanner.init(&mut pins);

    let fake = pins.inner();
    for row in ROWS {
        assert_eq!(
            fake.directions[row as usize],
            Some((Direction::Input, Pull::Down))
        );
    }
    for col in COLS {
        assert_eq!(
            fake.directions[col as usize],
            Some((Direction::Output, Pull::None))
        );
        assert!(!fake.levels[col as usize]);
    }
}

#[test]
fn scan_order_is_column_major() {
    let scanner = scanner();
    let mut pins = pins();
    scanner.init(&mut pins);
    let mut queue = KeyQueue::<8>::new();

    pins.inner_mut().press(12, 1);
    pins.inner_mut().press(10, 0);
    pins.inner_mut().press(11, 0);
    pins.inner_mut().press(10, 1);

    assert_eq!(scanner.scan(&mut pins, &mut queue), ScanPass::Complete);
    assert_eq!(
        queue.as_slice(),
        &[KeyCode::A, KeyCode::C, KeyCode::B, KeyCode::F]
    );
    assert_eq!(queue.get(4), KeyCode::NONE);
    assert_eq!(pins.inner().max_hot_columns, 1);
    assert_eq!(pins.inner().settles, 2);
}

#[test]
fn unmapped_cells_are_skipped() {
    let scanner = scanner();
    let mut pins = pins();
    scanner.init(&mut pins);
    let mut queue = KeyQueue::<8>::new();

    pins.inner_mut().press(12, 0);
    assert_eq!(scanner.scan(&mut pins, &mut queue), ScanPass::Complete);
    assert!(queue.is_empty());
}

#[test]
fn rescan_rebuilds_queue() {
    let scanner = scanner();
    let mut pins = pins();
    scanner.init(&mut pins);
    let mut queue = KeyQueue::<8>::new();

    pins.inner_mut().press(11, 1);
    scanner.scan(&mut pins, &mut queue);
    assert_eq!(queue.as_slice(), &[KeyCode::D]);

    pins.inner_mut().release_all();
    scanner.scan(&mut pins, &mut queue);
    assert!(queue.is_empty());
}

#[test]
fn overflow_truncates_to_scan_prefix() {
    let scanner = scanner();
    let mut pins = pins();
    scanner.init(&mut pins);
    let mut queue = KeyQueue::<1>::new();

    for row in ROWS {
        for col in COLS {
            pins.inner_mut().press(row, col);
        }
    }

    assert_eq!(scanner.scan(&mut pins, &mut queue), ScanPass::Truncated);
    assert!(queue.is_full());
    assert_eq!(queue.as_slice(), &[KeyCode::A]);

    let fake = pins.inner();
    assert_eq!(fake.max_hot_columns, 1);
    // the second column was never driven
    assert!(!fake.writes.contains(&(1, true)));
    for col in COLS {
        assert!(!fake.levels[col as usize]);
    }
}

#[test]
fn exactly_full_is_complete() {
    let scanner = scanner();
    let mut pins = pins();
    scanner.init(&mut pins);
    let mut queue = KeyQueue::<2>::new();

    pins.inner_mut().press(10, 0);
    pins.inner_mut().press(12, 1);
    assert_eq!(scanner.scan(&mut pins, &mut queue), ScanPass::Complete);
    assert_eq!(queue.as_slice(), &[KeyCode::A, KeyCode::F]);
}

#[test]
fn key_map_constructors() {
    let by_rows = KeyMap::<2, 3>::from_rows([
        [KeyCode::A, KeyCode::B, KeyCode::C],
        [KeyCode::D, KeyCode::E, KeyCode::F],
    ]);
    let linear = KeyMap::<2, 3>::from_linear(&[
        KeyCode::A,
        KeyCode::D,
        KeyCode::B,
        KeyCode::E,
        KeyCode::C,
        KeyCode::F,
        KeyCode::Z,
    ]);
    assert_eq!(by_rows, linear);

    assert_eq!(by_rows.get(1, 0), KeyCode::D);
    assert_eq!(by_rows.get_linear(KeyMap::<2, 3>::index(1, 2)), KeyCode::F);
    assert_eq!(by_rows.get(2, 0), KeyCode::NONE);
    assert_eq!(by_rows.get(0, 3), KeyCode::NONE);

    let short = KeyMap::<2, 3>::from_linear(&[KeyCode::A]);
    assert_eq!(short.get(0, 0), KeyCode::A);
    assert_eq!(short.get(1, 2), KeyCode::NONE);

    let mut map = KeyMap::<2, 3>::empty();
    map.set(1, 1, KeyCode::ENTER);
    assert_eq!(map.get_linear(3), KeyCode::ENTER);
}
