//! Debounced key-matrix scanning.
//!
//! The keypad is a classic crossbar: row lines driven as outputs, column
//! lines read through pull-ups, a closed key shorting its row onto its
//! column. The scanner visits one row per scan interval (8 ms): all rows
//! are driven high, the current row is pulled low, and a column reading low
//! means the key at (current row, column) is closed.
//!
//! Each cell runs the three-state debounce machine from the data model:
//! `Released → Debouncing` on the first active reading (stamping the time),
//! `Debouncing → Pressed` once the contact has stayed active for the
//! debounce interval, and back to `Released` immediately on any inactive
//! reading. A contact bounce shorter than the debounce window therefore
//! never reports a press at all.
//!
//! On promotion to `Pressed` the cell's key number is recorded into the
//! caller's [`ActiveKeys`]; on release it is removed again. The scan's
//! summary status (`Released` over `Pressed` over `Debounce`) is what the
//! gesture classifier keys its edge handling on.

use crate::clock::{Duration, Instant};
use crate::consts::Timings;
use crate::gesture::ActiveKeys;
use embedded_hal::digital::{InputPin, OutputPin};

/// Debounce state of a single matrix cell.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum CellState {
    /// Contact open.
    #[default]
    Released,
    /// Contact closed, but not yet for the full debounce interval.
    Debouncing,
    /// Contact closed and debounced.
    Pressed,
}

/// Summary of one matrix scan, for the edge-triggering caller.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ScanStatus {
    /// No debounced edge this scan.
    Debounce,
    /// At least one cell was promoted to pressed.
    Pressed,
    /// At least one cell was released.
    Released,
}

/// The matrix scanner: row drivers, column readers, per-cell debounce.
///
/// ## Type Parameters
///
/// - `RP`: row driver pins ([`OutputPin`])
/// - `CP`: column sense pins ([`InputPin`], active low through pull-ups)
/// - `ROWS`/`COLS`: matrix geometry
#[derive(Debug)]
pub struct MatrixScanner<RP, CP, const ROWS: usize, const COLS: usize>
where
    RP: OutputPin,
    CP: InputPin,
{
    rows: [RP; ROWS],
    cols: [CP; COLS],
    keymap: [[u8; COLS]; ROWS],
    cells: [[CellState; COLS]; ROWS],
    debounced_at: [[Option<Instant>; COLS]; ROWS],
    current_row: usize,
    last_scan: Option<Instant>,
    scan_interval: Duration,
    debounce: Duration,
}

impl<RP, CP, const ROWS: usize, const COLS: usize> MatrixScanner<RP, CP, ROWS, COLS>
where
    RP: OutputPin,
    CP: InputPin,
{
    /// Creates a scanner over the given pins.
    ///
    /// `keymap` assigns each (row, column) cell the key number reported to
    /// the gesture classifier.
    pub fn new(rows: [RP; ROWS], cols: [CP; COLS], keymap: [[u8; COLS]; ROWS], timings: Timings) -> Self {
        Self {
            rows,
            cols,
            keymap,
            cells: [[CellState::Released; COLS]; ROWS],
            debounced_at: [[None; COLS]; ROWS],
            current_row: 0,
            last_scan: None,
            scan_interval: timings.scan_interval,
            debounce: timings.debounce,
        }
    }

    /// Scans the next row if the scan interval has elapsed.
    ///
    /// Returns `None` between scan ticks. Newly pressed and released key
    /// numbers are recorded into `keys` as a side effect.
    pub fn poll(&mut self, now: Instant, keys: &mut ActiveKeys) -> Option<ScanStatus> {
        if let Some(at) = self.last_scan {
            if now.elapsed_since(at) < self.scan_interval {
                return None;
            }
        }
        self.last_scan = Some(now);
        Some(self.scan(now, keys))
    }

    /// State of one cell, mainly for inspection and tests.
    pub fn cell(&self, row: usize, col: usize) -> CellState {
        self.cells[row][col]
    }

    /// Drives every row output low.
    ///
    /// Part of the sleep entry sequence: with all rows low, any key press
    /// pulls its column line low and serves as a wake event.
    pub fn set_rows_low(&mut self) {
        for row in &mut self.rows {
            let _ = row.set_low();
        }
    }

    /// Scans the current row and advances the round-robin.
    fn scan(&mut self, now: Instant, keys: &mut ActiveKeys) -> ScanStatus {
        for row in &mut self.rows {
            let _ = row.set_high();
        }
        let _ = self.rows[self.current_row].set_low();

        let mut active = [false; COLS];
        for (col, pin) in self.cols.iter_mut().enumerate() {
            active[col] = pin.is_low().unwrap_or(false);
        }

        let row = self.current_row;
        let mut status = ScanStatus::Debounce;
        for col in 0..COLS {
            match (active[col], self.cells[row][col]) {
                (true, CellState::Released) => {
                    self.cells[row][col] = CellState::Debouncing;
                    self.debounced_at[row][col] = Some(now);
                }
                (true, CellState::Debouncing) => {
                    let stable = self.debounced_at[row][col]
                        .is_some_and(|since| now.elapsed_since(since) >= self.debounce);
                    if stable {
                        self.cells[row][col] = CellState::Pressed;
                        let _ = keys.insert(self.keymap[row][col]);
                        if status != ScanStatus::Released {
                            status = ScanStatus::Pressed;
                        }
                    }
                }
                (true, CellState::Pressed) => {}
                (false, CellState::Pressed) | (false, CellState::Debouncing) => {
                    self.cells[row][col] = CellState::Released;
                    self.debounced_at[row][col] = None;
                    keys.remove(self.keymap[row][col]);
                    status = ScanStatus::Released;
                }
                (false, CellState::Released) => {}
            }
        }

        self.current_row = (self.current_row + 1) % ROWS;
        status
    }
}
