//! Shared-state fake pins for host tests.
//!
//! `embedded-hal-mock` pins verify exact transaction sequences, which suits
//! the transmitter's level playback but not a matrix scan whose read
//! pattern depends on timing. The fakes here model the electrical behavior
//! instead: a [`FakeMatrix`] knows which contacts are closed and which row
//! is currently driven low, and its column pins read accordingly.

use crate::sleep::DeepStop;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use std::rc::Rc;
use std::vec::Vec;

const MAX_DIM: usize = 8;

/// The electrical state of a key matrix plus pin handles into it.
pub(crate) struct FakeMatrix<const ROWS: usize, const COLS: usize> {
    pressed: Rc<RefCell<[[bool; MAX_DIM]; MAX_DIM]>>,
    rows_low: Rc<RefCell<[bool; MAX_DIM]>>,
    active_row: Rc<Cell<Option<usize>>>,
}

impl<const ROWS: usize, const COLS: usize> FakeMatrix<ROWS, COLS> {
    pub(crate) fn new() -> Self {
        assert!(ROWS <= MAX_DIM && COLS <= MAX_DIM);
        Self {
            pressed: Rc::new(RefCell::new([[false; MAX_DIM]; MAX_DIM])),
            rows_low: Rc::new(RefCell::new([false; MAX_DIM])),
            active_row: Rc::new(Cell::new(None)),
        }
    }

    /// Closes the contact at (row, col).
    pub(crate) fn press(&self, row: usize, col: usize) {
        self.pressed.borrow_mut()[row][col] = true;
    }

    /// Opens the contact at (row, col).
    pub(crate) fn release(&self, row: usize, col: usize) {
        self.pressed.borrow_mut()[row][col] = false;
    }

    /// How many row outputs are currently driven low.
    pub(crate) fn driven_low_rows(&self) -> usize {
        self.rows_low.borrow()[..ROWS].iter().filter(|&&low| low).count()
    }

    pub(crate) fn row_pins(&self) -> [RowPin; ROWS] {
        core::array::from_fn(|index| RowPin {
            index,
            rows_low: Rc::clone(&self.rows_low),
            active_row: Rc::clone(&self.active_row),
        })
    }

    pub(crate) fn col_pins(&self) -> [ColPin; COLS] {
        core::array::from_fn(|index| ColPin {
            index,
            pressed: Rc::clone(&self.pressed),
            active_row: Rc::clone(&self.active_row),
        })
    }
}

/// A row driver: remembers its level and which row is active-low.
#[derive(Debug)]
pub(crate) struct RowPin {
    index: usize,
    rows_low: Rc<RefCell<[bool; MAX_DIM]>>,
    active_row: Rc<Cell<Option<usize>>>,
}

impl ErrorType for RowPin {
    type Error = Infallible;
}

impl OutputPin for RowPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.rows_low.borrow_mut()[self.index] = true;
        self.active_row.set(Some(self.index));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.rows_low.borrow_mut()[self.index] = false;
        if self.active_row.get() == Some(self.index) {
            self.active_row.set(None);
        }
        Ok(())
    }
}

/// A column sense line: low when the active row holds a closed contact.
#[derive(Debug)]
pub(crate) struct ColPin {
    index: usize,
    pressed: Rc<RefCell<[[bool; MAX_DIM]; MAX_DIM]>>,
    active_row: Rc<Cell<Option<usize>>>,
}

impl ErrorType for ColPin {
    type Error = Infallible;
}

impl InputPin for ColPin {
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(match self.active_row.get() {
            Some(row) => self.pressed.borrow()[row][self.index],
            None => false,
        })
    }

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }
}

/// An output pin that latches its last driven level.
#[derive(Debug)]
pub(crate) struct LatchPin {
    level: Rc<Cell<bool>>,
}

impl LatchPin {
    /// Returns the pin and a handle observing its level.
    pub(crate) fn new() -> (Self, Rc<Cell<bool>>) {
        let level = Rc::new(Cell::new(false));
        (
            Self {
                level: Rc::clone(&level),
            },
            level,
        )
    }
}

impl ErrorType for LatchPin {
    type Error = Infallible;
}

impl OutputPin for LatchPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        Ok(())
    }
}

/// An output pin that records every driven level, high as `true`.
#[derive(Debug)]
pub(crate) struct RecordPin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl RecordPin {
    /// Returns the pin and a handle to the recorded levels.
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<bool>>>) {
        let levels = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                levels: Rc::clone(&levels),
            },
            levels,
        )
    }
}

impl ErrorType for RecordPin {
    type Error = Infallible;
}

impl OutputPin for RecordPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

/// Counts deep-stop entries instead of halting.
#[derive(Debug, Default)]
pub(crate) struct StopSpy {
    entries: usize,
}

impl StopSpy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn count(&self) -> usize {
        self.entries
    }
}

impl DeepStop for StopSpy {
    fn enter(&mut self) {
        self.entries += 1;
    }
}
