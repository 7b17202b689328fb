//! A single unbounded tape with one read/write head.
//!
//! Only cells holding a non-blank symbol are stored, so a tape grows in both directions
//! without ever allocating the blank region between or around written cells.

use crate::types::{Direction, Symbol};
use std::collections::HashMap;
use std::fmt;

/// An infinite, bidirectional tape.
///
/// Invariant: no stored cell holds the blank symbol. Writing the blank removes the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    blank: Symbol,
    cells: HashMap<i64, Symbol>,
    head: i64,
}

impl Tape {
    /// Creates a tape whose cells `0..n` hold the characters of `input`, head at 0.
    ///
    /// Characters equal to the blank symbol leave their cell unwritten.
    pub fn new(blank: impl Into<Symbol>, input: &str) -> Self {
        let blank = blank.into();
        let cells = input
            .chars()
            .enumerate()
            .map(|(i, c)| (i as i64, c.to_string()))
            .filter(|(_, symbol)| *symbol != blank)
            .collect();

        Self {
            blank,
            cells,
            head: 0,
        }
    }

    /// Creates an all-blank tape.
    pub fn empty(blank: impl Into<Symbol>) -> Self {
        Self::new(blank, "")
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> &str {
        self.cells.get(&self.head).unwrap_or(&self.blank)
    }

    /// Writes `symbol` under the head. Writing the blank clears the cell.
    pub fn write(&mut self, symbol: &str) {
        if symbol == self.blank {
            self.cells.remove(&self.head);
        } else {
            self.cells.insert(self.head, symbol.to_string());
        }
    }

    /// Moves the head one cell. There are no bounds.
    pub fn move_head(&mut self, direction: Direction) {
        self.head += direction.offset();
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    pub fn blank(&self) -> &str {
        &self.blank
    }

    /// The stored (non-blank) cells.
    pub fn cells(&self) -> &HashMap<i64, Symbol> {
        &self.cells
    }

    /// Number of non-blank cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the leftmost and rightmost written positions, if any cell is written.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let min = *self.cells.keys().min()?;
        let max = *self.cells.keys().max()?;
        Some((min, max))
    }

    /// Returns the symbol stored at `position`, or the blank.
    pub fn symbol_at(&self, position: i64) -> &str {
        self.cells.get(&position).unwrap_or(&self.blank)
    }

    /// Returns the written region from the leftmost to the rightmost non-blank cell,
    /// with blanks inside the region included. An all-blank tape yields an empty string.
    pub fn contents(&self) -> String {
        match self.bounds() {
            Some((min, max)) => (min..=max).map(|i| self.symbol_at(i)).collect(),
            None => String::new(),
        }
    }
}

/// Debug view: every cell from the leftmost to the rightmost of the written cells and the
/// head, the head cell in brackets. An all-blank tape renders as `[<blank>]`.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((min, max)) = self.bounds() else {
            return write!(f, "[{}]", self.blank);
        };

        for i in min.min(self.head)..=max.max(self.head) {
            let symbol = self.symbol_at(i);
            if i == self.head {
                write!(f, "[{}]", symbol)?;
            } else {
                write!(f, " {} ", symbol)?;
            }
        }

        Ok(())
    }
}
