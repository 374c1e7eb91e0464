//! Staging rows that fill up before a tile moves to the wall.

use serde::Serialize;

use crate::Color;

/// A single pattern line: stages tiles of one color until `capacity` are held.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PatternLine {
    capacity: u8,
    color: Option<Color>, // None => empty; Some(c) => all tiles are c
    count: u8,            // 0..=capacity
}

impl PatternLine {
    pub const fn new(capacity: u8) -> Self {
        PatternLine {
            capacity,
            color: None,
            count: 0,
        }
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    pub fn remaining(&self) -> u8 {
        self.capacity - self.count
    }

    /// Whether `color` may be staged here (ignoring the wall)
    pub fn holds_compatible(&self, color: Color) -> bool {
        match self.color {
            None => true,
            Some(c) => c == color,
        }
    }

    /// Stage up to `n` tiles of `color` and return how many did not fit.
    ///
    /// The caller checks `holds_compatible` first.
    pub(crate) fn fill(&mut self, color: Color, n: usize) -> usize {
        debug_assert!(self.holds_compatible(color));
        let placed = n.min(self.remaining() as usize);
        if placed > 0 {
            self.color = Some(color);
            self.count += placed as u8;
        }
        n - placed
    }

    /// Empty the line, returning what it held
    pub(crate) fn drain(&mut self) -> Option<(Color, u8)> {
        let held = self.color.map(|c| (c, self.count));
        self.color = None;
        self.count = 0;
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_reports_overflow() {
        let mut line = PatternLine::new(3);
        assert_eq!(line.fill(Color::Red, 2), 0);
        assert_eq!(line.count(), 2);
        assert!(!line.is_full());

        assert_eq!(line.fill(Color::Red, 4), 3);
        assert!(line.is_full());
        assert_eq!(line.color(), Some(Color::Red));
    }

    #[test]
    fn test_compatibility() {
        let mut line = PatternLine::new(2);
        assert!(line.holds_compatible(Color::Blue));
        line.fill(Color::Black, 1);
        assert!(line.holds_compatible(Color::Black));
        assert!(!line.holds_compatible(Color::Blue));
    }

    #[test]
    fn test_fill_into_full_line_keeps_everything_out() {
        let mut line = PatternLine::new(1);
        line.fill(Color::Teal, 1);
        assert_eq!(line.fill(Color::Teal, 2), 2);
        assert_eq!(line.count(), 1);
    }

    #[test]
    fn test_drain_resets() {
        let mut line = PatternLine::new(4);
        line.fill(Color::Yellow, 4);
        assert_eq!(line.drain(), Some((Color::Yellow, 4)));
        assert!(line.is_empty());
        assert_eq!(line.color(), None);
        assert_eq!(line.drain(), None);
    }
}
