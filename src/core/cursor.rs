//! Cursor state
//!
//! The cursor tracks a zero-based position and one saved slot for the
//! save/restore commands. Coordinates never go negative; movements clamp
//! at zero via saturating arithmetic.

use serde::{Deserialize, Serialize};

/// Cursor position with one saved slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column, zero-based
    pub x: usize,
    /// Row, zero-based
    pub y: usize,
    saved: (usize, usize),
}

impl Cursor {
    /// Create a cursor at the home position
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current position into the saved slot
    pub fn save(&mut self) {
        self.saved = (self.x, self.y);
    }

    /// Restore the position from the saved slot
    pub fn restore(&mut self) {
        let (x, y) = self.saved;
        self.x = x;
        self.y = y;
    }

    /// Saved position
    pub fn saved(&self) -> (usize, usize) {
        self.saved
    }

    /// Move up by `n` rows, stopping at row 0
    pub fn up(&mut self, n: usize) {
        self.y = self.y.saturating_sub(n);
    }

    /// Move down by `n` rows
    pub fn down(&mut self, n: usize) {
        self.y = self.y.saturating_add(n);
    }

    /// Move forward by `n` columns
    pub fn forward(&mut self, n: usize) {
        self.x = self.x.saturating_add(n);
    }

    /// Move back by `n` columns, stopping at column 0
    pub fn back(&mut self, n: usize) {
        self.x = self.x.saturating_sub(n);
    }

    /// Jump to an absolute column
    pub fn column(&mut self, x: usize) {
        self.x = x;
    }

    /// Jump to an absolute position
    pub fn move_to(&mut self, x: usize, y: usize) {
        self.x = x;
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_home() {
        let cursor = Cursor::new();
        assert_eq!((cursor.x, cursor.y), (0, 0));
    }

    #[test]
    fn test_movement_clamps_at_zero() {
        let mut cursor = Cursor::new();
        cursor.up(5);
        cursor.back(5);
        assert_eq!((cursor.x, cursor.y), (0, 0));

        cursor.down(3);
        cursor.forward(2);
        assert_eq!((cursor.x, cursor.y), (2, 3));

        cursor.up(10);
        cursor.back(10);
        assert_eq!((cursor.x, cursor.y), (0, 0));
    }

    #[test]
    fn test_save_restore() {
        let mut cursor = Cursor::new();
        cursor.move_to(4, 7);
        cursor.save();
        cursor.move_to(0, 0);
        cursor.restore();
        assert_eq!((cursor.x, cursor.y), (4, 7));
    }

    #[test]
    fn test_saved_slot_persists() {
        let mut cursor = Cursor::new();
        cursor.move_to(2, 2);
        cursor.save();
        cursor.move_to(9, 9);
        cursor.down(1);
        cursor.forward(1);
        assert_eq!(cursor.saved(), (2, 2));
    }
}
