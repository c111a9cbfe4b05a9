//! Screen buffer and cursor engine
//!
//! The screen owns the growable grid and the cursor. Every mutation keeps
//! two invariants: cursor coordinates never go negative, and lines 0
//! through `cursor.y` exist before anything touches them. Rows grow only
//! at the tail.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use super::cell::{Attribute, Cell};
use super::cursor::Cursor;
use super::line::Line;

/// Column count used when none is configured
pub const DEFAULT_WIDTH: usize = 80;

/// Region selector for erase operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// From the cursor to the end of the line or display
    ToEnd,
    /// From the start of the line or display through the cursor
    ToStart,
    /// The whole line or display
    All,
}

/// The output grid under construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    lines: Vec<Line>,
    width: usize,
    cursor: Cursor,
    max_lines: Option<usize>,
}

impl Screen {
    /// Create a screen with one empty line and the cursor at (0,0).
    /// A zero width falls back to [`DEFAULT_WIDTH`].
    pub fn new(width: usize) -> Self {
        Self {
            lines: vec![Line::new()],
            width: if width == 0 { DEFAULT_WIDTH } else { width },
            cursor: Cursor::new(),
            max_lines: None,
        }
    }

    /// Cap the number of rows the grid may grow to. Cursor movement past
    /// the cap clamps to the last permitted row.
    pub fn with_max_lines(width: usize, max_lines: Option<usize>) -> Self {
        let mut screen = Self::new(width);
        screen.max_lines = max_lines.filter(|&n| n > 0);
        screen
    }

    /// Configured column count
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows currently materialized
    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    /// Cursor state
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Line at a row, if materialized
    pub fn line(&self, y: usize) -> Option<&Line> {
        self.lines.get(y)
    }

    /// All materialized lines, top to bottom
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Cell at a position, if written
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.lines.get(y).and_then(|line| line.cell(x))
    }

    /// Plain-text dump, rows joined with newlines
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text());
        }
        out
    }

    /// Clamp the cursor row to the configured cap and materialize every
    /// line up to it
    fn sync(&mut self) {
        if let Some(limit) = self.max_lines {
            let last = limit - 1;
            if self.cursor.y > last {
                self.cursor.y = last;
            }
        }
        while self.lines.len() <= self.cursor.y {
            self.lines.push(Line::new());
        }
    }

    /// Write one character at the cursor and advance, wrapping at the
    /// configured width. Zero-width codepoints attach to the previously
    /// written cell instead of occupying a column; with no preceding cell
    /// on the line they are dropped.
    pub fn write_char(&mut self, c: char, attr: Attribute) {
        self.sync();
        if c.width() == Some(0) {
            if self.cursor.x > 0 {
                let x = self.cursor.x - 1;
                if let Some(cell) = self.lines[self.cursor.y].cell_mut(x) {
                    cell.push_combining(c);
                }
            }
            return;
        }
        let x = self.cursor.x;
        self.lines[self.cursor.y].put(x, Cell::new(c, attr));
        self.cursor.x += 1;
        if self.cursor.x >= self.width {
            self.next_line(1);
        }
    }

    /// Line feed: column 0 of the next row
    pub fn linefeed(&mut self) {
        self.next_line(1);
    }

    /// Move the cursor up `n` rows
    pub fn cursor_up(&mut self, n: usize) {
        self.cursor.up(n);
        self.sync();
    }

    /// Move the cursor down `n` rows
    pub fn cursor_down(&mut self, n: usize) {
        self.cursor.down(n);
        self.sync();
    }

    /// Move the cursor forward `n` columns
    pub fn cursor_forward(&mut self, n: usize) {
        self.cursor.forward(n);
        self.sync();
    }

    /// Move the cursor back `n` columns
    pub fn cursor_back(&mut self, n: usize) {
        self.cursor.back(n);
        self.sync();
    }

    /// Move down `n` rows to column 0
    pub fn next_line(&mut self, n: usize) {
        self.cursor.down(n);
        self.cursor.column(0);
        self.sync();
    }

    /// Move up `n` rows to column 0
    pub fn prev_line(&mut self, n: usize) {
        self.cursor.up(n);
        self.cursor.column(0);
        self.sync();
    }

    /// Jump to an absolute column on the current row
    pub fn cursor_column(&mut self, x: usize) {
        self.cursor.column(x);
        self.sync();
    }

    /// Jump to an absolute position
    pub fn move_to(&mut self, x: usize, y: usize) {
        self.cursor.move_to(x, y);
        self.sync();
    }

    /// Copy the cursor position into the saved slot
    pub fn save_cursor(&mut self) {
        self.cursor.save();
    }

    /// Restore the cursor position from the saved slot
    pub fn restore_cursor(&mut self) {
        self.cursor.restore();
        self.sync();
    }

    /// Erase part of the display relative to the cursor.
    ///
    /// `ToEnd` truncates the current line at the cursor and drops every
    /// line below. `ToStart` blanks everything from the top through the
    /// cursor inclusive. `All` blanks every line and homes the cursor.
    pub fn erase_in_display(&mut self, mode: EraseMode) {
        self.sync();
        let y = self.cursor.y;
        match mode {
            EraseMode::ToEnd => {
                self.lines[y].truncate_at(self.cursor.x);
                self.lines.truncate(y + 1);
            }
            EraseMode::ToStart => {
                for line in &mut self.lines[..y] {
                    line.clear();
                }
                self.lines[y].blank_through(self.cursor.x);
            }
            EraseMode::All => {
                for line in &mut self.lines {
                    line.clear();
                }
                self.cursor.move_to(0, 0);
            }
        }
    }

    /// Erase part of the current line relative to the cursor
    pub fn erase_in_line(&mut self, mode: EraseMode) {
        self.sync();
        let y = self.cursor.y;
        match mode {
            EraseMode::ToEnd => self.lines[y].truncate_at(self.cursor.x),
            EraseMode::ToStart => self.lines[y].blank_through(self.cursor.x),
            EraseMode::All => self.lines[y].clear(),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}
