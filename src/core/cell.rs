//! Grid cell and its style snapshot

use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// Styling attached to a single cell.
///
/// `None` colors mean "inherit the terminal default", not a concrete color.
/// Each written cell captures a copy of the active attribute, so later
/// attribute changes never retroactively alter written cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Foreground color, `None` for the terminal default
    pub fg: Option<Rgb>,
    /// Background color, `None` for the terminal default
    pub bg: Option<Rgb>,
    /// Render with the bright variant of the color family
    pub bold: bool,
    /// Underline text decoration
    pub underline: bool,
    /// Swap effective foreground and background at render time
    pub inverse: bool,
}

impl Attribute {
    /// Reset every field to the terminal default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no field differs from the default
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A single cell in the output grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Display content: one codepoint, plus any combining marks that
    /// were written over it
    pub content: String,
    /// Style snapshot captured when the cell was written
    pub attr: Attribute,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

impl Cell {
    /// Create a cell holding one character
    pub fn new(c: char, attr: Attribute) -> Self {
        Self {
            content: c.to_string(),
            attr,
        }
    }

    /// A space with default attributes, used for padding and erasure
    pub fn blank() -> Self {
        Self {
            content: " ".to_string(),
            attr: Attribute::default(),
        }
    }

    /// Append a combining mark to this cell's content
    pub fn push_combining(&mut self, c: char) {
        self.content.push(c);
    }

    /// Display width of the cell content
    pub fn width(&self) -> usize {
        use unicode_width::UnicodeWidthStr;
        self.content.as_str().width()
    }
}
