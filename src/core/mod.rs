//! Grid model: cells, lines, cursor, colors, screen

pub mod cell;
pub mod color;
pub mod cursor;
pub mod line;
pub mod screen;

pub use cell::{Attribute, Cell};
pub use color::{Palette, Rgb};
pub use cursor::Cursor;
pub use line::Line;
pub use screen::{EraseMode, Screen, DEFAULT_WIDTH};
