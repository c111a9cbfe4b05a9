//! Color representation and the named 16-slot palettes
//!
//! Colors arrive in three encodings (4-bit slots, 8-bit indices, 24-bit
//! truecolor) and are normalized to RGB before they reach a cell, so the
//! renderer never re-derives palette lookups. The 4-bit slot values were
//! never standardized; each palette here reproduces one historical colorset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channel values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    /// CSS hex notation, `#rrggbb`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// IBM CGA colorset, 1981. Base slots use 0xaa channels, bright slots 0x55/0xff.
const CGA: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00), // black
    Rgb::new(0xaa, 0x00, 0x00), // red
    Rgb::new(0x00, 0xaa, 0x00), // green
    Rgb::new(0xaa, 0x55, 0x00), // brown
    Rgb::new(0x00, 0x00, 0xaa), // blue
    Rgb::new(0xaa, 0x00, 0xaa), // magenta
    Rgb::new(0x00, 0xaa, 0xaa), // cyan
    Rgb::new(0xaa, 0xaa, 0xaa), // light gray
    Rgb::new(0x55, 0x55, 0x55), // dark gray
    Rgb::new(0xff, 0x55, 0x55), // bright red
    Rgb::new(0x55, 0xff, 0x55), // bright green
    Rgb::new(0xff, 0xff, 0x55), // yellow
    Rgb::new(0x55, 0x55, 0xff), // bright blue
    Rgb::new(0xff, 0x55, 0xff), // bright magenta
    Rgb::new(0x55, 0xff, 0xff), // bright cyan
    Rgb::new(0xff, 0xff, 0xff), // white
];

/// xterm colorset from the X Window System
const XTERM: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00), // black
    Rgb::new(0x80, 0x00, 0x00), // maroon
    Rgb::new(0x00, 0x80, 0x00), // green
    Rgb::new(0x80, 0x80, 0x00), // olive
    Rgb::new(0x00, 0x00, 0x80), // navy
    Rgb::new(0x80, 0x00, 0x80), // purple
    Rgb::new(0x00, 0x80, 0x80), // teal
    Rgb::new(0xc0, 0xc0, 0xc0), // silver
    Rgb::new(0x80, 0x80, 0x80), // gray
    Rgb::new(0xff, 0x00, 0x00), // red
    Rgb::new(0x00, 0xff, 0x00), // lime
    Rgb::new(0xff, 0xff, 0x00), // yellow
    Rgb::new(0x00, 0x00, 0xff), // blue
    Rgb::new(0xff, 0x55, 0xff), // fuchsia
    Rgb::new(0x00, 0xff, 0xff), // aqua
    Rgb::new(0xff, 0xff, 0xff), // white
];

/// A named, fixed table mapping 16 logical slots (8 normal + 8 bright)
/// to concrete colors. Read-only for the lifetime of a decode session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Palette {
    /// Color Graphics Adapter colorset defined by IBM for the PC
    #[default]
    Cga,
    /// Xterm terminal emulator colorset
    Xterm,
}

impl Palette {
    fn table(&self) -> &'static [Rgb; 16] {
        match self {
            Palette::Cga => &CGA,
            Palette::Xterm => &XTERM,
        }
    }

    /// Resolve a base color code (0-7); `bright` selects slots 8-15.
    /// Out-of-range codes resolve to `None`.
    pub fn base(&self, code: u16, bright: bool) -> Option<Rgb> {
        if code > 7 {
            return None;
        }
        let index = if bright { code + 8 } else { code } as usize;
        Some(self.table()[index])
    }

    /// Resolve an 8-bit palette index.
    ///
    /// Indices 0-7 and 8-15 use this palette's base and bright slots,
    /// 16-231 the 6x6x6 color cube, 232-255 the 24-step grayscale ramp.
    /// Indices above 255 resolve to `None`.
    pub fn indexed(&self, index: u16) -> Option<Rgb> {
        match index {
            0..=7 => self.base(index, false),
            8..=15 => self.base(index - 8, true),
            16..=231 => {
                let n = index - 16;
                let level = |v: u16| if v == 0 { 0 } else { (55 + v * 40) as u8 };
                Some(Rgb::new(level(n / 36), level((n % 36) / 6), level(n % 6)))
            }
            232..=255 => {
                let gray = (8 + (index - 232) * 10) as u8;
                Some(Rgb::new(gray, gray, gray))
            }
            _ => None,
        }
    }

    /// Bright counterpart of a base-slot color, if the color matches one
    pub fn brighten(&self, color: Rgb) -> Option<Rgb> {
        let table = self.table();
        table[..8]
            .iter()
            .position(|&slot| slot == color)
            .map(|i| table[i + 8])
    }

    /// Session default foreground (slot 7)
    pub fn default_fg(&self) -> Rgb {
        self.table()[7]
    }

    /// Session default background (slot 0)
    pub fn default_bg(&self) -> Rgb {
        self.table()[0]
    }

    /// High-intensity white (slot 15)
    pub fn bright_white(&self) -> Rgb {
        self.table()[15]
    }
}
