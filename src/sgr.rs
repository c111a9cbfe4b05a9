//! Select Graphic Rendition resolver
//!
//! Applies an SGR parameter run to the current attribute, left to right.
//! Color selections are resolved against the session palette immediately,
//! so cells only ever hold RGB values. Unknown codes are skipped in every
//! mode; SGR is the one command family where forward compatibility beats
//! validation, since new styling codes appear in the wild all the time.
//! Omitted parameters count as 0, the ANSI default.

use crate::core::color::{Palette, Rgb};
use crate::core::Attribute;
use crate::parser::Params;

const RESET: u16 = 0;
const BOLD: u16 = 1;
const NO_BOLD: u16 = 21;
const NO_BOLD_FAINT: u16 = 22;
const UNDERLINE: u16 = 4;
const NO_UNDERLINE: u16 = 24;
const INVERSE: u16 = 7;
const NO_INVERSE: u16 = 27;
const EXTENDED_FG: u16 = 38;
const DEFAULT_FG: u16 = 39;
const EXTENDED_BG: u16 = 48;
const DEFAULT_BG: u16 = 49;

/// Mode selector following 38/48
const MODE_INDEXED: u16 = 5;
const MODE_RGB: u16 = 2;

/// Apply an SGR parameter run to `current`, producing the new attribute.
/// An empty run is a reset.
pub fn apply(params: &Params, current: Attribute, palette: Palette) -> Attribute {
    if params.is_empty() {
        return Attribute::default();
    }
    let mut attr = current;
    let mut i = 0;
    while i < params.len() {
        let p = params.get_or(i, 0);
        match p {
            RESET => attr.reset(),
            BOLD => attr.bold = true,
            NO_BOLD | NO_BOLD_FAINT => attr.bold = false,
            UNDERLINE => attr.underline = true,
            NO_UNDERLINE => attr.underline = false,
            INVERSE => attr.inverse = true,
            NO_INVERSE => attr.inverse = false,
            DEFAULT_FG => attr.fg = None,
            DEFAULT_BG => attr.bg = None,
            30..=37 => attr.fg = palette.base(p - 30, false),
            40..=47 => attr.bg = palette.base(p - 40, false),
            90..=97 => attr.fg = palette.base(p - 90, true),
            100..=107 => attr.bg = palette.base(p - 100, true),
            EXTENDED_FG | EXTENDED_BG => {
                let (resolved, consumed) = extended_color(params, i, palette);
                if let Some(color) = resolved {
                    if p == EXTENDED_FG {
                        attr.fg = color;
                    } else {
                        attr.bg = color;
                    }
                }
                i += consumed;
                continue;
            }
            // Unknown codes (blink, italic, fonts, ...) are dropped
            _ => {}
        }
        i += 1;
    }
    attr
}

/// Resolve an extended color selector starting at the 38/48 at index `i`.
///
/// Returns the color to assign (`None` leaves the attribute untouched)
/// and the number of parameters consumed, selector included. A selector
/// with insufficient trailing parameters consumes what is present and
/// assigns nothing; it never reads past the end of the run.
fn extended_color(params: &Params, i: usize, palette: Palette) -> (Option<Option<Rgb>>, usize) {
    let Some(mode) = params.get(i + 1) else {
        // No usable mode selector: skip the 38/48 and the slot after it
        return (None, 2);
    };
    match mode {
        MODE_INDEXED => match params.get(i + 2) {
            // An out-of-range index resolves to the default color
            Some(index) => (Some(palette.indexed(index)), 3),
            None => (None, params.len() - i),
        },
        MODE_RGB => {
            if i + 4 >= params.len() {
                return (None, params.len() - i);
            }
            let channel = |offset: usize| params.get_or(i + offset, 0).min(255) as u8;
            let rgb = Rgb::new(channel(2), channel(3), channel(4));
            (Some(Some(rgb)), 5)
        }
        // Unknown mode: drop the selector, reprocess the rest normally
        _ => (None, 2),
    }
}
