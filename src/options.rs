//! Per-session decode configuration

use std::fmt;

use crate::charset::Charset;
use crate::core::color::Palette;
use crate::core::screen::DEFAULT_WIDTH;

/// What to do with a ground-state control byte outside the handled set.
///
/// Only consulted in permissive mode; strict mode always surfaces the
/// byte as an error. CP437 artwork places glyphs (card suits, smileys)
/// at control codepoints, which is what [`ControlPolicy::Glyph`] is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlPolicy {
    /// Drop the byte
    #[default]
    Ignore,
    /// Write a blank cell
    Blank,
    /// Decode the byte through the charset like a printable
    Glyph,
}

/// Decode session configuration
pub struct Options {
    /// Column count before implicit wrap; 0 falls back to 80
    pub width: usize,
    /// Abort on malformed input instead of skipping it
    pub strict: bool,
    /// 16-slot color table for 4-bit and low 8-bit codes
    pub palette: Palette,
    /// Legacy byte-to-codepoint mapping; `None` reads the input as UTF-8
    pub charset: Option<Box<dyn Charset>>,
    /// Treatment of stray control bytes in permissive mode
    pub control_bytes: ControlPolicy,
    /// Cap on grid rows; `None` grows without bound
    pub max_lines: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            strict: false,
            palette: Palette::default(),
            charset: None,
            control_bytes: ControlPolicy::default(),
            max_lines: None,
        }
    }
}

impl Options {
    /// Defaults: width 80, permissive, CGA palette, UTF-8 input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column count; 0 restores the default
    pub fn width(mut self, width: usize) -> Self {
        self.width = if width == 0 { DEFAULT_WIDTH } else { width };
        self
    }

    /// Toggle strict mode
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Select the color table
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Inject a legacy charset
    pub fn charset<C: Charset + 'static>(mut self, charset: C) -> Self {
        self.charset = Some(Box::new(charset));
        self
    }

    /// Choose the stray-control-byte treatment
    pub fn control_bytes(mut self, policy: ControlPolicy) -> Self {
        self.control_bytes = policy;
        self
    }

    /// Cap grid growth at `max_lines` rows
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines).filter(|&n| n > 0);
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("width", &self.width)
            .field("strict", &self.strict)
            .field("palette", &self.palette)
            .field("charset", &self.charset.is_some())
            .field("control_bytes", &self.control_bytes)
            .field("max_lines", &self.max_lines)
            .finish()
    }
}
