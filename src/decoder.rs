//! Decode session
//!
//! A `Decoder` drives the tokenizer over one byte stream, applies each
//! action to the screen, and threads the active attribute through the
//! loop. Bytes can be pushed in chunks or pulled from any `io::Read`;
//! read failures are fatal in both modes. A decoder is exclusive mutable
//! state for exactly one stream; run independent decoders for parallel
//! work.

use std::io::{ErrorKind, Read};

use crate::charset::Charset;
use crate::core::screen::{EraseMode, Screen};
use crate::core::Attribute;
use crate::core::Palette;
use crate::error::{Error, Result};
use crate::options::{ControlPolicy, Options};
use crate::parser::{Action, CsiSequence, Params, Parser};
use crate::sgr;

/// The commands the dispatcher understands, one per CSI final byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsiCommand {
    CursorUp,
    CursorDown,
    CursorForward,
    CursorBack,
    CursorNextLine,
    CursorPrevLine,
    CursorColumn,
    CursorPosition,
    EraseDisplay,
    EraseLine,
    SaveCursor,
    RestoreCursor,
    SelectGraphics,
}

impl CsiCommand {
    fn from_final(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Self::CursorUp),
            b'B' => Some(Self::CursorDown),
            b'C' => Some(Self::CursorForward),
            b'D' => Some(Self::CursorBack),
            b'E' => Some(Self::CursorNextLine),
            b'F' => Some(Self::CursorPrevLine),
            b'G' => Some(Self::CursorColumn),
            b'H' | b'f' => Some(Self::CursorPosition),
            b'J' => Some(Self::EraseDisplay),
            b'K' => Some(Self::EraseLine),
            b's' => Some(Self::SaveCursor),
            b'u' => Some(Self::RestoreCursor),
            b'm' => Some(Self::SelectGraphics),
            _ => None,
        }
    }
}

/// Incremental UTF-8 assembler for the no-charset input path.
/// Invalid sequences produce U+FFFD, one replacement per bad sequence.
#[derive(Debug, Default)]
struct Utf8Collector {
    buf: [u8; 4],
    len: usize,
    need: usize,
}

impl Utf8Collector {
    fn reset(&mut self) {
        self.len = 0;
        self.need = 0;
    }

    fn push(&mut self, byte: u8) -> Option<char> {
        if self.need > 0 {
            if (0x80..=0xbf).contains(&byte) {
                self.buf[self.len] = byte;
                self.len += 1;
                self.need -= 1;
                if self.need > 0 {
                    return None;
                }
                let c = std::str::from_utf8(&self.buf[..self.len])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .unwrap_or('\u{fffd}');
                self.len = 0;
                return Some(c);
            }
            // Broken continuation; the offending byte is swallowed with
            // the sequence it broke
            self.reset();
            return Some('\u{fffd}');
        }
        match byte {
            0x00..=0x7f => Some(char::from(byte)),
            0xc2..=0xdf => self.start(byte, 1),
            0xe0..=0xef => self.start(byte, 2),
            0xf0..=0xf4 => self.start(byte, 3),
            // Stray continuation or invalid leading byte
            _ => Some('\u{fffd}'),
        }
    }

    fn start(&mut self, byte: u8, need: usize) -> Option<char> {
        self.buf[0] = byte;
        self.len = 1;
        self.need = need;
        None
    }
}

/// One decode session over one byte stream
pub struct Decoder {
    parser: Parser,
    screen: Screen,
    attr: Attribute,
    palette: Palette,
    strict: bool,
    charset: Option<Box<dyn Charset>>,
    control_bytes: ControlPolicy,
    utf8: Utf8Collector,
    finished: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Decoder {
    /// Create a session from its configuration
    pub fn new(options: Options) -> Self {
        Self {
            parser: Parser::new(),
            screen: Screen::with_max_lines(options.width, options.max_lines),
            attr: Attribute::default(),
            palette: options.palette,
            strict: options.strict,
            charset: options.charset,
            control_bytes: options.control_bytes,
            utf8: Utf8Collector::default(),
            finished: false,
        }
    }

    /// The session palette
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// The grid built so far
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The active attribute
    pub fn attribute(&self) -> Attribute {
        self.attr
    }

    /// True once the end-of-text sentinel terminated the session
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Finalize the session, handing over the grid
    pub fn finish(self) -> Screen {
        self.screen
    }

    /// Process a chunk of bytes. In permissive mode this never fails;
    /// strict mode aborts on the first anomaly.
    pub fn feed(&mut self, data: &[u8]) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        for action in self.parser.feed(data) {
            self.apply(action)?;
            if self.finished {
                break;
            }
        }
        Ok(())
    }

    /// Decode an entire stream. Read failures propagate immediately
    /// regardless of mode; end of input mid-sequence is benign.
    pub fn read_from<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = [0u8; 4096];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            };
            self.feed(&buf[..n])?;
            if self.finished {
                break;
            }
        }
        Ok(())
    }

    /// Report-or-ignore: strict mode propagates the anomaly, permissive
    /// mode logs it and carries on
    fn anomaly(&self, err: Error) -> Result<()> {
        if self.strict {
            Err(err)
        } else {
            tracing::debug!(%err, "skipping malformed input");
            Ok(())
        }
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Print(byte) => {
                self.print_byte(byte);
                Ok(())
            }
            Action::LineFeed => {
                self.utf8.reset();
                self.screen.linefeed();
                Ok(())
            }
            Action::Control(byte) => self.control(byte),
            Action::UnrecognizedEscape(byte) => self.anomaly(Error::UnknownEscape(byte)),
            Action::Csi(seq) => self.csi(seq),
            Action::Terminate => {
                self.finished = true;
                Ok(())
            }
        }
    }

    fn print_byte(&mut self, byte: u8) {
        match &self.charset {
            Some(charset) => {
                let c = charset.decode(byte);
                self.screen.write_char(c, self.attr);
            }
            None => {
                if let Some(c) = self.utf8.push(byte) {
                    self.screen.write_char(c, self.attr);
                }
            }
        }
    }

    fn control(&mut self, byte: u8) -> Result<()> {
        if self.strict {
            return Err(Error::UnknownControl(byte));
        }
        match self.control_bytes {
            ControlPolicy::Ignore => {
                tracing::debug!(byte, "ignoring control byte");
            }
            ControlPolicy::Blank => self.screen.write_char(' ', self.attr),
            ControlPolicy::Glyph => {
                let c = match &self.charset {
                    Some(charset) => charset.decode(byte),
                    None => char::from(byte),
                };
                self.screen.write_char(c, self.attr);
            }
        }
        Ok(())
    }

    fn csi(&mut self, seq: CsiSequence) -> Result<()> {
        if seq.private {
            // DEC private sequences are discarded in both modes
            tracing::debug!(final_byte = seq.final_byte, "discarding private sequence");
            return Ok(());
        }
        let Some(command) = CsiCommand::from_final(seq.final_byte) else {
            return self.anomaly(Error::UnknownCsi(char::from(seq.final_byte)));
        };
        if seq.params.has_omitted() {
            self.anomaly(Error::MissingParam)?;
        }
        match command {
            CsiCommand::SelectGraphics => {
                self.attr = sgr::apply(&seq.params, self.attr, self.palette);
                Ok(())
            }
            CsiCommand::CursorUp => self.relative_move(&seq.params, "CUU", Screen::cursor_up),
            CsiCommand::CursorDown => self.relative_move(&seq.params, "CUD", Screen::cursor_down),
            CsiCommand::CursorForward => {
                self.relative_move(&seq.params, "CUF", Screen::cursor_forward)
            }
            CsiCommand::CursorBack => self.relative_move(&seq.params, "CUB", Screen::cursor_back),
            CsiCommand::CursorNextLine => self.relative_move(&seq.params, "CNL", Screen::next_line),
            CsiCommand::CursorPrevLine => self.relative_move(&seq.params, "CPL", Screen::prev_line),
            CsiCommand::CursorColumn => self.cursor_column(&seq.params),
            CsiCommand::CursorPosition => self.cursor_position(&seq.params),
            CsiCommand::EraseDisplay => self.erase(&seq.params, "ED", Screen::erase_in_display),
            CsiCommand::EraseLine => self.erase(&seq.params, "EL", Screen::erase_in_line),
            CsiCommand::SaveCursor => self.save_restore(&seq.params, "SCP", Screen::save_cursor),
            CsiCommand::RestoreCursor => {
                self.save_restore(&seq.params, "RCP", Screen::restore_cursor)
            }
        }
    }

    /// Movement commands taking an optional count, default 1
    fn relative_move(
        &mut self,
        params: &Params,
        command: &'static str,
        op: fn(&mut Screen, usize),
    ) -> Result<()> {
        if params.len() > 1 {
            return self.anomaly(Error::ParamCount {
                command,
                expected: "0 or 1",
            });
        }
        op(&mut self.screen, usize::from(params.get_or(0, 1)));
        Ok(())
    }

    /// Cursor horizontal absolute: exactly one 1-based column
    fn cursor_column(&mut self, params: &Params) -> Result<()> {
        if params.len() != 1 {
            return self.anomaly(Error::ParamCount {
                command: "CHA",
                expected: "1",
            });
        }
        let col = usize::from(params.get_or(0, 1));
        self.screen.cursor_column(col.saturating_sub(1));
        Ok(())
    }

    /// Cursor position: no parameters homes, two give 1-based row and
    /// column. A single stray parameter is tolerated permissively as
    /// "row only, column 0".
    fn cursor_position(&mut self, params: &Params) -> Result<()> {
        match params.len() {
            0 => {
                self.screen.move_to(0, 0);
                Ok(())
            }
            2 => {
                let row = usize::from(params.get_or(0, 1));
                let col = usize::from(params.get_or(1, 1));
                self.screen
                    .move_to(col.saturating_sub(1), row.saturating_sub(1));
                Ok(())
            }
            1 => {
                self.anomaly(Error::ParamCount {
                    command: "CUP",
                    expected: "0 or 2",
                })?;
                let row = usize::from(params.get_or(0, 1));
                self.screen.move_to(0, row.saturating_sub(1));
                Ok(())
            }
            _ => self.anomaly(Error::ParamCount {
                command: "CUP",
                expected: "0 or 2",
            }),
        }
    }

    /// Erase commands taking an optional region selector, default 0
    fn erase(
        &mut self,
        params: &Params,
        command: &'static str,
        op: fn(&mut Screen, EraseMode),
    ) -> Result<()> {
        if params.len() > 1 {
            return self.anomaly(Error::ParamCount {
                command,
                expected: "0 or 1",
            });
        }
        let mode = match params.get_or(0, 0) {
            0 => EraseMode::ToEnd,
            1 => EraseMode::ToStart,
            2 => EraseMode::All,
            _ => {
                return self.anomaly(Error::ParamCount {
                    command,
                    expected: "0, 1 or 2",
                })
            }
        };
        op(&mut self.screen, mode);
        Ok(())
    }

    /// Save and restore take no parameters
    fn save_restore(
        &mut self,
        params: &Params,
        command: &'static str,
        op: fn(&mut Screen),
    ) -> Result<()> {
        if !params.is_empty() {
            return self.anomaly(Error::ParamCount {
                command,
                expected: "0",
            });
        }
        op(&mut self.screen);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgb;

    fn decode(input: &[u8]) -> Decoder {
        let mut decoder = Decoder::default();
        decoder.feed(input).expect("permissive decode");
        decoder
    }

    #[test]
    fn test_plain_text() {
        let decoder = decode(b"hello");
        assert_eq!(decoder.screen().to_text(), "hello");
    }

    #[test]
    fn test_linefeed_and_cr() {
        let decoder = decode(b"one\r\ntwo");
        assert_eq!(decoder.screen().to_text(), "one\ntwo");
    }

    #[test]
    fn test_sgr_colors_written_cells() {
        let decoder = decode(b"\x1b[33ma\x1b[0mb");
        let a = decoder.screen().cell(0, 0).unwrap();
        let b = decoder.screen().cell(1, 0).unwrap();
        assert_eq!(a.attr.fg, Some(Rgb::new(0xaa, 0x55, 0x00)));
        assert_eq!(b.attr.fg, None);
    }

    #[test]
    fn test_attribute_copies_do_not_alias() {
        let decoder = decode(b"\x1b[1ma\x1b[22mb");
        assert!(decoder.screen().cell(0, 0).unwrap().attr.bold);
        assert!(!decoder.screen().cell(1, 0).unwrap().attr.bold);
    }

    #[test]
    fn test_cursor_position_places_char() {
        let decoder = decode(b"\x1b[5;10HX");
        assert!(decoder.screen().rows() >= 5);
        assert_eq!(decoder.screen().cell(9, 4).unwrap().content, "X");
    }

    #[test]
    fn test_cursor_position_home() {
        let decoder = decode(b"ab\x1b[HX");
        assert_eq!(decoder.screen().to_text(), "Xb");
    }

    #[test]
    fn test_cursor_position_single_param_tolerated() {
        let decoder = decode(b"\x1b[3HX");
        assert_eq!(decoder.screen().cell(0, 2).unwrap().content, "X");
    }

    #[test]
    fn test_cursor_column_is_one_based() {
        let decoder = decode(b"abc\x1b[2GX");
        assert_eq!(decoder.screen().to_text(), "aXc");
    }

    #[test]
    fn test_relative_moves_clamp() {
        let decoder = decode(b"\x1b[10A\x1b[10DX");
        assert_eq!(decoder.screen().cell(0, 0).unwrap().content, "X");
    }

    #[test]
    fn test_save_restore() {
        let decoder = decode(b"ab\x1b[scd\x1b[uX");
        assert_eq!(decoder.screen().to_text(), "abXd");
    }

    #[test]
    fn test_unknown_csi_is_noop_permissive() {
        let decoder = decode(b"ab\x1b[5Zcd");
        assert_eq!(decoder.screen().to_text(), "abcd");
        assert!(decoder.attribute().is_default());
    }

    #[test]
    fn test_unknown_csi_strict() {
        let mut decoder = Decoder::new(Options::new().strict(true));
        let err = decoder.feed(b"\x1b[5Z").unwrap_err();
        assert!(matches!(err, Error::UnknownCsi('Z')));
    }

    #[test]
    fn test_unknown_escape_strict() {
        let mut decoder = Decoder::new(Options::new().strict(true));
        let err = decoder.feed(b"\x1bM").unwrap_err();
        assert!(matches!(err, Error::UnknownEscape(b'M')));
    }

    #[test]
    fn test_missing_param_strict() {
        let mut decoder = Decoder::new(Options::new().strict(true));
        let err = decoder.feed(b"\x1b[1;;4m").unwrap_err();
        assert!(matches!(err, Error::MissingParam));
    }

    #[test]
    fn test_param_count_strict() {
        let mut decoder = Decoder::new(Options::new().strict(true));
        let err = decoder.feed(b"\x1b[1;2;3A").unwrap_err();
        assert!(matches!(err, Error::ParamCount { command: "CUU", .. }));
    }

    #[test]
    fn test_control_byte_strict() {
        let mut decoder = Decoder::new(Options::new().strict(true));
        let err = decoder.feed(b"\x07").unwrap_err();
        assert!(matches!(err, Error::UnknownControl(0x07)));
    }

    #[test]
    fn test_control_byte_policies() {
        let decoder = decode(b"a\x07b");
        assert_eq!(decoder.screen().to_text(), "ab");

        let mut decoder = Decoder::new(Options::new().control_bytes(ControlPolicy::Blank));
        decoder.feed(b"a\x07b").unwrap();
        assert_eq!(decoder.screen().to_text(), "a b");
    }

    #[test]
    fn test_private_sequence_discarded() {
        let decoder = decode(b"\x1b[?25lX");
        assert_eq!(decoder.screen().to_text(), "X");

        // Discarded even in strict mode
        let mut strict = Decoder::new(Options::new().strict(true));
        strict.feed(b"\x1b[?25lX").unwrap();
        assert_eq!(strict.screen().to_text(), "X");
    }

    #[test]
    fn test_end_of_text_sentinel() {
        let decoder = decode(b"ab\x1acd");
        assert_eq!(decoder.screen().to_text(), "ab");
        assert!(decoder.is_finished());
    }

    #[test]
    fn test_utf8_input() {
        let decoder = decode("héllo → ☃".as_bytes());
        assert_eq!(decoder.screen().to_text(), "héllo → ☃");
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let decoder = decode(b"a\xffb");
        assert_eq!(decoder.screen().to_text(), "a\u{fffd}b");
    }

    #[test]
    fn test_charset_decodes_bytes() {
        use crate::charset::Latin1;
        let mut decoder = Decoder::new(Options::new().charset(Latin1));
        decoder.feed(b"caf\xe9").unwrap();
        assert_eq!(decoder.screen().to_text(), "café");
    }

    #[test]
    fn test_truncated_sequence_at_end() {
        let decoder = decode(b"ok\x1b[12;3");
        assert_eq!(decoder.screen().to_text(), "ok");
    }

    #[test]
    fn test_read_from_stream() {
        let mut decoder = Decoder::default();
        decoder
            .read_from(&b"\x1b[32mgreen\x1b[0m"[..])
            .expect("stream decode");
        assert_eq!(decoder.screen().to_text(), "green");
    }

    #[test]
    fn test_wrap_at_width() {
        let mut decoder = Decoder::new(Options::new().width(4));
        decoder.feed(b"abcdef").unwrap();
        assert_eq!(decoder.screen().to_text(), "abcd\nef");
    }

    #[test]
    fn test_erase_display_modes() {
        let decoder = decode(b"one\ntwo\nthree\x1b[2;2H\x1b[J");
        assert_eq!(decoder.screen().to_text(), "one\nt");

        let decoder = decode(b"one\ntwo\x1b[2J");
        assert!(decoder.screen().lines().iter().all(|l| l.is_empty()));
    }

    #[test]
    fn test_erase_line_modes() {
        let decoder = decode(b"hello\x1b[3G\x1b[K");
        assert_eq!(decoder.screen().to_text(), "he");

        let decoder = decode(b"hello\x1b[3G\x1b[1K");
        assert_eq!(decoder.screen().to_text(), "   lo");

        let decoder = decode(b"hello\x1b[2K");
        assert!(decoder.screen().line(0).unwrap().is_empty());
    }

    #[test]
    fn test_erase_bad_selector() {
        let decoder = decode(b"ab\x1b[7Jcd");
        assert_eq!(decoder.screen().to_text(), "abcd");

        let mut strict = Decoder::new(Options::new().strict(true));
        let err = strict.feed(b"\x1b[7J").unwrap_err();
        assert!(matches!(err, Error::ParamCount { command: "ED", .. }));
    }
}
