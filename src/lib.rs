//! Ansigrid: ANSI/VT100 escape sequence decoder
//!
//! Interprets a byte stream containing ANSI control sequences (colors,
//! cursor movement, erasure) into a two-dimensional grid of styled cells,
//! then renders the grid as minimal style-run output such as HTML.
//! Built for ANSI art and captured terminal output rather than live
//! emulation: scrolling regions, alternate screens, and interactive
//! reports are out of scope.
//!
//! - `core`: grid model (cells, lines, cursor, colors, screen)
//! - `parser`: byte tokenizer and CSI sequence parser
//! - `decoder`: the decode session and command dispatch
//! - `sgr`: Select Graphic Rendition attribute resolver
//! - `render`: run-merging renderer and markup collaborators
//!
//! # Example
//!
//! ```
//! use ansigrid::{to_html_string, Options};
//!
//! let html = to_html_string(&b"\x1b[1;32mok\x1b[0m"[..], Options::new())?;
//! assert!(html.contains("ok"));
//! # Ok::<(), ansigrid::Error>(())
//! ```

pub mod charset;
pub mod core;
pub mod decoder;
pub mod error;
pub mod options;
pub mod parser;
pub mod render;
pub mod sgr;

pub use crate::core::{Attribute, Cell, Cursor, Line, Palette, Rgb, Screen, DEFAULT_WIDTH};
pub use charset::{Charset, Latin1};
pub use decoder::Decoder;
pub use error::{Error, Result};
pub use options::{ControlPolicy, Options};
pub use render::{HtmlMarkup, Markup, Renderer, RunStyle};

use std::io::{Read, Write};

/// Decode a stream and write the rendered HTML document to `writer`
pub fn write_html<R: Read, W: Write>(reader: R, writer: &mut W, options: Options) -> Result<()> {
    let palette = options.palette;
    let mut decoder = Decoder::new(options);
    decoder.read_from(reader)?;
    let screen = decoder.finish();
    Renderer::new(&screen, palette, HtmlMarkup).write_to(writer)?;
    Ok(())
}

/// Decode a stream and return the rendered HTML document as bytes
pub fn to_html_bytes<R: Read>(reader: R, options: Options) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_html(reader, &mut buf, options)?;
    Ok(buf)
}

/// Decode a stream and return the rendered HTML document as a string
pub fn to_html_string<R: Read>(reader: R, options: Options) -> Result<String> {
    let buf = to_html_bytes(reader, options)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
