//! Run-merging renderer
//!
//! Walks a finalized screen and compresses each line into maximal runs of
//! identically-styled cells, one style declaration per run. Inverse video
//! and bold brightening are resolved here rather than at decode time, so
//! clearing either flag mid-stream never loses the original colors.
//!
//! The output format is pluggable: text escaping and style formatting go
//! through the [`Markup`] collaborator. [`HtmlMarkup`] is the built-in
//! inline-CSS emitter.

use std::io::{self, Write};

use crate::core::color::{Palette, Rgb};
use crate::core::line::Line;
use crate::core::screen::Screen;
use crate::core::Attribute;

/// Effective style of one run, fully resolved for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStyle {
    /// Foreground after inverse and bold resolution
    pub fg: Option<Rgb>,
    /// Background after inverse resolution
    pub bg: Option<Rgb>,
    /// Underline decoration
    pub underline: bool,
}

/// Output-format collaborator: text escaping plus style formatting
pub trait Markup {
    /// Escape raw cell text for the output format
    fn escape(&self, text: &str) -> String;
    /// Open one styled run
    fn open_run(&self, style: &RunStyle) -> String;
    /// Close one styled run
    fn close_run(&self) -> String;
    /// Open the document wrapper carrying the session default colors
    fn open_document(&self, fg: Rgb, bg: Rgb) -> String;
    /// Close the document wrapper
    fn close_document(&self) -> String;
}

/// Inline-CSS HTML emitter: one `<span>` per run, a `<div>` wrapper
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMarkup;

impl Markup for HtmlMarkup {
    fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
        out
    }

    fn open_run(&self, style: &RunStyle) -> String {
        let mut css = String::new();
        if let Some(fg) = style.fg {
            css.push_str(&format!("color:{fg};"));
        }
        if let Some(bg) = style.bg {
            css.push_str(&format!("background-color:{bg};"));
        }
        if style.underline {
            css.push_str("text-decoration:underline;");
        }
        format!("<span style=\"{css}\">")
    }

    fn close_run(&self) -> String {
        "</span>".to_string()
    }

    fn open_document(&self, fg: Rgb, bg: Rgb) -> String {
        format!("<div style=\"color:{fg};background-color:{bg};\">")
    }

    fn close_document(&self) -> String {
        "</div>".to_string()
    }
}

/// Renders a finalized screen through a markup collaborator
pub struct Renderer<'a, M> {
    screen: &'a Screen,
    palette: Palette,
    markup: M,
}

impl<'a, M: Markup> Renderer<'a, M> {
    /// Create a renderer over a finalized screen
    pub fn new(screen: &'a Screen, palette: Palette, markup: M) -> Self {
        Self {
            screen,
            palette,
            markup,
        }
    }

    /// Render every line, one output unit per line. Empty lines yield
    /// empty strings, not placeholder runs.
    pub fn lines(&self) -> Vec<String> {
        self.screen
            .lines()
            .iter()
            .map(|line| self.render_line(line))
            .collect()
    }

    /// Render the full document: wrapper, lines joined with newlines
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let fg = self.palette.default_fg();
        let bg = self.palette.default_bg();
        write!(w, "{}", self.markup.open_document(fg, bg))?;
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            write!(w, "{line}")?;
        }
        write!(w, "{}", self.markup.close_document())
    }

    /// Render the full document into a string
    pub fn document(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn render_line(&self, line: &Line) -> String {
        let mut out = String::new();
        let mut run = String::new();
        let mut current: Option<Attribute> = None;
        for cell in line.cells() {
            if current != Some(cell.attr) {
                if let Some(attr) = current {
                    self.emit(&mut out, attr, &run);
                }
                current = Some(cell.attr);
                run.clear();
            }
            run.push_str(&cell.content);
        }
        if let Some(attr) = current {
            self.emit(&mut out, attr, &run);
        }
        out
    }

    fn emit(&self, out: &mut String, attr: Attribute, text: &str) {
        let style = self.resolve(attr);
        out.push_str(&self.markup.open_run(&style));
        out.push_str(&self.markup.escape(text));
        out.push_str(&self.markup.close_run());
    }

    /// Resolve the stored attribute into its effective display style:
    /// inverse swaps fg/bg, bold substitutes the bright variant of the
    /// color family, and an unset foreground takes the session default.
    fn resolve(&self, attr: Attribute) -> RunStyle {
        let (mut fg, bg) = if attr.inverse {
            (attr.bg, attr.fg)
        } else {
            (attr.fg, attr.bg)
        };
        if attr.bold {
            fg = Some(match fg {
                Some(color) => self.palette.brighten(color).unwrap_or(color),
                None => self.palette.bright_white(),
            });
        }
        RunStyle {
            fg: fg.or(Some(self.palette.default_fg())),
            bg,
            underline: attr.underline,
        }
    }
}
