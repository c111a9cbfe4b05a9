//! End-to-end render tests
//!
//! Decode a stream, render it, and check the emitted runs.

use ansigrid::{to_html_string, Decoder, HtmlMarkup, Markup, Options, Renderer, RunStyle};

fn render_lines(input: &[u8], options: Options) -> Vec<String> {
    let palette = options.palette;
    let mut decoder = Decoder::new(options);
    decoder.feed(input).expect("permissive decode");
    let screen = decoder.finish();
    Renderer::new(&screen, palette, HtmlMarkup).lines()
}

#[test]
fn styled_roundtrip_merges_one_run() {
    // Blink (5) is dropped; yellow on green survives as a single run
    let lines = render_lines(b"\x1b[0m\x1b[5;33;42mHI\x1b[0m", Options::new());
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0],
        "<span style=\"color:#aa5500;background-color:#00aa00;\">HI</span>"
    );
}

#[test]
fn truecolor_roundtrip() {
    let lines = render_lines(b"\x1b[38;2;135;0;255;48;2;135;95;0mX\x1b[0m", Options::new());
    assert_eq!(
        lines[0],
        "<span style=\"color:#8700ff;background-color:#875f00;\">X</span>"
    );
}

#[test]
fn adjacent_same_style_cells_share_a_run() {
    let lines = render_lines(b"\x1b[31mab\x1b[31mcd", Options::new());
    assert_eq!(lines[0].matches("<span").count(), 1);
}

#[test]
fn style_change_starts_a_new_run() {
    let lines = render_lines(b"\x1b[31ma\x1b[32mb", Options::new());
    assert_eq!(lines[0].matches("<span").count(), 2);
}

#[test]
fn runs_do_not_deduplicate_across_lines() {
    let lines = render_lines(b"\x1b[31ma\nb", Options::new());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("color:#aa0000;"));
    assert!(lines[1].contains("color:#aa0000;"));
}

#[test]
fn empty_lines_are_empty_output_units() {
    let lines = render_lines(b"a\n\nb", Options::new());
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "");
}

#[test]
fn inverse_swaps_only_at_render_time() {
    // Set inverse with colors, then clear inverse; the original colors
    // come back untouched
    let lines = render_lines(b"\x1b[31;42;7ma\x1b[27mb", Options::new());
    let spans: Vec<&str> = lines[0].split("</span>").collect();
    assert!(spans[0].contains("color:#00aa00;"));
    assert!(spans[0].contains("background-color:#aa0000;"));
    assert!(spans[1].contains("color:#aa0000;"));
    assert!(spans[1].contains("background-color:#00aa00;"));
}

#[test]
fn bold_brightens_base_colors() {
    let lines = render_lines(b"\x1b[1;31mx", Options::new());
    assert!(lines[0].contains("color:#ff5555;"));
}

#[test]
fn xterm_palette_changes_resolved_colors() {
    let lines = render_lines(
        b"\x1b[31mx",
        Options::new().palette(ansigrid::Palette::Xterm),
    );
    assert!(lines[0].contains("color:#800000;"));
}

#[test]
fn html_escaping_applies_to_cell_text() {
    let html = to_html_string(&b"<b>&\"quoted\"'"[..], Options::new()).unwrap();
    assert!(html.contains("&lt;b&gt;&amp;&quot;quoted&quot;&#39;"));
}

#[test]
fn document_wraps_lines_with_defaults() {
    let html = to_html_string(&b"a\nb"[..], Options::new()).unwrap();
    assert!(html.starts_with("<div style=\"color:#aaaaaa;background-color:#000000;\">"));
    assert!(html.contains("</span>\n<span"));
    assert!(html.ends_with("</div>"));
}

#[test]
fn custom_markup_collaborator() {
    struct Plain;
    impl Markup for Plain {
        fn escape(&self, text: &str) -> String {
            text.to_string()
        }
        fn open_run(&self, style: &RunStyle) -> String {
            match style.fg {
                Some(fg) => format!("[{fg}]"),
                None => "[]".to_string(),
            }
        }
        fn close_run(&self) -> String {
            "[/]".to_string()
        }
        fn open_document(&self, _fg: ansigrid::Rgb, _bg: ansigrid::Rgb) -> String {
            String::new()
        }
        fn close_document(&self) -> String {
            String::new()
        }
    }

    let mut decoder = Decoder::default();
    decoder.feed(b"\x1b[31mhi").unwrap();
    let screen = decoder.finish();
    let out = Renderer::new(&screen, ansigrid::Palette::Cga, Plain).document();
    assert_eq!(out, "[#aa0000]hi[/]");
}
