//! Headless ANSI-to-HTML converter
//!
//! Reads ANSI text from a file or stdin and writes the decoded result as
//! HTML, plain text, or a JSON grid snapshot.

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use ansigrid::{ControlPolicy, Decoder, HtmlMarkup, Latin1, Options, Palette, Renderer};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Text,
    Json,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut width = 80usize;
    let mut palette = Palette::Cga;
    let mut strict = false;
    let mut latin1 = false;
    let mut blanks = false;
    let mut max_lines: Option<usize> = None;
    let mut format = OutputFormat::Html;
    let mut input_file: Option<String> = None;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-w" | "--width" => {
                i += 1;
                if i < args.len() {
                    width = args[i].parse().unwrap_or(80);
                }
            }
            "-p" | "--palette" => {
                i += 1;
                if i < args.len() {
                    palette = match args[i].as_str() {
                        "xterm" => Palette::Xterm,
                        _ => Palette::Cga,
                    };
                }
            }
            "--max-lines" => {
                i += 1;
                if i < args.len() {
                    max_lines = args[i].parse().ok();
                }
            }
            "--latin1" => latin1 = true,
            "--blanks" => blanks = true,
            "-s" | "--strict" => strict = true,
            "--html" => format = OutputFormat::Html,
            "-t" | "--text" => format = OutputFormat::Text,
            "-j" | "--json" => format = OutputFormat::Json,
            "-h" | "--help" => show_help = true,
            _ => {
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            }
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut options = Options::new().width(width).palette(palette).strict(strict);
    if latin1 {
        options = options.charset(Latin1);
    }
    if blanks {
        options = options.control_bytes(ControlPolicy::Blank);
    }
    if let Some(n) = max_lines {
        options = options.max_lines(n);
    }

    let mut decoder = Decoder::new(options);
    let result = match &input_file {
        Some(path) => match File::open(path) {
            Ok(file) => decoder.read_from(file),
            Err(e) => {
                eprintln!("error: cannot open {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => decoder.read_from(io::stdin().lock()),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let screen = decoder.finish();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Html => Renderer::new(&screen, palette, HtmlMarkup)
            .write_to(&mut out)
            .and_then(|()| writeln!(out)),
        OutputFormat::Text => writeln!(out, "{}", screen.to_text()),
        OutputFormat::Json => match serde_json::to_string_pretty(&screen) {
            Ok(json) => writeln!(out, "{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = written {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn print_help() {
    println!(
        r#"ansigrid - ANSI to HTML converter

USAGE:
    ansigrid [OPTIONS] [FILE]

    Reads FILE (or stdin) and writes the decoded output to stdout.

OPTIONS:
    -w, --width <COLS>     Columns before implicit wrap (default 80)
    -p, --palette <NAME>   Color table: cga (default) or xterm
        --latin1           Decode input bytes as ISO 8859-1
        --blanks           Render stray control bytes as blanks
        --max-lines <N>    Cap the grid at N rows
    -s, --strict           Abort on malformed input
        --html             Emit an HTML document (default)
    -t, --text             Emit the plain-text grid
    -j, --json             Emit the grid as JSON
    -h, --help             Show this help

ENVIRONMENT:
    RUST_LOG               Log filter (default: warn), written to stderr
"#
    );
}
