//! CLI handler for the `check` command.

use anyhow::{Context, Result};
use charsan::text::utf8::{validate_utf8, Utf8Error, Utf8ErrorKind};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Check files for UTF-8 compliance.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Input files to check (reads from stdin if none provided)
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,
}

/// Process exit codes.
pub mod exit_codes {
    /// Input is valid UTF-8.
    pub const SUCCESS: i32 = 0;
    /// At least one input is not valid UTF-8.
    pub const INVALID: i32 = 1;
    /// I/O or configuration error.
    pub const IO_ERROR: i32 = 2;
}

struct Palette {
    error: &'static str,
    location: &'static str,
    gutter: &'static str,
    caret: &'static str,
    hint: &'static str,
    reset: &'static str,
}

impl Palette {
    const ANSI: Self = Self {
        error: "\x1b[1;31m",
        location: "\x1b[1;34m",
        gutter: "\x1b[0;34m",
        caret: "\x1b[1;32m",
        hint: "\x1b[0;33m",
        reset: "\x1b[0m",
    };

    const PLAIN: Self = Self {
        error: "",
        location: "",
        gutter: "",
        caret: "",
        hint: "",
        reset: "",
    };

    fn for_args(args: &CheckArgs) -> Self {
        let use_color = if args.no_color {
            false
        } else {
            args.color || atty::is(atty::Stream::Stderr)
        };

        if use_color {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }
}

/// Run the check command.
pub fn run(args: CheckArgs) -> Result<i32> {
    let palette = Palette::for_args(&args);

    if args.files.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;
        return Ok(check_input(&input, "<stdin>", args.quiet, &palette));
    }

    let mut code = exit_codes::SUCCESS;
    for path in &args.files {
        match fs::read(path) {
            Ok(input) => {
                let name = path.to_string_lossy();
                let result = check_input(&input, &name, args.quiet, &palette);
                code = code.max(result);
            }
            Err(e) => {
                if !args.quiet {
                    eprintln!(
                        "{}error{}: {}: {}",
                        palette.error,
                        palette.reset,
                        path.display(),
                        e
                    );
                }
                code = exit_codes::IO_ERROR;
            }
        }
    }

    Ok(code)
}

fn check_input(input: &[u8], name: &str, quiet: bool, palette: &Palette) -> i32 {
    match validate_utf8(input) {
        Ok(()) => {
            tracing::debug!(input = name, bytes = input.len(), "valid UTF-8");
            exit_codes::SUCCESS
        }
        Err(err) => {
            if !quiet {
                report(&err, input, name, palette);
            }
            exit_codes::INVALID
        }
    }
}

fn report(err: &Utf8Error, input: &[u8], name: &str, palette: &Palette) {
    let byte = input
        .get(err.offset)
        .map(|b| format!(" (byte 0x{:02X})", b))
        .unwrap_or_default();
    eprintln!("{}error{}: {}{}", palette.error, palette.reset, err.kind, byte);
    eprintln!(
        "  {}--> {}:{}:{}{}",
        palette.location, name, err.line, err.column, palette.reset
    );

    let snippet = snippet(input, err.offset, err.column);
    let width = err.line.to_string().len().max(3);
    let pad = " ".repeat(width + 2);

    eprintln!("{}{}|{}", pad, palette.gutter, palette.reset);
    eprintln!(
        " {}{:>width$}{} {}|{} {}",
        palette.gutter,
        err.line,
        palette.reset,
        palette.gutter,
        palette.reset,
        snippet.text,
        width = width
    );
    eprintln!(
        "{}{}|{} {}{}^{}{}",
        pad,
        palette.gutter,
        palette.reset,
        " ".repeat(snippet.caret),
        palette.caret,
        palette.reset,
        hint(err.kind)
            .map(|h| format!(" {}{}{}", palette.hint, h, palette.reset))
            .unwrap_or_default()
    );
    eprintln!();
}

fn hint(kind: Utf8ErrorKind) -> Option<&'static str> {
    match kind {
        Utf8ErrorKind::InvalidLeadByte => Some("bytes 0x80-0xBF are continuation bytes"),
        Utf8ErrorKind::InvalidContinuationByte => Some("expected byte 0x80-0xBF"),
        Utf8ErrorKind::OverlongEncoding => Some("use shortest possible encoding"),
        Utf8ErrorKind::SurrogateCodepoint => Some("U+D800-U+DFFF are reserved for UTF-16"),
        Utf8ErrorKind::OutOfRangeCodepoint => Some("maximum is U+10FFFF"),
        Utf8ErrorKind::TruncatedSequence => None,
    }
}

/// The offending line, rendered for display.
#[derive(Debug, PartialEq, Eq)]
struct Snippet {
    text: String,
    /// Display columns before the caret.
    caret: usize,
}

const MAX_SNIPPET: usize = 80;

/// Render the line containing `offset` with invalid bytes shown as U+FFFD.
///
/// Long lines are windowed around the error and marked with `...`.
fn snippet(input: &[u8], offset: usize, column: usize) -> Snippet {
    let line_start = offset + 1 - column;
    let line_end = input[line_start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(input.len(), |i| line_start + i);

    let before = String::from_utf8_lossy(&input[line_start..offset]);
    let after = String::from_utf8_lossy(&input[offset..line_end]);
    let chars: Vec<char> = before.chars().chain(after.chars()).collect();
    let error_col = before.chars().count();

    if chars.len() <= MAX_SNIPPET {
        return Snippet {
            text: chars.into_iter().collect(),
            caret: error_col,
        };
    }

    let start = error_col
        .saturating_sub(MAX_SNIPPET / 2)
        .min(chars.len() - MAX_SNIPPET);
    let end = start + MAX_SNIPPET;
    let mut text = String::new();
    let mut caret = error_col - start;
    if start > 0 {
        text.push_str("...");
        caret += 3;
    }
    text.extend(&chars[start..end]);
    if end < chars.len() {
        text.push_str("...");
    }

    Snippet { text, caret }
}
