//! CLI handlers for the byte-transforming commands.
//!
//! Each command reads its inputs (files concatenated in order, or stdin),
//! applies one transformation and writes the result to stdout or `--output`.

use anyhow::{Context, Result};
use charsan::{
    cleanup_utf8, decode_hex_code_points_with, decode_non_breaking_spaces, remove_accents,
    strip_invalid_utf8, HexDecodeOptions, SanitizeConfig, SourceEncoding, Unmappable,
    DEFAULT_SOURCE_ENCODING,
};
use clap::{Args, Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::check::exit_codes;

/// Input and output locations shared by every filter command.
#[derive(Debug, Args)]
pub struct IoArgs {
    /// Input files (reads from stdin if none provided)
    pub files: Vec<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Remove malformed UTF-8 byte sequences.
#[derive(Debug, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Remove exactly the bytes a strict UTF-8 validator rejects, instead of
    /// applying the fixed deletion table
    #[arg(long)]
    pub strict: bool,
}

/// Decode `\uXXXX` escapes.
#[derive(Debug, Parser)]
pub struct UnescapeArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Source encoding the code units belong to
    #[arg(short, long, default_value = DEFAULT_SOURCE_ENCODING)]
    pub encoding: String,

    /// What to do with escapes the encoding cannot represent
    #[arg(long, value_enum, default_value_t = UnmappableArg::Keep)]
    pub on_unmappable: UnmappableArg,
}

/// Policy for unmappable escapes (CLI wrapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnmappableArg {
    /// Leave the escape text in place
    Keep,
    /// Drop the escape
    Remove,
    /// Replace the escape with '?'
    Substitute,
    /// Abort with an error
    Fail,
}

impl From<UnmappableArg> for Unmappable {
    fn from(arg: UnmappableArg) -> Self {
        match arg {
            UnmappableArg::Keep => Unmappable::Keep,
            UnmappableArg::Remove => Unmappable::Remove,
            UnmappableArg::Substitute => Unmappable::Substitute,
            UnmappableArg::Fail => Unmappable::Fail,
        }
    }
}

/// Run a configurable sanitize pipeline.
#[derive(Debug, Parser)]
pub struct SanitizeArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// JSON pipeline configuration (built-in defaults if omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn read_input(files: &[PathBuf]) -> Result<Vec<u8>> {
    if files.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;
        return Ok(input);
    }

    let mut input = Vec::new();
    for path in files {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        input.extend_from_slice(&bytes);
    }
    Ok(input)
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(bytes).context("failed to write to stdout")?;
            lock.flush().context("failed to flush stdout")
        }
    }
}

/// Read, transform and write, logging the size change.
fn filter<F>(io: &IoArgs, name: &str, transform: F) -> Result<i32>
where
    F: FnOnce(&[u8]) -> Result<Vec<u8>>,
{
    let input = read_input(&io.files)?;
    let output = transform(&input)?;

    tracing::info!(
        command = name,
        input_bytes = input.len(),
        output_bytes = output.len(),
        "transformed input"
    );
    if output.len() < input.len() {
        tracing::debug!(removed = input.len() - output.len(), "bytes removed");
    }

    write_output(io.output.as_deref(), &output)?;
    Ok(exit_codes::SUCCESS)
}

pub fn run_clean(args: CleanArgs) -> Result<i32> {
    filter(&args.io, "clean", |input| {
        Ok(if args.strict {
            strip_invalid_utf8(input)
        } else {
            cleanup_utf8(input)
        })
    })
}

pub fn run_unescape(args: UnescapeArgs) -> Result<i32> {
    let encoding: SourceEncoding = args.encoding.parse()?;
    let options = HexDecodeOptions::new(encoding).with_on_unmappable(args.on_unmappable.into());
    tracing::debug!(encoding = %encoding, policy = ?options.on_unmappable, "decoding escapes");

    filter(&args.io, "unescape", |input| {
        Ok(decode_hex_code_points_with(input, &options)?)
    })
}

pub fn run_nbsp(args: IoArgs) -> Result<i32> {
    filter(&args, "nbsp", |input| Ok(decode_non_breaking_spaces(input)))
}

pub fn run_unaccent(args: IoArgs) -> Result<i32> {
    filter(&args, "unaccent", |input| Ok(remove_accents(input)))
}

/// Load a pipeline configuration from a JSON file.
fn load_config(path: &Path) -> Result<SanitizeConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn run_sanitize(args: SanitizeArgs) -> Result<i32> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SanitizeConfig::default(),
    };
    tracing::debug!(?config, "sanitize pipeline");

    filter(&args.io, "sanitize", |input| Ok(config.apply(input)?))
}
