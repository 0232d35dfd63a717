//! Charsan CLI tool for checking and sanitizing text files.

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{filter::LevelFilter, fmt};

mod check;
mod filter;

#[derive(Debug, Parser)]
#[command(name = "charsan")]
#[command(about = "Character set sanitizing toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate input for UTF-8 compliance
    Check(check::CheckArgs),
    /// Remove malformed UTF-8 byte sequences
    Clean(filter::CleanArgs),
    /// Decode \uXXXX escapes from a source encoding into UTF-8
    Unescape(filter::UnescapeArgs),
    /// Replace &nbsp; and U+00A0 with ordinary spaces
    Nbsp(filter::IoArgs),
    /// Replace accented letters with ASCII equivalents
    Unaccent(filter::IoArgs),
    /// Run a configurable pipeline of the above
    Sanitize(filter::SanitizeArgs),
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(command: Command) -> anyhow::Result<i32> {
    match command {
        Command::Check(args) => check::run(args),
        Command::Clean(args) => filter::run_clean(args),
        Command::Unescape(args) => filter::run_unescape(args),
        Command::Nbsp(args) => filter::run_nbsp(args),
        Command::Unaccent(args) => filter::run_unaccent(args),
        Command::Sanitize(args) => filter::run_sanitize(args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(level_for(cli.verbose));

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            check::exit_codes::IO_ERROR
        }
    };

    std::process::exit(code);
}
