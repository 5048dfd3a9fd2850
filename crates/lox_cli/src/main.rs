//! lox: Scan Lox scripts and print their tokens.
//!
//! Usage:
//!   lox [options] [script]
//!
//! With a script, scans the file and exits with status 65 if it contains
//! lexical errors. Without one, starts an interactive prompt.

mod logging;
mod reporter;

use clap::{Parser as ClapParser, ValueEnum};
use lox_core::{LoxError, Result};
use lox_diagnostics::DiagnosticReporter;
use lox_scanner::{scan_tokens, Token};
use reporter::ConsoleReporter;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info, instrument};

/// Exit status when a script contained lexical errors.
const EXIT_DATA_ERROR: i32 = 65;

#[derive(ClapParser, Debug)]
#[command(name = "lox", about = "Tokenize Lox source code", version)]
struct Cli {
    /// Script to scan. Starts an interactive prompt when omitted.
    #[arg(value_name = "SCRIPT")]
    scripts: Vec<PathBuf>,

    /// How to print the token stream.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log scanner activity at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One token per line.
    Text,
    /// A JSON array of tokens.
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = logging::init_logging(cli.verbose) {
        eprintln!("warning: failed to initialize logging: {}", error);
    }

    let exit_code = match execute(&cli) {
        Ok(code) => code,
        Err(error) => {
            let code = error.exit_code();
            eprintln!("{:?}", miette::Report::new(error));
            code
        }
    };
    process::exit(exit_code);
}

fn execute(cli: &Cli) -> Result<i32> {
    match cli.scripts.as_slice() {
        [] => run_prompt(cli.format),
        [script] => run_file(script, cli.format),
        _ => Err(LoxError::Usage),
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
fn run_file(path: &Path, format: OutputFormat) -> Result<i32> {
    let source = std::fs::read_to_string(path).map_err(|source| LoxError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(bytes = source.len(), "read script");

    let mut reporter = ConsoleReporter::stderr();
    let mut stdout = io::stdout().lock();
    run(&source, format, &mut reporter, &mut stdout)?;

    if reporter.had_error() {
        return Ok(EXIT_DATA_ERROR);
    }
    Ok(0)
}

fn run_prompt(format: OutputFormat) -> Result<i32> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut reporter = ConsoleReporter::stderr();
    let mut line = String::new();

    loop {
        write!(stdout, "> ").and_then(|_| stdout.flush()).map_err(LoxError::Write)?;

        line.clear();
        let read = stdin.lock().read_line(&mut line).map_err(|source| LoxError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
        if read == 0 {
            writeln!(stdout, "Exiting...").map_err(LoxError::Write)?;
            return Ok(0);
        }

        let input = line.trim_end_matches(['\n', '\r']);
        run(input, format, &mut reporter, &mut stdout)?;
        if reporter.had_error() {
            debug!("lexical errors on prompt line");
        }
        reporter.reset();
    }
}

/// Scan one source text and print its tokens.
fn run(
    source: &str,
    format: OutputFormat,
    reporter: &mut impl DiagnosticReporter,
    out: &mut impl Write,
) -> Result<()> {
    let tokens = scan_tokens(source, reporter);
    print_tokens(&tokens, format, out)
}

fn print_tokens(tokens: &[Token], format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for token in tokens {
                writeln!(out, "{}", token).map_err(LoxError::Write)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, tokens)?;
            writeln!(out).map_err(LoxError::Write)?;
        }
    }
    Ok(())
}
