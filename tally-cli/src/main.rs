use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::warn;
use tally_finance::{merge_statements, rollup_statement, summarize_statement};
use tally_ingest::StatementError;

mod logging;
mod output;

use output::OutputFormat;

const MERGE_USAGE: &str = "Not enough arguments. Did you provide two Capital One statement lists?
Usage: tally merge <statement-list-1> <statement-list-2>";

const SUMMARIZE_USAGE: &str = "Usage: tally summarize <statement.csv>";

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Merge and summarize bank statement CSV exports")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge two statement exports into one deduplicated list with YYYY-MM-DD dates
    Merge {
        /// Statement CSV exports, each with a header row
        #[arg(value_name = "STATEMENT")]
        paths: Vec<PathBuf>,

        /// Print rows most recent first instead of in arbitrary order
        #[arg(long)]
        sort: bool,
    },

    /// Count and total the deposits and withdrawals in a merged statement
    Summarize {
        /// Headerless statement CSV with YYYY-MM-DD dates (output of `tally merge`)
        #[arg(value_name = "STATEMENT")]
        paths: Vec<PathBuf>,

        /// Report format; `dat` prints a per-day rollup instead of the summary
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let show_hint = matches!(cli.command, Command::Summarize { .. });

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if show_hint {
                if let Some(hint) = err.downcast_ref::<StatementError>().and_then(|e| e.hint()) {
                    eprintln!("hint: {hint}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Merge { paths, sort } => {
            let [first, second, rest @ ..] = paths.as_slice() else {
                println!("{MERGE_USAGE}");
                return Ok(());
            };
            if !rest.is_empty() {
                warn!("ignoring {} extra statement path(s)", rest.len());
            }

            let (merged, _) = merge_statements(first, second).with_context(|| {
                format!("merging {} and {}", first.display(), second.display())
            })?;

            let mut out = BufWriter::new(std::io::stdout().lock());
            if sort {
                for line in merged.into_sorted() {
                    writeln!(out, "{line}")?;
                }
            } else {
                for line in merged.iter() {
                    writeln!(out, "{line}")?;
                }
            }
            out.flush().context("writing merged statement")?;
        }

        Command::Summarize { paths, format } => {
            let [path, rest @ ..] = paths.as_slice() else {
                println!("{SUMMARIZE_USAGE}");
                return Ok(());
            };
            if !rest.is_empty() {
                warn!("ignoring {} extra statement path(s)", rest.len());
            }

            if format == OutputFormat::Dat {
                let days = rollup_statement(path)
                    .with_context(|| format!("rolling up {}", path.display()))?;
                print!("{}", output::daily_dat::render(&days));
                return Ok(());
            }

            let report = summarize_statement(path)
                .with_context(|| format!("summarizing {}", path.display()))?;

            match format {
                OutputFormat::Json => println!("{}", output::json::render_summary(&report)?),
                _ => print!("{}", output::summary_text::render(&report)),
            }
        }
    }

    Ok(())
}
