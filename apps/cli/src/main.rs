//! strata - FHIR JSON/XML converter
//!
//! Usage:
//!   strata convert patient.json --to xml -o patient.xml
//!   strata check codesystem.xml --strict
//!   strata show - < resource.json

mod commands;
mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strata_models::{Options, UnknownFields};

#[derive(Parser, Debug)]
#[command(name = "strata", version)]
#[command(about = "Convert and check FHIR resources between JSON and XML")]
struct Cli {
    /// Reject unknown fields instead of skipping them
    #[arg(long, global = true, env = "STRATA_STRICT")]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a resource to the other wire format
    Convert {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Output format (defaults to the opposite of the input)
        #[arg(long, value_enum)]
        to: Option<Format>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact output instead of pretty-printing
        #[arg(long)]
        compact: bool,
    },

    /// Decode, re-encode and verify the re-encoding is stable
    Check {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Print the diagnostic rendering of a resource
    Show {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
}

/// FHIR wire format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let mut options = Options::default();
    if cli.strict {
        options = options.with_unknown_fields(UnknownFields::Reject);
    }

    match cli.command {
        Command::Convert {
            input,
            to,
            output,
            compact,
        } => {
            let options = options.with_pretty(!compact);
            let source = commands::read_input(&input)?;
            let converted = commands::convert(&source, to, &options)
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            commands::write_output(output.as_deref(), &converted)?;
        }
        Command::Check { input } => {
            let source = commands::read_input(&input)?;
            let summary = commands::check(&source, &options)
                .with_context(|| format!("Check failed for {}", input.display()))?;
            println!("{summary}");
        }
        Command::Show { input } => {
            let source = commands::read_input(&input)?;
            let resource = commands::decode(&source, &options)
                .with_context(|| format!("Failed to decode {}", input.display()))?;
            println!("{resource}");
        }
    }

    Ok(())
}
