//! conform CLI - architectural conformance checks for TypeScript and React

mod commands;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use clap::builder::PossibleValuesParser;
use colored::Colorize;
use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "conform",
    author,
    version,
    about = "Architectural conformance checks for TypeScript and React projects",
    long_about = "conform runs structural properties over a TypeScript/React source tree.\n\n\
                  Each property selects files by glob and reports every place where the\n\
                  invariant does not hold."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"])
    )]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_json);

    let outcome = match cli.command {
        Commands::Check(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Explain(args) => args.run(),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}
