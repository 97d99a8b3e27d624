#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

mod commands;
mod config;
mod logging;

use clap::Parser;
use config::Config;
use miette::{miette, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsast")]
#[command(author, version, about = "Parse a JavaScript file and dump its syntax tree", long_about = None)]
struct Cli {
    /// Print the abstract syntax tree after a successful parse
    #[arg(short, long)]
    verbose: bool,

    /// Emit a JSON summary on stdout (stable, machine-readable)
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-d for INFO, -dd for DEBUG, -ddd for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "JSAST_LOG_JSON")]
    log_json: bool,

    /// JavaScript file to parse
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::new(cli.file)
        .with_print_ast(cli.verbose)
        .with_json_output(cli.json)
        .with_verbosity(cli.debug)
        .with_json_logs(cli.log_json);

    logging::init(config.verbosity, config.json_logs);
    tracing::debug!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "starting"
    );

    let Some(path) = config.file.clone() else {
        return Err(miette!(
            help = "run `jsast --help` for usage",
            "No input file specified"
        ));
    };

    if !commands::parse::run(&config, &path)? {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["jsast", "-v", "-dd", "--json", "app.js"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.json);
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.file, Some(PathBuf::from("app.js")));
    }

    #[test]
    fn test_file_is_optional() {
        let cli = Cli::try_parse_from(["jsast"]).unwrap();
        assert!(cli.file.is_none());
        assert!(!cli.verbose);
    }
}
