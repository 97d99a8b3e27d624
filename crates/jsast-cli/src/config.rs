use serde::Serialize;
use std::path::PathBuf;

/// Runtime configuration for the `jsast` driver.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    /// File to parse.
    pub file: Option<PathBuf>,

    /// Print the tree after a successful parse.
    pub print_ast: bool,

    /// Emit the report as JSON on stdout.
    pub json_output: bool,

    /// Log verbosity (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE).
    pub verbosity: u8,

    /// Whether to emit JSON logs.
    pub json_logs: bool,
}

impl Config {
    /// Create a config for the given input file.
    #[must_use]
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_print_ast(mut self, print_ast: bool) -> Self {
        self.print_ast = print_ast;
        self
    }

    #[must_use]
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}
