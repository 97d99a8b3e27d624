//! `jsast <FILE>`: parse a file, report, tear the tree down.

use crate::config::Config;
use jsast_core::{print_tree, teardown};
use jsast_parser::{parse, ParseError, Parsed};
use miette::{miette, IntoDiagnostic, LabeledSpan, NamedSource, Report, Result, WrapErr};
use serde::Serialize;
use std::ops::Range;
use std::path::Path;

/// Parse result for JSON output.
#[derive(Serialize)]
struct ParseResultJson<'a> {
    ok: bool,
    file: &'a str,
    lines: u32,
    errors: Vec<ParseErrorJson<'a>>,
    /// Tree dump, only with `--verbose` and only after a clean parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    ast: Option<String>,
}

#[derive(Serialize)]
struct ParseErrorJson<'a> {
    message: &'a str,
    line: u32,
    column: u32,
    /// Byte range of the offending token.
    start: u32,
    end: u32,
}

impl<'a> From<&'a ParseError> for ParseErrorJson<'a> {
    fn from(error: &'a ParseError) -> Self {
        Self {
            message: &error.message,
            line: error.pos.line,
            column: error.pos.column,
            start: error.span.start,
            end: error.span.end,
        }
    }
}

/// Parse `path` and print the report. Returns whether parsing succeeded.
///
/// The tree is torn down on every path that produced one.
pub fn run(config: &Config, path: &Path) -> Result<bool> {
    let name = path.display().to_string();
    let source = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot open file '{name}'"))?;

    if !config.json_output {
        println!("Parsing '{name}'...");
    }

    let parsed = parse(&source);
    let ok = parsed.is_ok();
    tracing::info!(
        file = %name,
        lines = parsed.lines,
        errors = parsed.errors.len(),
        "parsed"
    );

    if config.json_output {
        let json = summary(&name, &parsed, config.print_ast);
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
    } else if ok {
        println!("✓ Parsing successful!");
        println!("  Total lines: {}", parsed.lines);
        if config.print_ast {
            println!();
            println!("=== Abstract Syntax Tree ===");
            print!("{}", print_tree(parsed.root.as_ref()));
        }
    } else {
        for error in &parsed.errors {
            eprintln!("{:?}", diagnostic(&name, &source, error));
        }
        println!("✗ Parsing failed with {} error(s)", parsed.errors.len());
    }

    teardown(parsed.root);

    Ok(ok)
}

fn summary<'a>(file: &'a str, parsed: &'a Parsed, print_ast: bool) -> ParseResultJson<'a> {
    let ok = parsed.is_ok();
    ParseResultJson {
        ok,
        file,
        lines: parsed.lines,
        errors: parsed.errors.iter().map(ParseErrorJson::from).collect(),
        ast: (ok && print_ast).then(|| print_tree(parsed.root.as_ref())),
    }
}

/// A syntax error as a labeled report over the source.
fn diagnostic(name: &str, source: &str, error: &ParseError) -> Report {
    miette!(
        labels = vec![LabeledSpan::at(Range::<usize>::from(error.span), "here")],
        "{} (line {}, column {})",
        error.message,
        error.pos.line,
        error.pos.column
    )
    .with_source_code(NamedSource::new(name, source.to_string()))
}
