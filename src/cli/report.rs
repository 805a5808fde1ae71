//! Report formatting and printing utilities.
//!
//! Records and per-file failures are printed in cargo-style form, or as one
//! JSON document for tooling. Kept apart from the core so locscan can be used
//! as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::core::{BatchResult, ExtractionRecord, FileError};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// Print records, failures and a summary line to stdout.
pub fn print_human(result: &BatchResult) {
    print_human_to(result, &mut io::stdout().lock());
}

pub fn print_human_to<W: Write>(result: &BatchResult, writer: &mut W) {
    for record in &result.records {
        print_record(record, writer);
    }
    for failure in &result.failures {
        print_failure(failure, writer);
    }
    print_summary(result, writer);
}

fn print_record<W: Write>(record: &ExtractionRecord, writer: &mut W) {
    let key = record
        .key
        .as_deref()
        .map(|key| format!("  {}", key.dimmed().cyan()))
        .unwrap_or_default();
    let _ = writeln!(
        writer,
        "{}: \"{}\"{}",
        record.kind.to_string().bold().green(),
        record.value,
        key
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), record.location);

    if let Some(hint) = &record.hint {
        for line in hint.lines() {
            let _ = writeln!(writer, "   {} {} {}", "=".blue(), "hint:".bold(), line);
        }
    }
    let _ = writeln!(writer);
}

fn print_failure<W: Write>(failure: &FileError, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        "error".bold().red(),
        failure.cause(),
        "parse-error".dimmed().cyan()
    );
    let location = match failure.line() {
        Some(line) => format!("{}:{}", failure.file_path(), line),
        None => failure.file_path().to_string(),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(result: &BatchResult, writer: &mut W) {
    let records = result.records.len();
    let files = result.files_processed;
    let message = format!(
        "Extracted {} {} from {} {}",
        records,
        plural(records, "record", "records"),
        files,
        plural(files, "file", "files")
    );

    let failed = result.failed_file_count();
    if failed == 0 {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
    } else {
        let _ = writeln!(
            writer,
            "{} {}, {} {} could not be parsed",
            FAILURE_MARK.red(),
            message,
            failed,
            plural(failed, "file", "files").red()
        );
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFailure<'a> {
    file_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    files_processed: usize,
    record_count: usize,
    failed_files: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    records: &'a [ExtractionRecord],
    errors: Vec<JsonFailure<'a>>,
    summary: JsonSummary,
}

/// Print the whole result as one pretty-printed JSON document to stdout.
pub fn print_json(result: &BatchResult) -> Result<()> {
    print_json_to(result, &mut io::stdout().lock())
}

pub fn print_json_to<W: Write>(result: &BatchResult, writer: &mut W) -> Result<()> {
    let report = JsonReport {
        records: &result.records,
        errors: result
            .failures
            .iter()
            .map(|failure| JsonFailure {
                file_path: failure.file_path(),
                line: failure.line(),
                message: failure.cause(),
            })
            .collect(),
        summary: JsonSummary {
            files_processed: result.files_processed,
            record_count: result.records.len(),
            failed_files: result.failed_file_count(),
        },
    };
    serde_json::to_writer_pretty(&mut *writer, &report).context("Failed to write JSON report")?;
    writeln!(writer).context("Failed to write JSON report")?;
    Ok(())
}
