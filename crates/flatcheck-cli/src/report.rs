// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Suite report rendering (table or JSON).

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use flatcheck_core::{Check, FlatMap, SuiteReport};
use serde::Serialize;
use std::fmt::Write as _;

/// Output format for `flatcheck run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable table plus failure details.
    Text,
    /// One JSON document.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: usize,
    failed: usize,
    skipped: usize,
    results: Vec<JsonOutcome<'a>>,
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    check: &'a Check,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Render `report` in `format`.
pub fn render(report: &SuiteReport, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(report)),
        Format::Json => render_json(report),
    }
}

/// Table of outcomes, then each failure's full message, then a summary line.
pub fn render_text(report: &SuiteReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "result", "check"]);
    for (i, outcome) in report.outcomes.iter().enumerate() {
        let status = if outcome.passed() {
            Cell::new("PASS").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            status,
            Cell::new(outcome.check.to_string()),
        ]);
    }

    let mut out = format!("{table}\n");
    for (i, outcome) in report.outcomes.iter().enumerate() {
        if let Err(err) = &outcome.result {
            let _ = writeln!(out, "\n#{}: {err}", i + 1);
        }
    }
    let _ = writeln!(
        out,
        "\n{} passed, {} failed, {} skipped",
        report.passed(),
        report.failed(),
        report.skipped
    );
    out
}

/// Machine-readable report.
pub fn render_json(report: &SuiteReport) -> Result<String> {
    let doc = JsonReport {
        passed: report.passed(),
        failed: report.failed(),
        skipped: report.skipped,
        results: report
            .outcomes
            .iter()
            .map(|o| JsonOutcome {
                check: &o.check,
                passed: o.passed(),
                error: o.result.as_ref().err().map(ToString::to_string),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Key/value table of an instance, limited to keys starting with `prefix`.
pub fn render_instance(state: &FlatMap, prefix: &str) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["key", "value"]);
    for (key, value) in state.with_prefix(prefix) {
        table.add_row(vec![key, value]);
    }
    table.to_string()
}
