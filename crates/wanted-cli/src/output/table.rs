//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use super::OutputFormatter;
use crate::types::{OperationReport, Outcome};

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn outcome_label(outcome: Outcome) -> ColoredString {
        match outcome {
            Outcome::Completed => "[OK]".green(),
            Outcome::Degraded => "[!]".yellow(),
            Outcome::Aborted => "[X]".red(),
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_report(&self, report: &OperationReport) -> String {
        let header = format!(
            "{} {} {} -> {}",
            Self::outcome_label(report.outcome),
            report.operation.bold(),
            report.outcome.as_str(),
            report.target
        );

        if report.errors.is_empty() {
            return header;
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Kind", "Error"]);

        for (i, error) in report.errors.iter().enumerate() {
            let kind = if error.recoverable {
                Cell::new("recoverable").fg(Color::Yellow)
            } else {
                Cell::new("fatal").fg(Color::Red)
            };
            table.add_row(vec![Cell::new(i + 1), kind, Cell::new(&error.message)]);
        }

        let recoverable = report.errors.iter().filter(|e| e.recoverable).count();
        let summary = format!(
            "\nSummary: {} recoverable, {} fatal",
            recoverable.to_string().yellow(),
            (report.errors.len() - recoverable).to_string().red()
        );

        format!("{}\n{}{}", header, table, summary)
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
