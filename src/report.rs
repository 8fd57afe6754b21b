/*!
 * Reporting functionality for repodump
 *
 * Summarizes what was written, using the tabled library for table
 * rendering. Reports go to stderr so they never mix with the dump itself.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::writer::RenderSummary;

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to walk and render
    pub duration: Duration,
    /// Per-file results, in output order
    pub summary: RenderSummary,
}

/// Rough token estimate: four characters per token
pub fn estimate_tokens(chars: usize) -> usize {
    chars / 4
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr
    pub fn print_report(&self, report: &ScanReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Written",
                value: self.format_number(report.summary.files.len()),
            },
            SummaryRow {
                key: "Total Lines",
                value: self.format_number(report.summary.total_lines()),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(estimate_tokens(report.summary.total_chars()))
                ),
            },
        ];

        if report.summary.failures() > 0 {
            rows.push(SummaryRow {
                key: "Read Failures",
                value: report.summary.failures().to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let rows: Vec<FileRow> = report
            .summary
            .files
            .iter()
            .map(|file| FileRow {
                path: file.rel_path.clone(),
                lines: if file.error.is_some() {
                    "error".to_string()
                } else {
                    self.format_number(file.lines)
                },
                tokens: self.format_number(estimate_tokens(file.chars)),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        format!(
            "FILES WRITTEN\n{}\n\nSUMMARY\n{}",
            self.create_files_table(report),
            self.create_summary_table(report)
        )
    }
}
