/*!
 * Run summary reporting
 *
 * Renders the totals of a finished run as a console table using the tabled
 * library. The table goes to stderr so it never mixes with the echoed
 * report on stdout.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::extractor::ExtractionStats;

/// Totals for one completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Report file path
    pub output_file: String,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Per-file extraction totals
    pub stats: ExtractionStats,
    /// Directories that could not be listed
    pub denied_directories: usize,
}

/// Summary table generator
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Build the summary table
    pub fn generate_report(&self, summary: &RunSummary) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &summary.stats;
        let mut rows = vec![
            SummaryRow {
                key: "Output File",
                value: summary.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", summary.duration),
            },
            SummaryRow {
                key: "Files Visited",
                value: stats.files_visited.to_string(),
            },
            SummaryRow {
                key: "Extracted",
                value: stats.extracted.to_string(),
            },
        ];

        if stats.skipped_binary > 0 {
            rows.push(SummaryRow {
                key: "Skipped (binary)",
                value: stats.skipped_binary.to_string(),
            });
        }
        if stats.errors > 0 {
            rows.push(SummaryRow {
                key: "Read Errors",
                value: stats.errors.to_string(),
            });
        }
        if summary.denied_directories > 0 {
            rows.push(SummaryRow {
                key: "Unlistable Directories",
                value: summary.denied_directories.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("EXTRACTION COMPLETE\n{}", table)
    }

    /// Print the summary to stderr
    pub fn print_report(&self, summary: &RunSummary) {
        eprintln!("\n{}", self.generate_report(summary));
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
