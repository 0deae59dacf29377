/*!
 * Reporting functionality for usefullm
 *
 * Renders copy summaries and the history listing as console tables using
 * the tabled library.
 */

use chrono::{DateTime, Local};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::history::HistoryEntry;
use crate::scanner::ScanStatistics;
use crate::utils::format_number;

/// Render an RFC 3339 timestamp in local time, or verbatim if unparsable
pub fn format_timestamp(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|time| {
            time.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| timestamp.to_string())
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}

/// Summary table for a directory copy
pub fn copy_report(stats: &ScanStatistics) -> String {
    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "Metric")]
        key: &'static str,

        #[tabled(rename = "Value")]
        value: String,
    }

    let mut rows = vec![
        SummaryRow {
            key: "Files Copied",
            value: format_number(stats.files_loaded),
        },
        SummaryRow {
            key: "Characters",
            value: format_number(stats.total_chars),
        },
        SummaryRow {
            key: "LLM Tokens",
            value: format!("{} (estimated)", format_number(stats.total_tokens)),
        },
    ];

    let skipped = [
        ("Binary Skipped", stats.binary_skipped),
        ("Large Skipped", stats.large_skipped),
        ("Unreadable", stats.unreadable),
    ];
    rows.extend(
        skipped
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(key, count)| SummaryRow {
                key,
                value: format_number(count),
            }),
    );

    styled(Table::new(rows))
}

/// Table of stored history entries
pub fn history_table(entries: &[HistoryEntry]) -> String {
    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "#")]
        index: usize,

        #[tabled(rename = "Command")]
        command: String,

        #[tabled(rename = "Run At")]
        run_at: String,
    }

    let rows: Vec<HistoryRow> = entries
        .iter()
        .map(|entry| HistoryRow {
            index: entry.index,
            command: entry.record.command.clone(),
            run_at: format_timestamp(&entry.record.timestamp),
        })
        .collect();

    styled(Table::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryRecord;

    #[test]
    fn test_format_timestamp_fallback() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp("2024-03-01T10:00:00.000Z").len(), 19);
    }

    #[test]
    fn test_copy_report_lists_only_nonzero_skips() {
        let stats = ScanStatistics {
            files_loaded: 3,
            binary_skipped: 2,
            total_chars: 400,
            total_tokens: 100,
            ..ScanStatistics::default()
        };

        let report = copy_report(&stats);
        assert!(report.contains("Files Copied"));
        assert!(report.contains("100 (estimated)"));
        assert!(report.contains("Binary Skipped"));
        assert!(!report.contains("Large Skipped"));
    }

    #[test]
    fn test_history_table() {
        let entries = vec![HistoryEntry {
            index: 1,
            record: HistoryRecord {
                timestamp: "2024-03-01T10:00:00.000Z".to_string(),
                command: "dirtree . --format ascii".to_string(),
                output: String::new(),
            },
        }];

        let table = history_table(&entries);
        assert!(table.contains("Command"));
        assert!(table.contains("dirtree . --format ascii"));
    }
}
