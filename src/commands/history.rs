/*!
 * `history` and `last` commands: re-copy stored outputs
 */

use crate::error::Result;
use crate::history::{HistoryRecord, MAX_HISTORY};
use crate::report::{format_timestamp, history_table};

use super::App;

const NO_HISTORY: &str = "No command history found";

impl App<'_> {
    /// List history, or copy the output stored in slot `index`
    pub fn history(&self, index: Option<usize>) -> Result<String> {
        let Some(index) = index else {
            let entries = self.history.get_all();
            if entries.is_empty() {
                return Ok(NO_HISTORY.to_string());
            }

            return Ok(format!(
                "Command History:\n\n{}\n\nUse \"usefullm history <number>\" to copy a specific item to clipboard",
                history_table(&entries)
            ));
        };

        crate::ensure!(
            (1..=MAX_HISTORY).contains(&index),
            InvalidArgument,
            "History index must be between 1 and {}",
            MAX_HISTORY
        );

        match self.history.get(index) {
            Some(record) => {
                self.clipboard.copy_to_clipboard(&record.output)?;
                Ok(copied_message("Copied output from command", &record))
            }
            None => Ok(format!("No history item found at position {}", index)),
        }
    }

    /// Copy the most recent output again
    pub fn last(&self) -> Result<String> {
        match self.history.most_recent() {
            Some(record) => {
                self.clipboard.copy_to_clipboard(&record.output)?;
                Ok(copied_message(
                    "Copied last output to clipboard from command",
                    &record,
                ))
            }
            None => Ok(NO_HISTORY.to_string()),
        }
    }
}

fn copied_message(prefix: &str, record: &HistoryRecord) -> String {
    format!(
        "{}: {}\nRun at: {}",
        prefix,
        record.command,
        format_timestamp(&record.timestamp)
    )
}
