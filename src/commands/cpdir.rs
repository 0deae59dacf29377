/*!
 * `cpdir` command: copy text file contents as markdown sections
 */

use std::path::Path;

use crate::error::Result;
use crate::report::copy_report;
use crate::scanner::{ScanOptions, Scanner};
use crate::writer::format_files;

use super::App;

impl App<'_> {
    /// Copy the text files under `dir` to the clipboard as markdown sections
    pub fn cpdir(&self, dir: &Path, all: bool) -> Result<String> {
        let scanner = Scanner::new(
            dir,
            ScanOptions {
                include_all: all,
                ..ScanOptions::default()
            },
        )?;

        let files = scanner.list_files()?;
        let (loaded, stats) = scanner.load_text_files(&files);
        let output = format_files(&loaded);

        let command = format!("cpdir {}{}", dir.display(), if all { " --all" } else { "" });
        self.publish(&command, &output)?;

        Ok(format!(
            "Successfully copied {} files to clipboard!\n\n{}",
            stats.files_loaded,
            copy_report(&stats)
        ))
    }
}
