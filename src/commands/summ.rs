/*!
 * `summ` command: summarize a file or every file under a directory
 *
 * Files of a directory are summarized one at a time. A failing file is
 * reported inline and the rest of the batch continues.
 */

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::error::Result;
use crate::gitignore::IgnoreMatcher;
use crate::llm::{Summarizer, DEFAULT_MAX_TOKENS};
use crate::scanner::{load_file, LoadedFile, ScanOptions, Scanner};
use crate::utils::format_file_size;

use super::App;

/// Separator between per-file summaries
const SUMMARY_SEPARATOR: &str = "\n---\n\n";

/// Arguments of the `summ` command
#[derive(Debug, Clone)]
pub struct SummOptions {
    pub path: PathBuf,
    pub tokens: u32,
    pub all: bool,
}

impl Default for SummOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            tokens: DEFAULT_MAX_TOKENS,
            all: false,
        }
    }
}

impl SummOptions {
    fn command_line(&self) -> String {
        let mut command = format!("summ {}", self.path.display());
        if self.tokens != DEFAULT_MAX_TOKENS {
            command.push_str(&format!(" -t {}", self.tokens));
        }
        if self.all {
            command.push_str(" --all");
        }
        command
    }
}

impl App<'_> {
    /// Summarize a file, or every file of a directory, and copy the result
    pub fn summ(&self, options: &SummOptions, summarizer: &dyn Summarizer) -> Result<String> {
        crate::ensure!(options.path.exists(), NotFound, "{}", options.path.display());

        let result = if options.path.is_dir() {
            summarize_dir(options, summarizer)?
        } else {
            summarize_single(options, summarizer)?
        };

        self.publish(&options.command_line(), &result)?;
        Ok("Copied summary to clipboard".to_string())
    }
}

fn summarize_single(options: &SummOptions, summarizer: &dyn Summarizer) -> Result<String> {
    let path = fs::canonicalize(&options.path)?;

    if !options.all {
        let parent = path.parent().unwrap_or(Path::new("/"));
        let matcher = IgnoreMatcher::new(parent, &[])?;
        crate::ensure!(
            !matcher.is_ignored(&path, false),
            Ignored,
            "{}",
            options.path.display()
        );
    }

    match load_file(&path)? {
        LoadedFile::Text(content) => summarizer.summarize(&content, options.tokens),
        LoadedFile::Binary => {
            crate::bail!(InvalidArgument, "Cannot summarize binary file: {}", options.path.display())
        }
        LoadedFile::TooLarge(size) => crate::bail!(
            InvalidArgument,
            "File too large to summarize: {} ({})",
            options.path.display(),
            format_file_size(size)
        ),
    }
}

fn summarize_dir(options: &SummOptions, summarizer: &dyn Summarizer) -> Result<String> {
    let scanner = Scanner::new(
        &options.path,
        ScanOptions {
            include_all: options.all,
            ..ScanOptions::default()
        },
    )?;
    let files = scanner.list_files()?;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {pos}/{len} {wide_msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.println(format!("Found {} files to summarize...", files.len()));

    let mut summaries = Vec::new();
    for file in &files {
        progress.set_message(format!("Summarizing {}...", file));

        match summarize_file(&scanner.root().join(file), options.tokens, summarizer) {
            Ok(Some(summary)) => summaries.push(format!("File: {}\n{}\n", file, summary)),
            Ok(None) => {}
            Err(e) => {
                warn!("Error summarizing {}: {}", file, e);
                summaries.push(format!("File: {}\nError: Could not summarize file\n", file));
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(summaries.join(SUMMARY_SEPARATOR))
}

/// Summary of one file, or `None` when it is binary or oversized
fn summarize_file(path: &Path, max_tokens: u32, summarizer: &dyn Summarizer) -> Result<Option<String>> {
    match load_file(path)? {
        LoadedFile::Text(content) => summarizer.summarize(&content, max_tokens).map(Some),
        LoadedFile::Binary => Ok(None),
        LoadedFile::TooLarge(size) => {
            warn!("Skipping large file: {} ({})", path.display(), format_file_size(size));
            Ok(None)
        }
    }
}
