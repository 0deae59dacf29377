/*!
 * `dirtree` command: copy a rendering of a directory tree
 */

use std::path::PathBuf;

use crate::error::Result;
use crate::scanner::{ScanOptions, Scanner, DEFAULT_MAX_DEPTH};
use crate::tree::format_tree;
use crate::types::TreeFormat;
use crate::utils::display_name;

use super::App;

/// Arguments of the `dirtree` command
#[derive(Debug, Clone)]
pub struct DirtreeOptions {
    pub dir: PathBuf,
    pub depth: usize,
    pub ignore: Vec<String>,
    pub all: bool,
    pub format: String,
}

impl Default for DirtreeOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            depth: DEFAULT_MAX_DEPTH,
            ignore: Vec::new(),
            all: false,
            format: TreeFormat::default().to_string(),
        }
    }
}

impl DirtreeOptions {
    /// Command line echoed into history; defaults are omitted
    fn command_line(&self) -> String {
        let mut command = format!("dirtree {}", self.dir.display());
        if self.all {
            command.push_str(" --all");
        }
        if self.depth != DEFAULT_MAX_DEPTH {
            command.push_str(&format!(" --depth {}", self.depth));
        }
        if !self.ignore.is_empty() {
            command.push_str(&format!(" --ignore {}", self.ignore.join(" ")));
        }
        if self.format != TreeFormat::default().to_string() {
            command.push_str(&format!(" --format {}", self.format));
        }
        command
    }
}

impl App<'_> {
    /// Copy a rendering of the directory tree under `options.dir`
    pub fn dirtree(&self, options: &DirtreeOptions) -> Result<String> {
        let format = TreeFormat::parse(&options.format)?;

        let scanner = Scanner::new(
            &options.dir,
            ScanOptions {
                max_depth: options.depth,
                include_all: options.all,
                ignore_patterns: options.ignore.clone(),
            },
        )?;

        let files = scanner.list_files()?;
        let output = format_tree(&files, format, &display_name(scanner.root()))?;

        self.publish(&options.command_line(), &output)?;

        Ok(format!(
            "Directory tree in {} copied to clipboard",
            scanner.root().display()
        ))
    }
}
