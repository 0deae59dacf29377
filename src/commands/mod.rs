/*!
 * Command implementations
 *
 * Each command returns the status text to print. Commands that produce output
 * copy it to the clipboard and record it in history.
 */

mod cpdir;
mod dirtree;
mod history;
mod settings;
mod summ;

pub use dirtree::DirtreeOptions;
pub use summ::SummOptions;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::clipboard::Clipboard;
use crate::config::{Args, ConfigStore};
use crate::error::Result;
use crate::history::HistoryStore;

/// Shared state for running commands
pub struct App<'a> {
    /// Where output is copied
    pub clipboard: &'a dyn Clipboard,
    /// Command history
    pub history: HistoryStore,
    /// Persisted LLM settings
    pub config: ConfigStore,
}

impl<'a> App<'a> {
    /// Create an app from explicit collaborators
    pub fn new(clipboard: &'a dyn Clipboard, history: HistoryStore, config: ConfigStore) -> Self {
        Self {
            clipboard,
            history,
            config,
        }
    }

    /// Copy `output` and remember it under `command`
    fn publish(&self, command: &str, output: &str) -> Result<()> {
        self.clipboard.copy_to_clipboard(output)?;
        self.history.save(command, output)?;
        debug!("Published {} bytes for `{}`", output.len(), command);
        Ok(())
    }
}

/// Shell completion script for the CLI
pub fn completions(shell: Shell) -> String {
    let mut buffer = Vec::new();
    generate(shell, &mut Args::command(), "usefullm", &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
