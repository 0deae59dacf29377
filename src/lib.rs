/*!
 * usefullm - Speed up workflows that feed code to Large Language Models
 *
 * This library copies directory contents and directory trees to the clipboard
 * in LLM-friendly formats, summarizes files through a chat-completion
 * endpoint and keeps a small ring of recent outputs for re-copying.
 */

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod gitignore;
pub mod history;
pub mod llm;
pub mod prompts;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use clipboard::{Clipboard, SystemClipboard};
pub use commands::{App, DirtreeOptions, SummOptions};
pub use config::{ConfigStore, LlmConfig};
pub use error::{Result, UsefullmError};
pub use gitignore::IgnoreMatcher;
pub use history::{HistoryRecord, HistoryStore};
pub use llm::{LlmClient, Summarizer};
pub use scanner::{ScanOptions, Scanner};
pub use types::{FileTree, TextFile, TreeFormat};
