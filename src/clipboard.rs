/*!
 * Clipboard support for usefullm
 *
 * Writes text to the system clipboard by piping it into whichever clipboard
 * command the platform provides.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Destination for copied text
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Clipboard commands, in order of preference per platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardProvider {
    /// tmux paste buffer
    Tmux,
    /// Wayland clipboard
    Wayland,
    /// X11 clipboard with xsel
    Xsel,
    /// X11 clipboard with xclip
    Xclip,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (native or via WSL)
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        execute_clipboard_command(cmd, args, text)
    }
}

/// The system clipboard, resolved on each copy
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let provider = determine_clipboard_providers()
            .into_iter()
            .next()
            .ok_or(ClipboardError::NoClipboardFound)?;

        debug!("Copying {} bytes with {:?}", text.len(), provider);
        provider.copy_to_clipboard(text)
    }
}

/// Check if a command exists on the system `PATH`
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

/// Pipe `text` into a clipboard command and wait for it to finish
fn execute_clipboard_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    {
        let stdin = child.stdin.as_mut().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin.write_all(text.as_bytes())?;
    }
    // Close stdin so the command sees EOF
    drop(child.stdin.take());

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

/// Available providers for the current platform, most preferred first
fn determine_clipboard_providers() -> Vec<ClipboardProvider> {
    let mut candidates = Vec::new();

    if env::var_os("TMUX").is_some() {
        candidates.push(ClipboardProvider::Tmux);
    }

    if cfg!(target_os = "macos") {
        candidates.push(ClipboardProvider::MacOS);
    } else if cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some() {
        candidates.push(ClipboardProvider::Windows);
    } else if cfg!(target_os = "android") {
        candidates.push(ClipboardProvider::Termux);
    } else {
        if env::var_os("WAYLAND_DISPLAY").is_some() {
            candidates.push(ClipboardProvider::Wayland);
        }
        candidates.extend([ClipboardProvider::Xsel, ClipboardProvider::Xclip]);
    }

    candidates
        .into_iter()
        .filter(|provider| command_exists(provider.command().0))
        .collect()
}
