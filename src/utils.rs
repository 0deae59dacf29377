/*!
 * Utility functions for usefullm
 */

use std::env;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;

use crate::error::Result;

/// Environment variable overriding the per-user state directory
pub const HOME_ENV: &str = "USEFULLM_HOME";

/// Patterns ignored on every enumeration unless `--all` is given
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".gitignore",
        // OS Files
        ".DS_Store",
        // Lockfiles
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "Cargo.lock",
    ]
});

/// Directory holding config and history (`$USEFULLM_HOME` or `~/.usefullm`)
pub fn state_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(HOME_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let home = dirs::home_dir()
        .ok_or_else(|| crate::error!(Config, "Could not determine home directory"))?;
    Ok(home.join(".usefullm"))
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Last component of a path, falling back to the full display form
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Rough token estimate (four characters per token)
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
