/*!
 * Directory enumeration and file loading
 */

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::gitignore::IgnoreMatcher;
use crate::types::TextFile;
use crate::utils::{estimate_tokens, format_file_size, to_slash_path};

/// Default directory depth for enumeration
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Files larger than this many bytes are not loaded
pub const MAX_FILE_SIZE: u64 = 100_000;

/// Number of leading bytes inspected when sniffing for binary content
const SNIFF_LEN: u64 = 8192;

/// Options controlling which files are enumerated
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum depth; a file directly under the root has depth 1
    pub max_depth: usize,
    /// Skip ignore-rule filtering entirely
    pub include_all: bool,
    /// Extra gitignore-style patterns
    pub ignore_patterns: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            include_all: false,
            ignore_patterns: Vec::new(),
        }
    }
}

/// Counters collected while loading files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Text files loaded
    pub files_loaded: usize,
    /// Binary files skipped
    pub binary_skipped: usize,
    /// Files over [`MAX_FILE_SIZE`] skipped
    pub large_skipped: usize,
    /// Files that failed to read
    pub unreadable: usize,
    /// Characters across loaded files
    pub total_chars: usize,
    /// Estimated LLM tokens across loaded files
    pub total_tokens: usize,
}

/// Outcome of loading a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedFile {
    /// UTF-8 text content
    Text(String),
    /// Content sniffed as binary
    Binary,
    /// File exceeds the size ceiling (size in bytes)
    TooLarge(u64),
}

/// Scanner for a single root directory
pub struct Scanner {
    /// Canonical root directory
    root: PathBuf,
    /// Enumeration options
    options: ScanOptions,
}

impl Scanner {
    /// Create a scanner, failing if `dir` is missing or not a directory, or
    /// if the depth would exclude every file
    pub fn new(dir: &Path, options: ScanOptions) -> Result<Self> {
        crate::ensure!(dir.exists(), NotFound, "{}", dir.display());
        crate::ensure!(dir.is_dir(), NotADirectory, "{}", dir.display());
        crate::ensure!(
            options.max_depth >= 1,
            InvalidArgument,
            "Depth must be at least 1, got {}",
            options.max_depth
        );

        Ok(Self {
            root: fs::canonicalize(dir)?,
            options,
        })
    }

    /// Canonical root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List files below the root as `/`-separated relative paths.
    ///
    /// Symbolic links are neither listed nor followed and hidden files are
    /// included. Unless `include_all` is set, each path is checked against the
    /// ignore rules of its own containing directory.
    pub fn list_files(&self) -> Result<Vec<String>> {
        let mut matchers: HashMap<PathBuf, IgnoreMatcher> = HashMap::new();
        let mut files = Vec::new();

        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.options.max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if !file_type.is_dir() && !file_type.is_file() {
                continue;
            }

            if !self.options.include_all {
                let parent = entry.path().parent().unwrap_or(&self.root);
                let matcher = self.matcher_for(&mut matchers, parent)?;
                if matcher.is_ignored(entry.path(), file_type.is_dir()) {
                    debug!("Ignoring {}", entry.path().display());
                    if file_type.is_dir() {
                        walker.skip_current_dir();
                    }
                    continue;
                }
            }

            if file_type.is_file() {
                if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                    files.push(to_slash_path(relative));
                }
            }
        }

        debug!("Enumerated {} files under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Load the text content of `files`, skipping binary, oversized and
    /// unreadable files
    pub fn load_text_files(&self, files: &[String]) -> (Vec<TextFile>, ScanStatistics) {
        let mut stats = ScanStatistics::default();
        let mut loaded = Vec::new();

        for file in files {
            match load_file(&self.root.join(file)) {
                Ok(LoadedFile::Text(content)) => {
                    stats.files_loaded += 1;
                    stats.total_chars += content.chars().count();
                    stats.total_tokens += estimate_tokens(&content);
                    loaded.push(TextFile {
                        path: file.clone(),
                        content,
                    });
                }
                Ok(LoadedFile::Binary) => {
                    debug!("Skipping binary file: {}", file);
                    stats.binary_skipped += 1;
                }
                Ok(LoadedFile::TooLarge(size)) => {
                    warn!("Skipping large file: {} ({})", file, format_file_size(size));
                    stats.large_skipped += 1;
                }
                Err(e) => {
                    warn!("Error reading {}: {}", file, e);
                    stats.unreadable += 1;
                }
            }
        }

        (loaded, stats)
    }

    fn matcher_for<'a>(
        &self,
        matchers: &'a mut HashMap<PathBuf, IgnoreMatcher>,
        dir: &Path,
    ) -> Result<&'a IgnoreMatcher> {
        let matcher = match matchers.entry(dir.to_path_buf()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(IgnoreMatcher::build(
                dir,
                &self.root,
                &self.options.ignore_patterns,
            )?),
        };
        Ok(matcher)
    }
}

/// Load a file for aggregation: binary check first, then the size ceiling
pub fn load_file(path: &Path) -> io::Result<LoadedFile> {
    if is_binary(path)? {
        return Ok(LoadedFile::Binary);
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE {
        return Ok(LoadedFile::TooLarge(size));
    }

    Ok(LoadedFile::Text(fs::read_to_string(path)?))
}

/// Sniff the leading bytes of a file for binary content
pub fn is_binary(path: &Path) -> io::Result<bool> {
    let mut buffer = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut buffer)?;
    Ok(looks_binary(&buffer))
}

/// Heuristic: NUL bytes, invalid UTF-8 or too many control characters
fn looks_binary(buffer: &[u8]) -> bool {
    if buffer.is_empty() {
        return false;
    }

    if buffer.contains(&0) {
        return true;
    }

    // A multi-byte sequence cut off by the sample window is still text
    if let Err(e) = std::str::from_utf8(buffer) {
        if e.error_len().is_some() {
            return true;
        }
    }

    let control_count = buffer
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();
    (control_count as f32 / buffer.len() as f32) >= 0.1
}
