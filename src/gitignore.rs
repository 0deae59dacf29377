/*!
 * Ignore-rule resolution
 *
 * A matcher is a stack of gitignore layers: one per `.gitignore` found between
 * a directory and the filesystem root, followed by the built-in set and any
 * caller-supplied patterns. Layers are evaluated root-first and the last layer
 * that matches a path decides whether it is ignored.
 */

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder, Glob};
use ignore::Match;
use tracing::{debug, warn};

use crate::error::Result;
use crate::utils::DEFAULT_IGNORE;

/// Name of the per-directory ignore file
pub const IGNORE_FILE: &str = ".gitignore";

/// Immutable ignore predicate for paths below an anchor directory
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    /// Directory relative paths are resolved against
    anchor: PathBuf,
    /// Rule layers, lowest precedence first
    layers: Vec<Gitignore>,
}

impl IgnoreMatcher {
    /// Build a matcher for `dir`, resolving relative paths against `dir` itself
    pub fn new(dir: &Path, extra_patterns: &[String]) -> Result<Self> {
        Self::build(dir, dir, extra_patterns)
    }

    /// Build a matcher from the `.gitignore` files of `dir` and its ancestors.
    ///
    /// Built-in and extra patterns are rooted at `anchor`, which must be `dir`
    /// or one of its ancestors.
    pub fn build(dir: &Path, anchor: &Path, extra_patterns: &[String]) -> Result<Self> {
        let dir = absolute(dir);
        let anchor = absolute(anchor);

        let mut layers: Vec<Gitignore> = dir
            .ancestors()
            .filter_map(|ancestor| {
                let ignore_file = ancestor.join(IGNORE_FILE);
                ignore_file.is_file().then(|| load_ignore_file(ancestor, &ignore_file))
            })
            .collect();
        // Discovered leaf-to-root; closer files must win
        layers.reverse();

        let mut builder = GitignoreBuilder::new(&anchor);
        for pattern in DEFAULT_IGNORE.iter().copied() {
            builder.add_line(None, pattern)?;
        }
        for pattern in extra_patterns {
            builder.add_line(None, pattern)?;
        }
        layers.push(builder.build()?);

        debug!(
            "Built ignore matcher for {} with {} layers",
            dir.display(),
            layers.len()
        );

        Ok(Self { anchor, layers })
    }

    /// Check a path, absolute or relative to the anchor.
    ///
    /// Parent directories below the anchor are considered too, so a rule
    /// ignoring `target` also ignores `target/debug/app`. The anchor and the
    /// directories above it are never matched themselves, which keeps an
    /// ignored anchor's own contents visible.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.anchor.join(path)
        };

        self.layers
            .iter()
            .filter(|layer| path.starts_with(layer.path()))
            .fold(false, |ignored, layer| {
                match self.matched_below_anchor(layer, &path, is_dir) {
                    Match::Ignore(_) => true,
                    Match::Whitelist(_) => false,
                    Match::None => ignored,
                }
            })
    }

    /// First match for `path` or one of its parents, stopping at the anchor
    fn matched_below_anchor<'a>(
        &self,
        layer: &'a Gitignore,
        path: &Path,
        is_dir: bool,
    ) -> Match<&'a Glob> {
        let mut current = Some(path);
        let mut current_is_dir = is_dir;

        while let Some(candidate) = current {
            if candidate == self.anchor || !candidate.starts_with(&self.anchor) {
                break;
            }

            let matched = layer.matched(candidate, current_is_dir);
            if !matched.is_none() {
                return matched;
            }

            current = candidate.parent();
            current_is_dir = true;
        }

        Match::None
    }
}

/// Compile one `.gitignore` file rooted at the directory containing it
fn load_ignore_file(root: &Path, ignore_file: &Path) -> Gitignore {
    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(ignore_file) {
        warn!("Skipping invalid rules in {}: {}", ignore_file.display(), err);
    }
    builder.build().unwrap_or_else(|err| {
        warn!("Failed to compile {}: {}", ignore_file.display(), err);
        Gitignore::empty()
    })
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
