/*!
 * Bounded command history
 *
 * The last [`MAX_HISTORY`] command outputs are kept in a fixed ring persisted
 * as a single JSON file. Slot 1 is always the most recent record. Every save
 * rewrites the whole file through a temporary file and a rename, so readers
 * never observe a partially rotated ring.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::utils::state_dir;

/// Number of slots kept
pub const MAX_HISTORY: usize = 5;

/// File name of the persisted ring
pub const HISTORY_FILE: &str = "history.json";

/// One recorded command invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// RFC 3339 UTC timestamp of the save
    pub timestamp: String,
    /// Command line that produced the output
    pub command: String,
    /// Text that was copied to the clipboard
    pub output: String,
}

/// A record annotated with its slot (1 = most recent)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Slot index
    pub index: usize,
    /// Stored record
    pub record: HistoryRecord,
}

/// Fixed-size ring of optional records with a write cursor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryRing {
    /// Physical position of the next write
    cursor: usize,
    /// Physical storage
    slots: [Option<HistoryRecord>; MAX_HISTORY],
}

impl HistoryRing {
    fn push(&mut self, record: HistoryRecord) {
        self.slots[self.cursor] = Some(record);
        self.cursor = (self.cursor + 1) % MAX_HISTORY;
    }

    /// Record in logical slot `index` (1..=MAX_HISTORY)
    fn get(&self, index: usize) -> Option<&HistoryRecord> {
        if !(1..=MAX_HISTORY).contains(&index) {
            return None;
        }
        let physical = (self.cursor + MAX_HISTORY - index) % MAX_HISTORY;
        self.slots[physical].as_ref()
    }

    fn is_valid(&self) -> bool {
        self.cursor < MAX_HISTORY
    }
}

/// On-disk history store
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// Directory holding the ring file
    dir: PathBuf,
}

impl HistoryStore {
    /// Store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at the per-user location (`~/.usefullm/history`)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(state_dir()?.join("history")))
    }

    /// Path of the ring file
    pub fn path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Record a command's output as the new most recent entry.
    ///
    /// The oldest record is dropped once all slots are full.
    pub fn save(&self, command: &str, output: &str) -> Result<HistoryRecord> {
        let record = HistoryRecord {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            command: command.to_string(),
            output: output.to_string(),
        };

        let mut ring = self.load();
        ring.push(record.clone());
        self.write(&ring)?;

        debug!("Saved history entry for `{}`", command);
        Ok(record)
    }

    /// Record in slot `index`; absent if out of range, missing or unreadable
    pub fn get(&self, index: usize) -> Option<HistoryRecord> {
        self.load().get(index).cloned()
    }

    /// All present records, most recent first
    pub fn get_all(&self) -> Vec<HistoryEntry> {
        let ring = self.load();
        (1..=MAX_HISTORY)
            .filter_map(|index| {
                ring.get(index).map(|record| HistoryEntry {
                    index,
                    record: record.clone(),
                })
            })
            .collect()
    }

    /// Slot 1, if present
    pub fn most_recent(&self) -> Option<HistoryRecord> {
        self.get(1)
    }

    fn load(&self) -> HistoryRing {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return HistoryRing::default(),
            Err(e) => {
                warn!("Error reading history file {}: {}", path.display(), e);
                return HistoryRing::default();
            }
        };

        if content.trim().is_empty() {
            return HistoryRing::default();
        }

        match serde_json::from_str::<HistoryRing>(&content) {
            Ok(ring) if ring.is_valid() => ring,
            Ok(_) => {
                warn!("Ignoring history file {} with invalid cursor", path.display());
                HistoryRing::default()
            }
            Err(e) => {
                warn!("Error parsing history file {}: {}", path.display(), e);
                HistoryRing::default()
            }
        }
    }

    fn write(&self, ring: &HistoryRing) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        write_atomic(&self.path(), &serde_json::to_string_pretty(ring)?)?;
        Ok(())
    }
}

/// Write through a sibling temporary file so the target is replaced whole
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)
}
