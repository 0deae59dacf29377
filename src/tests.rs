/*!
 * Tests for usefullm command flows
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::{tempdir, TempDir};

use crate::clipboard::tests::MemoryClipboard;
use crate::commands::{App, DirtreeOptions, SummOptions};
use crate::config::{ConfigKey, ConfigStore, LlmLayer, CONFIG_FILE};
use crate::error::{Result, UsefullmError};
use crate::history::HistoryStore;
use crate::llm::Summarizer;

/// Summarizer that echoes the first line and fails on request
struct FakeSummarizer;

impl Summarizer for FakeSummarizer {
    fn summarize(&self, content: &str, max_tokens: u32) -> Result<String> {
        if content.contains("FAIL") {
            crate::bail!(Llm, "500 Internal Server Error");
        }
        let first = content.lines().next().unwrap_or_default();
        Ok(format!("summary of {} ({})", first, max_tokens))
    }
}

/// Isolated clipboard, history and config
struct Fixture {
    state: TempDir,
    clipboard: MemoryClipboard,
}

impl Fixture {
    fn new() -> io::Result<Self> {
        Ok(Self {
            state: tempdir()?,
            clipboard: MemoryClipboard::default(),
        })
    }

    fn app(&self) -> App<'_> {
        App::new(
            &self.clipboard,
            HistoryStore::new(self.state.path().join("history")),
            ConfigStore::new(self.state.path().join(CONFIG_FILE)),
        )
    }
}

fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)?.write_all(content)
}

// a.txt is text, b.bin is binary, c.txt is ignored
fn setup_mixed_directory() -> io::Result<TempDir> {
    let dir = tempdir()?;
    write_file(&dir.path().join("a.txt"), b"hi")?;
    write_file(&dir.path().join("b.bin"), &[0x00, 0x01, 0x02])?;
    write_file(&dir.path().join("c.txt"), b"secret")?;
    write_file(&dir.path().join(".gitignore"), b"c.txt\n")?;
    Ok(dir)
}

#[test]
fn test_cpdir_copies_text_files_only() {
    let fixture = Fixture::new().unwrap();
    let dir = setup_mixed_directory().unwrap();

    let status = fixture.app().cpdir(dir.path(), false).unwrap();

    assert_eq!(fixture.clipboard.last().unwrap(), "## a.txt\n```\nhi\n```\n");
    assert!(status.starts_with("Successfully copied 1 files to clipboard!"));
}

#[test]
fn test_cpdir_all_includes_ignored_files() {
    let fixture = Fixture::new().unwrap();
    let dir = setup_mixed_directory().unwrap();

    fixture.app().cpdir(dir.path(), true).unwrap();

    let copied = fixture.clipboard.last().unwrap();
    assert!(copied.contains("## .gitignore\n"));
    assert!(copied.contains("## a.txt\n```\nhi\n```\n"));
    assert!(copied.contains("## c.txt\n```\nsecret\n```\n"));
    assert!(!copied.contains("b.bin"));
}

#[test]
fn test_cpdir_records_history() {
    let fixture = Fixture::new().unwrap();
    let dir = setup_mixed_directory().unwrap();
    let app = fixture.app();

    app.cpdir(dir.path(), false).unwrap();

    let record = app.history.most_recent().unwrap();
    assert_eq!(record.command, format!("cpdir {}", dir.path().display()));
    assert_eq!(record.output, "## a.txt\n```\nhi\n```\n");
}

#[test]
fn test_cpdir_inside_ignored_directory() {
    let fixture = Fixture::new().unwrap();
    let outer = tempdir().unwrap();
    write_file(&outer.path().join(".gitignore"), b"dist\n").unwrap();
    write_file(&outer.path().join("dist").join("bundle.js"), b"let x = 1;").unwrap();

    let status = fixture
        .app()
        .cpdir(&outer.path().join("dist"), false)
        .unwrap();

    assert!(status.starts_with("Successfully copied 1 files to clipboard!"));
    assert_eq!(
        fixture.clipboard.last().unwrap(),
        "## bundle.js\n```\nlet x = 1;\n```\n"
    );
}

#[test]
fn test_dirtree_inside_ignored_directory() {
    let fixture = Fixture::new().unwrap();
    let outer = tempdir().unwrap();
    write_file(&outer.path().join(".gitignore"), b"build\n*.log\n").unwrap();
    write_file(&outer.path().join("build").join("app.js"), b"").unwrap();
    write_file(&outer.path().join("build").join("debug.log"), b"").unwrap();

    fixture
        .app()
        .dirtree(&DirtreeOptions {
            dir: outer.path().join("build"),
            format: "ascii".to_string(),
            ..DirtreeOptions::default()
        })
        .unwrap();

    assert_eq!(fixture.clipboard.last().unwrap(), "build\n└── app.js\n");
}

#[test]
fn test_cpdir_missing_directory() {
    let fixture = Fixture::new().unwrap();
    let dir = tempdir().unwrap();

    let err = fixture.app().cpdir(&dir.path().join("missing"), false).unwrap_err();
    assert!(matches!(err, UsefullmError::NotFound(_)));
    assert!(fixture.clipboard.last().is_none());
}

#[test]
fn test_dirtree_ascii() {
    let fixture = Fixture::new().unwrap();
    let root = tempdir().unwrap();
    let project = root.path().join("project");
    write_file(&project.join("x").join("y.txt"), b"y").unwrap();
    write_file(&project.join("z.txt"), b"z").unwrap();

    let status = fixture
        .app()
        .dirtree(&DirtreeOptions {
            dir: project.clone(),
            format: "ascii".to_string(),
            ..DirtreeOptions::default()
        })
        .unwrap();

    assert_eq!(
        fixture.clipboard.last().unwrap(),
        "project\n├── x\n│   └── y.txt\n└── z.txt\n"
    );
    assert!(status.starts_with("Directory tree in "));
    assert!(status.ends_with("project copied to clipboard"));
}

#[test]
fn test_dirtree_ignore_patterns_and_depth() {
    let fixture = Fixture::new().unwrap();
    let root = tempdir().unwrap();
    let project = root.path().join("project");
    write_file(&project.join("README.md"), b"# readme").unwrap();
    write_file(&project.join("src").join("main.rs"), b"fn main() {}").unwrap();
    write_file(&project.join("src").join("deep").join("mod.rs"), b"").unwrap();

    fixture
        .app()
        .dirtree(&DirtreeOptions {
            dir: project,
            depth: 2,
            ignore: vec!["*.md".to_string()],
            ..DirtreeOptions::default()
        })
        .unwrap();

    assert_eq!(
        fixture.clipboard.last().unwrap(),
        "- project\n  - src\n    - main.rs\n"
    );
}

#[test]
fn test_dirtree_unsupported_format() {
    let fixture = Fixture::new().unwrap();
    let dir = setup_mixed_directory().unwrap();

    let err = fixture
        .app()
        .dirtree(&DirtreeOptions {
            dir: dir.path().to_path_buf(),
            format: "yaml".to_string(),
            ..DirtreeOptions::default()
        })
        .unwrap_err();

    assert!(matches!(err, UsefullmError::UnsupportedFormat(ref name) if name == "yaml"));
    assert!(fixture.clipboard.last().is_none());
    assert!(fixture.app().history.get_all().is_empty());
}

#[test]
fn test_summ_directory_reports_failures_inline() {
    let fixture = Fixture::new().unwrap();
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), b"alpha\nmore").unwrap();
    write_file(&dir.path().join("b.txt"), b"FAIL here").unwrap();
    write_file(&dir.path().join("c.bin"), &[0x00, 0xff]).unwrap();

    let status = fixture
        .app()
        .summ(
            &SummOptions {
                path: dir.path().to_path_buf(),
                tokens: 50,
                all: false,
            },
            &FakeSummarizer,
        )
        .unwrap();

    assert_eq!(status, "Copied summary to clipboard");
    assert_eq!(
        fixture.clipboard.last().unwrap(),
        "File: a.txt\nsummary of alpha (50)\n\n---\n\nFile: b.txt\nError: Could not summarize file\n"
    );
}

#[test]
fn test_summ_single_file() {
    let fixture = Fixture::new().unwrap();
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    write_file(&file, b"meeting notes").unwrap();

    let app = fixture.app();
    app.summ(
        &SummOptions {
            path: file.clone(),
            ..SummOptions::default()
        },
        &FakeSummarizer,
    )
    .unwrap();

    assert_eq!(
        fixture.clipboard.last().unwrap(),
        "summary of meeting notes (1000)"
    );
    assert_eq!(
        app.history.most_recent().unwrap().command,
        format!("summ {}", file.display())
    );
}

#[test]
fn test_summ_single_ignored_file() {
    let fixture = Fixture::new().unwrap();
    let dir = setup_mixed_directory().unwrap();

    let options = SummOptions {
        path: dir.path().join("c.txt"),
        ..SummOptions::default()
    };

    let err = fixture.app().summ(&options, &FakeSummarizer).unwrap_err();
    assert!(matches!(err, UsefullmError::Ignored(_)));
    assert!(fixture.clipboard.last().is_none());

    let options = SummOptions { all: true, ..options };
    fixture.app().summ(&options, &FakeSummarizer).unwrap();
    assert_eq!(fixture.clipboard.last().unwrap(), "summary of secret (1000)");
}

#[test]
fn test_summ_single_file_error_propagates() {
    let fixture = Fixture::new().unwrap();
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("bad.txt"), b"FAIL").unwrap();

    let err = fixture
        .app()
        .summ(
            &SummOptions {
                path: dir.path().join("bad.txt"),
                ..SummOptions::default()
            },
            &FakeSummarizer,
        )
        .unwrap_err();

    assert!(matches!(err, UsefullmError::Llm(_)));
    assert!(fixture.app().history.get_all().is_empty());
}

#[test]
fn test_summ_missing_path() {
    let fixture = Fixture::new().unwrap();
    let dir = tempdir().unwrap();

    let err = fixture
        .app()
        .summ(
            &SummOptions {
                path: dir.path().join("nope.txt"),
                ..SummOptions::default()
            },
            &FakeSummarizer,
        )
        .unwrap_err();
    assert!(matches!(err, UsefullmError::NotFound(_)));
}

#[test]
fn test_config_set_then_get() {
    let fixture = Fixture::new().unwrap();
    let app = fixture.app();

    assert_eq!(
        app.config(Some("url"), Some("http://x/v1/chat/completions")).unwrap(),
        "URL updated successfully."
    );

    let persisted = app.config.read_persisted().unwrap().unwrap();
    assert_eq!(persisted.url.as_deref(), Some("http://x/v1/chat/completions"));

    // The env layer is empty here so the persisted value wins
    let resolved = app.config.load_with_env(&LlmLayer::default()).unwrap();
    assert_eq!(resolved.url, "http://x/v1/chat/completions");
}

#[test]
fn test_config_key_is_masked_and_cleared() {
    let fixture = Fixture::new().unwrap();
    let app = fixture.app();

    app.config(Some("key"), Some("sk-secret")).unwrap();
    let listing = app.config(None, None).unwrap();
    assert!(listing.starts_with("LLM Configuration:"));
    assert!(!listing.contains("sk-secret"));

    assert_eq!(
        app.config(Some("key"), None).unwrap(),
        "API Key cleared successfully."
    );
    let persisted = app.config.read_persisted().unwrap().unwrap();
    assert_eq!(persisted.api_key.as_deref(), Some(""));
}

#[test]
fn test_config_rejects_unknown_key() {
    let fixture = Fixture::new().unwrap();
    let err = fixture.app().config(Some("token"), Some("x")).unwrap_err();
    assert!(matches!(err, UsefullmError::InvalidArgument(_)));
}

#[test]
fn test_config_update_keeps_other_fields() {
    let fixture = Fixture::new().unwrap();
    let app = fixture.app();

    app.config(Some("model"), Some("gpt-4o")).unwrap();
    app.config.update(&LlmLayer::with_value(ConfigKey::Url, "http://y")).unwrap();

    let persisted = app.config.read_persisted().unwrap().unwrap();
    assert_eq!(persisted.model.as_deref(), Some("gpt-4o"));
    assert_eq!(persisted.url.as_deref(), Some("http://y"));
}

#[test]
fn test_history_and_last() {
    let fixture = Fixture::new().unwrap();
    let app = fixture.app();

    assert_eq!(app.last().unwrap(), "No command history found");
    assert_eq!(app.history(None).unwrap(), "No command history found");

    app.history.save("cpdir old", "old output").unwrap();
    app.history.save("cpdir new", "new output").unwrap();

    let status = app.last().unwrap();
    assert!(status.starts_with("Copied last output to clipboard from command: cpdir new\nRun at: "));
    assert_eq!(fixture.clipboard.last().unwrap(), "new output");

    let status = app.history(Some(2)).unwrap();
    assert!(status.starts_with("Copied output from command: cpdir old\nRun at: "));
    assert_eq!(fixture.clipboard.last().unwrap(), "old output");

    let listing = app.history(None).unwrap();
    assert!(listing.contains("cpdir new"));
    assert!(listing.contains("cpdir old"));

    // Re-copying does not record a new entry
    assert_eq!(app.history.get_all().len(), 2);
}

#[test]
fn test_history_index_bounds() {
    let fixture = Fixture::new().unwrap();
    let app = fixture.app();
    app.history.save("cpdir .", "out").unwrap();

    assert_eq!(
        app.history(Some(4)).unwrap(),
        "No history item found at position 4"
    );
    assert!(matches!(
        app.history(Some(0)).unwrap_err(),
        UsefullmError::InvalidArgument(_)
    ));
    assert!(matches!(
        app.history(Some(6)).unwrap_err(),
        UsefullmError::InvalidArgument(_)
    ));
}
