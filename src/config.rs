/*!
 * Configuration handling for usefullm
 *
 * Holds the command-line surface and the persisted LLM endpoint settings.
 * Settings resolve per call as environment over file over defaults.
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::error::{Result, UsefullmError};
use crate::llm::DEFAULT_MAX_TOKENS;
use crate::scanner::DEFAULT_MAX_DEPTH;
use crate::utils::state_dir;

/// Default chat-completion endpoint (a local Ollama server)
pub const DEFAULT_URL: &str = "http://127.0.0.1:11434/v1/chat/completions";

/// Default model name
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Environment variable overriding the endpoint URL
pub const ENV_URL: &str = "LLM_URL";

/// Environment variable overriding the API key
pub const ENV_API_KEY: &str = "LLM_API_KEY";

/// Environment variable overriding the model
pub const ENV_MODEL: &str = "LLM_MODEL";

/// File name of the persisted settings
pub const CONFIG_FILE: &str = "config.json";

/// Command-line arguments for usefullm
#[derive(Parser, Debug, Clone)]
#[command(
    name = "usefullm",
    version = env!("CARGO_PKG_VERSION"),
    about = "CLI tool for speeding up your workflows when working with LLMs",
    long_about = "Copies directory contents and trees to the clipboard in LLM-friendly formats, summarizes files through a configurable LLM endpoint and keeps the last outputs for re-copying."
)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Copy directory contents in markdown format to clipboard
    Cpdir {
        /// Directory to copy
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Include all files, ignoring .gitignore
        #[arg(short, long)]
        all: bool,
    },

    /// Generate a directory tree
    Dirtree {
        /// Directory to analyze
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Maximum depth
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,

        /// Patterns to ignore
        #[arg(short, long, num_args = 1..)]
        ignore: Vec<String>,

        /// Include all files, ignoring .gitignore rules
        #[arg(short, long)]
        all: bool,

        /// Output format (markdown, xml, ascii)
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },

    /// Summarize a file or directory
    Summ {
        /// Path to summarize
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Maximum tokens per summary
        #[arg(short, long, default_value_t = DEFAULT_MAX_TOKENS)]
        tokens: u32,

        /// Include all files, ignoring .gitignore rules
        #[arg(short, long)]
        all: bool,
    },

    /// View or update configuration
    Config {
        /// Config key to view/set (url, key, or model)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// View command history or copy a specific history item
    History {
        /// Index of history item to copy (1-5)
        index: Option<usize>,
    },

    /// Copy most recent command output to clipboard
    Last,

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settable configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ConfigKey {
    /// Endpoint URL
    Url,
    /// API key
    Key,
    /// Model name
    Model,
}

impl ConfigKey {
    /// Parse a key name, failing with an invalid-argument error
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| {
            UsefullmError::InvalidArgument(format!(
                "Invalid key '{}'. Use \"url\", \"key\", or \"model\".",
                name
            ))
        })
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Key => "API Key",
            Self::Model => "Model",
        }
    }
}

/// Resolved LLM settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// Chat-completion endpoint
    pub url: String,
    /// Bearer token; empty means unset
    pub api_key: String,
    /// Model name
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl LlmConfig {
    /// Value for a settable key
    pub fn value(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Url => &self.url,
            ConfigKey::Key => &self.api_key,
            ConfigKey::Model => &self.model,
        }
    }
}

/// One source of LLM settings; `None` or empty fields are unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl LlmLayer {
    /// Snapshot of the `LLM_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a layer from an arbitrary variable lookup
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            url: lookup(ENV_URL),
            api_key: lookup(ENV_API_KEY),
            model: lookup(ENV_MODEL),
        }
    }

    /// Layer holding a single key
    pub fn with_value(key: ConfigKey, value: &str) -> Self {
        let value = Some(value.to_string());
        match key {
            ConfigKey::Url => Self {
                url: value,
                ..Self::default()
            },
            ConfigKey::Key => Self {
                api_key: value,
                ..Self::default()
            },
            ConfigKey::Model => Self {
                model: value,
                ..Self::default()
            },
        }
    }

    /// Fields of `self` take precedence over `base`
    pub fn merged_over(&self, base: &LlmLayer) -> LlmLayer {
        LlmLayer {
            url: self.url.clone().or_else(|| base.url.clone()),
            api_key: self.api_key.clone().or_else(|| base.api_key.clone()),
            model: self.model.clone().or_else(|| base.model.clone()),
        }
    }

    fn from_defaults(defaults: &LlmConfig) -> Self {
        Self {
            url: Some(defaults.url.clone()),
            api_key: Some(defaults.api_key.clone()),
            model: Some(defaults.model.clone()),
        }
    }
}

/// Persisted file shape: `{ "llm": { "url", "apiKey", "model" } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    llm: LlmLayer,
}

/// Resolve settings field by field: environment, then persisted, then defaults
pub fn resolve(env: &LlmLayer, persisted: Option<&LlmLayer>, defaults: &LlmConfig) -> LlmConfig {
    fn pick(candidates: [Option<&String>; 2], default: &str) -> String {
        candidates
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    let persisted = persisted.cloned().unwrap_or_default();
    LlmConfig {
        url: pick([env.url.as_ref(), persisted.url.as_ref()], &defaults.url),
        api_key: pick(
            [env.api_key.as_ref(), persisted.api_key.as_ref()],
            &defaults.api_key,
        ),
        model: pick([env.model.as_ref(), persisted.model.as_ref()], &defaults.model),
    }
}

/// Persisted settings file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Path of the JSON file
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user location (`~/.usefullm/config.json`)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(state_dir()?.join(CONFIG_FILE)))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with default settings if it does not exist yet
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        debug!("Creating default config at {}", self.path.display());
        self.write(&LlmLayer::from_defaults(&LlmConfig::default()))
    }

    /// Persisted layer, or `None` if the file cannot be parsed
    pub fn read_persisted(&self) -> Result<Option<LlmLayer>> {
        self.ensure_exists()?;
        let content = fs::read_to_string(&self.path)?;

        match serde_json::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Some(file.llm)),
            Err(e) => {
                warn!("Error reading config file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Settings resolved against the process environment
    pub fn load(&self) -> Result<LlmConfig> {
        self.load_with_env(&LlmLayer::from_env())
    }

    /// Settings resolved against an explicit environment snapshot
    pub fn load_with_env(&self, env: &LlmLayer) -> Result<LlmConfig> {
        let persisted = self.read_persisted()?;
        Ok(resolve(env, persisted.as_ref(), &LlmConfig::default()))
    }

    /// Merge `partial` over the persisted values and rewrite the file
    pub fn update(&self, partial: &LlmLayer) -> Result<LlmLayer> {
        let current = self
            .read_persisted()?
            .unwrap_or_else(|| LlmLayer::from_defaults(&LlmConfig::default()));
        let updated = partial.merged_over(&current);
        self.write(&updated)?;
        Ok(updated)
    }

    fn write(&self, layer: &LlmLayer) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = ConfigFile { llm: layer.clone() };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}
