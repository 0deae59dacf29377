/*!
 * `config` command: view and update the LLM endpoint settings
 *
 * The API key is never printed, only whether it is set.
 */

use crate::config::{ConfigKey, LlmLayer};
use crate::error::Result;

use super::App;

const MASKED: &str = "********";
const NOT_SET: &str = "Not set";
const USAGE_HINT: &str = "Set a value using: usefullm config [url|key|model] [value]";

fn or_not_set(value: &str) -> &str {
    if value.is_empty() {
        NOT_SET
    } else {
        value
    }
}

fn masked(api_key: &str) -> &str {
    if api_key.is_empty() {
        NOT_SET
    } else {
        MASKED
    }
}

impl App<'_> {
    /// Show all settings, show one, clear the API key or set a value
    pub fn config(&self, key: Option<&str>, value: Option<&str>) -> Result<String> {
        let Some(key) = key else {
            let current = self.config.load()?;
            return Ok(format!(
                "LLM Configuration:\n\n  LLM URL: {}\n  API Key: {}\n  Model: {}\n\n{}",
                or_not_set(&current.url),
                masked(&current.api_key),
                or_not_set(&current.model),
                USAGE_HINT
            ));
        };

        let key = ConfigKey::parse(key)?;

        match (key, value.filter(|v| !v.is_empty())) {
            (ConfigKey::Key, None) => {
                self.config.update(&LlmLayer::with_value(ConfigKey::Key, ""))?;
                Ok("API Key cleared successfully.".to_string())
            }
            (key, None) => {
                let current = self.config.load()?;
                Ok(format!(
                    "{}: {}\n\n{}",
                    key.label(),
                    or_not_set(current.value(key)),
                    USAGE_HINT
                ))
            }
            (key, Some(value)) => {
                self.config.update(&LlmLayer::with_value(key, value))?;
                Ok(format!("{} updated successfully.", key.label()))
            }
        }
    }
}
