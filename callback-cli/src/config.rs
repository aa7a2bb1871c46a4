//! Configuration loading and parsing

use anyhow::{Context, Result};
use callback_core::{CredentialTable, SinkConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Main demo configuration (loaded from a TOML file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub output: SinkConfig,
    #[serde(default)]
    pub accounts: CredentialTable,
    #[serde(default)]
    pub callbacks: Vec<CallbackConfig>,
    pub gate: GateConfig,
    #[serde(default)]
    pub closures: ClosuresConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

/// A declarative callback: what to do with a message template
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackConfig {
    pub name: String,
    #[serde(default)]
    pub action: CallbackAction,
    /// Template; `{0}`, `{1}`, ... are replaced by the call arguments
    pub message: String,
    /// Declared number of arguments
    #[serde(default)]
    pub arity: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackAction {
    /// Write the rendered message to the output sink
    #[default]
    Print,
    /// Emit the rendered message through the logger
    Log,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    pub identity: String,
    pub credential: String,
    /// Callback run when access is granted
    pub on_success: Option<String>,
    /// Callback run when access is denied; absent means the denial is an error
    pub on_error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClosuresConfig {
    /// One bound callback is made per greeting
    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,
    #[serde(default = "default_name")]
    pub name: String,
    /// How many times to call the stateful counter callback
    #[serde(default = "default_counter_calls")]
    pub counter_calls: u32,
}

impl Default for ClosuresConfig {
    fn default() -> Self {
        Self {
            greetings: default_greetings(),
            name: default_name(),
            counter_calls: default_counter_calls(),
        }
    }
}

fn default_greetings() -> Vec<String> {
    vec!["Hello".to_string(), "Bonjour".to_string()]
}

fn default_name() -> String {
    "world".to_string()
}

fn default_counter_calls() -> u32 {
    3
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TimelineConfig {
    /// Tweets: plain strings or tables such as `{ user = "ada", text = "hi" }`
    #[serde(default)]
    pub tweets: Vec<Value>,
    /// Callback (arity 1) invoked for every tweet
    pub on_each: Option<String>,
    /// Attribute to map over every tweet
    pub attribute: Option<String>,
}

const DEFAULT_CONFIG: &str = r#"
[accounts]
ada = "s3cret"

[[callbacks]]
name = "welcome"
message = "Welcome back!"

[[callbacks]]
name = "denied"
message = "Access denied."

[[callbacks]]
name = "show_tweet"
message = "tweet: {0}"
arity = 1

[gate]
identity = "ada"
credential = "s3cret"
on_success = "welcome"
on_error = "denied"

[timeline]
tweets = [
    { user = "ada", text = "First tweet" },
    { user = "grace", text = "Second tweet" },
]
on_each = "show_tweet"
attribute = "user"
"#;

/// Configuration used when no file is given
pub fn default_config() -> Result<DemoConfig> {
    toml::from_str(DEFAULT_CONFIG).context("Failed to parse built-in default configuration")
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<DemoConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: DemoConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    log::debug!(
        "Loaded {} callback(s), {} account(s), {} tweet(s)",
        config.callbacks.len(),
        config.accounts.len(),
        config.timeline.tweets.len()
    );

    Ok(config)
}
