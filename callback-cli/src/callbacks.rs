//! Declarative callbacks
//!
//! Turns `[[callbacks]]` entries from the configuration into named
//! [`DynCallback`]s. Each entry renders its message template with the call
//! arguments and either prints it to the output sink or logs it.

use crate::config::{CallbackAction, CallbackConfig};
use callback_core::{DynCallback, OutputSink};
use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Callback '{0}' is defined more than once")]
    Duplicate(String),

    #[error("Callback '{0}' is not defined")]
    Unknown(String),
}

/// Named callbacks built from configuration
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, DynCallback>,
}

impl CallbackRegistry {
    /// Build every configured callback, writing printed output to `sink`
    pub fn from_config(
        configs: &[CallbackConfig],
        sink: Rc<dyn OutputSink>,
    ) -> Result<Self, RegistryError> {
        let mut callbacks = HashMap::new();

        for config in configs {
            if callbacks.contains_key(&config.name) {
                return Err(RegistryError::Duplicate(config.name.clone()));
            }
            log::debug!(
                "Registering callback '{}' ({:?}, arity {})",
                config.name,
                config.action,
                config.arity
            );
            callbacks.insert(config.name.clone(), build(config, Rc::clone(&sink)));
        }

        Ok(Self { callbacks })
    }

    /// Look up a callback by name
    pub fn get(&self, name: &str) -> Result<DynCallback, RegistryError> {
        self.callbacks
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    /// Look up an optional callback reference
    pub fn resolve(&self, name: Option<&str>) -> Result<Option<DynCallback>, RegistryError> {
        name.map(|n| self.get(n)).transpose()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}

fn build(config: &CallbackConfig, sink: Rc<dyn OutputSink>) -> DynCallback {
    let template = config.message.clone();
    let name = config.name.clone();

    match config.action {
        CallbackAction::Print => DynCallback::new(&config.name, config.arity, move |args| {
            sink.write_line(&render(&template, args));
            Value::Null
        }),
        CallbackAction::Log => DynCallback::new(&config.name, config.arity, move |args| {
            log::info!("[{}] {}", name, render(&template, args));
            Value::Null
        }),
    }
}

/// Replace `{0}`, `{1}`, ... with the matching argument
///
/// String arguments are inserted without quotes; anything else uses its
/// JSON form. Placeholders without a matching argument are left untouched.
/// The template is scanned once, so inserted arguments are never expanded.
pub fn render(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        match placeholder(tail, args) {
            Some((len, arg)) => {
                out.push_str(&render_value(arg));
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Match `{N}` at the start of `text`, returning its length and argument
fn placeholder<'v>(text: &str, args: &'v [Value]) -> Option<(usize, &'v Value)> {
    let close = text.find('}')?;
    let digits = &text[1..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: usize = digits.parse().ok()?;
    Some((close + 1, args.get(index)?))
}

/// Strings without quotes, everything else as JSON
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
