//! Decoding of the `key/value/.../flag` command path segment.

use std::collections::BTreeMap;
use std::sync::Arc;

use convhub_core::FormatRegistry;

use crate::error::CommandError;
use crate::models::{ConversionOptions, FlagValue};

const KEY_TO: &str = "to";
const KEY_FROM: &str = "from";
const KEY_TEMPLATE: &str = "template";

/// Parser for command strings, backed by the format registry.
#[derive(Debug, Clone)]
pub struct CommandParser {
    registry: Arc<FormatRegistry>,
}

impl CommandParser {
    /// Create a parser validating against `registry`.
    pub fn new(registry: Arc<FormatRegistry>) -> Self {
        Self { registry }
    }

    /// Decode a command string into [`ConversionOptions`].
    ///
    /// Repeated keys follow last-write-wins, and `to`/`from` are validated
    /// after the walk, so only their final values matter. Template
    /// existence is not checked here.
    pub fn parse(&self, command: &str) -> Result<ConversionOptions, CommandError> {
        let tokens: Vec<&str> = command
            .split('/')
            .filter(|t| !t.trim().is_empty())
            .collect();

        if tokens.is_empty() {
            return Err(CommandError::Malformed {
                reason: "command is empty".to_string(),
            });
        }

        let mut to: Option<&str> = None;
        let mut from: Option<&str> = None;
        let mut template: Option<&str> = None;
        let mut flags = BTreeMap::new();

        let mut i = 0;
        while i < tokens.len() {
            let key = tokens[i];
            let next = tokens.get(i + 1).copied();

            match key {
                KEY_TO | KEY_FROM | KEY_TEMPLATE => {
                    let value = next.ok_or_else(|| CommandError::Malformed {
                        reason: format!("'{key}' must be followed by a value"),
                    })?;
                    match key {
                        KEY_TO => to = Some(value),
                        KEY_FROM => from = Some(value),
                        _ => template = Some(value),
                    }
                    i += 2;
                }
                flag if self.registry.is_boolean_flag(flag) => {
                    flags.insert(flag.to_string(), FlagValue::Bool(true));
                    i += 1;
                }
                flag => match next {
                    Some(value) => {
                        flags.insert(flag.to_string(), FlagValue::Text(value.to_string()));
                        i += 2;
                    }
                    None if self.registry.is_valued_flag(flag) => {
                        return Err(CommandError::Malformed {
                            reason: format!("'{flag}' must be followed by a value"),
                        });
                    }
                    None => {
                        flags.insert(flag.to_string(), FlagValue::Bool(true));
                        i += 1;
                    }
                },
            }
        }

        let to = to.ok_or(CommandError::MissingTargetFormat)?;
        if !self.registry.is_valid_target_format(to) {
            return Err(CommandError::InvalidTargetFormat {
                format: to.to_string(),
            });
        }

        if let Some(from) = from {
            if !self.registry.is_valid_source_format(from) {
                return Err(CommandError::InvalidSourceFormat {
                    format: from.to_string(),
                });
            }
        }

        Ok(ConversionOptions {
            from: from.map(str::to_string),
            to: to.to_string(),
            flags,
            template_name: template.map(str::to_string),
        })
    }
}
