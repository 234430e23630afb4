//! # convhub-converter
//!
//! Turns a command string such as `to/pdf/from/markdown/standalone` into
//! [`ConversionOptions`], and runs conversions through a
//! [`ConversionEngine`] (Pandoc in production).
//!
//! ## Command grammar
//!
//! Tokens are separated by `/` and read as key/value pairs. `to` is
//! required, `from` and `template` are optional, and every other key is
//! passed to the engine as a flag. A recognized boolean flag, or a lone
//! trailing key, stands on its own and is set to `true`.

pub mod command;
pub mod converter;
pub mod engine;
pub mod error;
pub mod executor;
pub mod help;
pub mod job;
pub mod models;

pub use command::CommandParser;
pub use converter::Converter;
pub use engine::{ConversionEngine, PandocEngine};
pub use help::help_text;
pub use error::{CommandError, ConversionError};
pub use models::{ConversionOptions, ConversionOutput, EngineRequest, FlagValue};
