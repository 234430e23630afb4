//! Application state shared across all handlers and middleware.

use std::path::PathBuf;
use std::sync::Arc;

use convhub_converter::{CommandParser, ConversionEngine, Converter};
use convhub_core::FormatRegistry;
use convhub_core::config::AppConfig;
use convhub_templates::TemplateCatalog;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Formats and flags accepted by the service
    pub registry: Arc<FormatRegistry>,
    /// Template storage
    pub catalog: TemplateCatalog,
    /// Command string decoder
    pub parser: CommandParser,
    /// Conversion orchestrator
    pub converter: Converter,
    /// Where multipart uploads are spooled
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Wire the state from configuration and a conversion engine.
    pub fn new(config: AppConfig, engine: Arc<dyn ConversionEngine>) -> Self {
        let registry = Arc::new(FormatRegistry::default());
        let catalog = TemplateCatalog::from_config(&config.templates, Arc::clone(&registry));
        let parser = CommandParser::new(Arc::clone(&registry));
        let converter = Converter::from_config(&config.converter, engine, catalog.clone());
        let upload_dir = config.converter.effective_temp_dir().join("uploads");

        Self {
            config: Arc::new(config),
            registry,
            catalog,
            parser,
            converter,
            upload_dir,
        }
    }
}
