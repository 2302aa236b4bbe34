#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::domain::model::Column;
use crate::utils::error::{Result, WaitlistError};
use crate::utils::validation::{validate_positive_number, validate_range, validate_source, Validate};

pub const MAX_PAGE_BUTTONS_LIMIT: usize = 50;

/// Effective settings after merging the config file with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub source: String,
    pub page_size: usize,
    pub max_page_buttons: usize,
    pub columns: Vec<Column>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl From<&TomlConfig> for ViewSettings {
    fn from(config: &TomlConfig) -> Self {
        Self {
            source: config.source_location().to_string(),
            page_size: config.page_size(),
            max_page_buttons: config.max_page_buttons(),
            columns: config.columns().to_vec(),
            verbose: config.verbose(),
            json_logs: config.json_logs(),
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from(&TomlConfig::default())
    }
}

impl ConfigProvider for ViewSettings {
    fn source_location(&self) -> &str {
        &self.source
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn max_page_buttons(&self) -> usize {
        self.max_page_buttons
    }

    fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl Validate for ViewSettings {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

pub(crate) fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_source("source.location", config.source_location())?;
    validate_positive_number("pagination.page_size", config.page_size(), 1)?;
    validate_range(
        "pagination.max_page_buttons",
        config.max_page_buttons(),
        1,
        MAX_PAGE_BUTTONS_LIMIT,
    )?;

    if config.columns().is_empty() {
        return Err(WaitlistError::ConfigValidationError {
            field: "table.columns".to_string(),
            message: "At least one column must be shown".to_string(),
        });
    }

    Ok(())
}
