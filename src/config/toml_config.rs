use crate::adapters::DEFAULT_SOURCE;
use crate::core::pagination::{DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE};
use crate::core::ConfigProvider;
use crate::domain::model::Column;
use crate::utils::error::{Result, WaitlistError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub table: TableConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub max_page_buttons: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_buttons: DEFAULT_MAX_PAGE_BUTTONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub columns: Vec<Column>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Column::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WaitlistError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WaitlistError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WAITLIST_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WaitlistError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|logging| logging.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|logging| logging.json)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn source_location(&self) -> &str {
        &self.source.location
    }

    fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    fn max_page_buttons(&self) -> usize {
        self.pagination.max_page_buttons
    }

    fn columns(&self) -> &[Column] {
        &self.table.columns
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}
