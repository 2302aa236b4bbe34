use crate::config::{TomlConfig, ViewSettings};
use crate::domain::model::{Column, SearchMode, ServiceTypeFilter, StatusFilter};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "waitlist-view")]
#[command(about = "Filter, select and page through a waitlist document")]
pub struct CliConfig {
    /// Waitlist location: an http(s) URL or a local JSON file
    #[arg(long)]
    pub source: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Search mode: name or tags
    #[arg(long, default_value = "name")]
    pub mode: SearchMode,

    /// Name search query, matched case-insensitively against services
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Service type selector for tag search
    #[arg(long, default_value = "all")]
    pub service_type: ServiceTypeFilter,

    /// Status selector for tag search
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    #[arg(short, long, default_value = "1")]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long)]
    pub max_page_buttons: Option<usize>,

    /// Table columns to show, comma separated (e.g. createdOn,payer,status)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<Column>,

    /// Select a table row by global index (repeatable)
    #[arg(long = "select-row")]
    pub select_rows: Vec<usize>,

    /// Check the table's select-all box
    #[arg(long)]
    pub select_all: bool,

    /// Select a service by name (repeatable)
    #[arg(long = "select-service")]
    pub select_services: Vec<String>,

    /// Print the view state as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 載入設定檔後再套用命令列覆蓋值
    pub fn resolve(&self) -> Result<ViewSettings> {
        let file_config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut settings = ViewSettings::from(&file_config);
        if let Some(source) = &self.source {
            settings.source = source.clone();
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(max_page_buttons) = self.max_page_buttons {
            settings.max_page_buttons = max_page_buttons;
        }
        if !self.columns.is_empty() {
            settings.columns = Column::canonical(&self.columns);
        }
        settings.verbose |= self.verbose;
        settings.json_logs |= self.log_json;

        Ok(settings)
    }
}
