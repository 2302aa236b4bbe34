pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{source_for, FileDataSource, HttpDataSource, DEFAULT_SOURCE};
pub use config::{TomlConfig, ViewSettings};
pub use crate::core::{
    filter::{compute_filtered_result, filter_by_name, filter_by_tags},
    pagination::Pagination,
    selection::{RowSelection, ServiceSelection},
    view::WaitlistView,
};
pub use domain::model::{
    Column, EntryStatus, FilterCriteria, FilteredResult, SearchMode, ServiceTypeFilter,
    StatusFilter, WaitlistEntry,
};
pub use domain::model::parse_waitlist;
pub use domain::ports::{DataSource, NoopListener, ViewListener};
pub use utils::error::{Result, WaitlistError};
