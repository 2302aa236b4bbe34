pub mod filter;
pub mod pagination;
pub mod selection;
pub mod view;

pub use crate::domain::model::{EntryStatus, FilterCriteria, FilteredResult, WaitlistEntry};
pub use crate::domain::ports::{ConfigProvider, DataSource, NoopListener, ViewListener};
pub use crate::utils::error::Result;
