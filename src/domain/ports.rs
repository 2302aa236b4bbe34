use crate::domain::model::{Column, WaitlistEntry};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the full waitlist. Called once when a view mounts.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>>;

    /// 用於日誌輸出的來源描述
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn source_location(&self) -> &str;
    fn page_size(&self) -> usize;
    fn max_page_buttons(&self) -> usize;
    fn columns(&self) -> &[Column];
}

/// Upward callbacks fired by [`crate::core::view::WaitlistView`] on user actions.
pub trait ViewListener {
    fn on_page_change(&mut self, _page: usize) {}

    fn on_service_selection_change(&mut self, _selected_names: &[String]) {}

    fn on_row_selection_change(&mut self, _selected_indices: &[usize], _all_selected: bool) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl ViewListener for NoopListener {}
