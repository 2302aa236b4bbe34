use crate::core::filter::{compute_filtered_result, statuses_for_service};
use crate::core::pagination::{Pagination, DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE};
use crate::core::selection::{RowSelection, ServiceSelection};
use crate::core::{
    DataSource, EntryStatus, FilterCriteria, FilteredResult, ViewListener, WaitlistEntry,
};
use crate::domain::model::{SearchMode, ServiceTypeFilter, StatusFilter};

/// A service name together with the statuses of the entries offering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBadges<'a> {
    pub name: &'a str,
    pub statuses: Vec<&'a EntryStatus>,
    pub selected: bool,
}

/// A table row with its global index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRow<'a> {
    pub index: usize,
    pub entry: &'a WaitlistEntry,
    pub selected: bool,
}

/// Host-side state of one waitlist view session.
///
/// Owns the loaded entries, both search modes, both selection spaces and the
/// table pagination. Derived state is recomputed by explicit calls; user actions
/// that change observable state notify the listener.
pub struct WaitlistView<L: ViewListener> {
    entries: Vec<WaitlistEntry>,
    mode: SearchMode,
    query: String,
    service_type: ServiceTypeFilter,
    status: StatusFilter,
    services: ServiceSelection,
    rows: RowSelection,
    pagination: Pagination,
    page_size: usize,
    max_page_buttons: usize,
    listener: L,
}

impl<L: ViewListener> WaitlistView<L> {
    pub fn new(listener: L) -> Self {
        Self::with_page_size(listener, DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGE_BUTTONS)
    }

    pub fn with_page_size(listener: L, page_size: usize, max_page_buttons: usize) -> Self {
        Self {
            entries: Vec::new(),
            mode: SearchMode::default(),
            query: String::new(),
            service_type: ServiceTypeFilter::default(),
            status: StatusFilter::default(),
            services: ServiceSelection::new(),
            rows: RowSelection::new(),
            pagination: Pagination::new(0, page_size).with_max_page_buttons(max_page_buttons),
            page_size,
            max_page_buttons,
            listener,
        }
    }

    /// Loads the entries once. A failed fetch is logged and leaves the list empty.
    pub async fn mount<D: DataSource + ?Sized>(&mut self, source: &D) -> usize {
        tracing::info!("Loading waitlist from {}", source.describe());

        match source.load_waitlist_entries().await {
            Ok(entries) => {
                tracing::info!("Loaded {} waitlist entries", entries.len());
                self.set_entries(entries);
            }
            Err(e) => {
                tracing::error!("Error fetching waitlist data: {}", e);
                tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
            }
        }

        self.entries.len()
    }

    pub fn set_entries(&mut self, entries: Vec<WaitlistEntry>) {
        self.entries = entries;
        self.rows.clear_all();
        self.pagination = Pagination::new(self.entries.len(), self.page_size)
            .with_max_page_buttons(self.max_page_buttons);
    }

    pub fn entries(&self) -> &[WaitlistEntry] {
        &self.entries
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// 切換模式時保留另一個模式的輸入值
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_service_type(&mut self, service_type: ServiceTypeFilter) {
        self.service_type = service_type;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn criteria(&self) -> FilterCriteria {
        match self.mode {
            SearchMode::ByName => FilterCriteria::NameSearch {
                query: self.query.clone(),
            },
            SearchMode::ByTags => FilterCriteria::TagSearch {
                service_type: self.service_type.clone(),
                status: self.status.clone(),
            },
        }
    }

    pub fn filtered(&self) -> FilteredResult {
        compute_filtered_result(&self.entries, &self.criteria())
    }

    pub fn summary(&self) -> String {
        self.filtered().summary(&self.criteria())
    }

    /// Matching services with their status badges and selection state.
    pub fn service_badges(&self) -> Vec<ServiceBadges<'_>> {
        let filtered = self.filtered();
        filtered
            .matching_service_names
            .iter()
            .filter_map(|name| {
                // 借用 entries 內的字串，避免回傳暫存值的參考
                let owned = self.entries.iter().find(|entry| &entry.services == name)?;
                Some(ServiceBadges {
                    name: owned.services.as_str(),
                    statuses: statuses_for_service(&self.entries, name),
                    selected: self.services.contains(name),
                })
            })
            .collect()
    }

    pub fn toggle_service(&mut self, name: &str) {
        self.services.toggle(name);
        self.listener
            .on_service_selection_change(self.services.selected());
    }

    pub fn selected_services(&self) -> &[String] {
        self.services.selected()
    }

    pub fn toggle_row(&mut self, index: usize) {
        if index >= self.entries.len() {
            tracing::debug!("Ignoring toggle of row {} outside the table", index);
            return;
        }
        self.rows.toggle(index);
        self.notify_rows();
    }

    /// Applies the header checkbox: every row of the table, across all pages.
    pub fn set_all_rows_selected(&mut self, all_selected: bool) {
        self.rows.set_all_selected(all_selected, 0..self.entries.len());
        self.notify_rows();
    }

    pub fn all_rows_selected(&self) -> bool {
        self.rows.is_all_selected(self.entries.len())
    }

    pub fn selected_rows(&self) -> Vec<usize> {
        self.rows.selected()
    }

    fn notify_rows(&mut self) {
        let selected = self.rows.selected();
        let all_selected = self.rows.is_all_selected(self.entries.len());
        self.listener.on_row_selection_change(&selected, all_selected);
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let changed = self.pagination.go_to_page(page);
        if changed {
            self.listener.on_page_change(page);
        }
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.pagination.current_page() + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.pagination.current_page().checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    /// Rows of the current page, each tagged with its global index.
    pub fn page_rows(&self) -> Vec<PageRow<'_>> {
        let window = self.pagination.current_window();
        self.pagination
            .slice(&self.entries)
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let index = window.start + offset;
                PageRow {
                    index,
                    entry,
                    selected: self.rows.contains(index),
                }
            })
            .collect()
    }
}

impl Default for WaitlistView<crate::core::NoopListener> {
    fn default() -> Self {
        Self::new(crate::core::NoopListener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, WaitlistError};
    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingListener {
        pages: Vec<usize>,
        services: Vec<Vec<String>>,
        rows: Vec<(Vec<usize>, bool)>,
    }

    impl ViewListener for RecordingListener {
        fn on_page_change(&mut self, page: usize) {
            self.pages.push(page);
        }

        fn on_service_selection_change(&mut self, selected_names: &[String]) {
            self.services.push(selected_names.to_vec());
        }

        fn on_row_selection_change(&mut self, selected_indices: &[usize], all_selected: bool) {
            self.rows.push((selected_indices.to_vec(), all_selected));
        }
    }

    struct StaticSource(Vec<WaitlistEntry>);

    #[async_trait]
    impl DataSource for StaticSource {
        async fn load_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        async fn load_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>> {
            Err(WaitlistError::MalformedDataError {
                message: "boom".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    fn entries(count: usize) -> Vec<WaitlistEntry> {
        (0..count)
            .map(|i| WaitlistEntry {
                payer: format!("Payer {}", i),
                services: if i % 2 == 0 { "Yoga" } else { "Pilates" }.to_string(),
                status: if i % 3 == 0 { EntryStatus::Active } else { EntryStatus::Lead },
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_mount_loads_entries_and_resets_pagination() {
        let mut view = WaitlistView::new(RecordingListener::default());
        let loaded = view.mount(&StaticSource(entries(25))).await;

        assert_eq!(loaded, 25);
        assert_eq!(view.pagination().total_pages(), 3);
        assert_eq!(view.pagination().current_page(), 1);
    }

    #[tokio::test]
    async fn test_failed_mount_leaves_view_empty() {
        let mut view = WaitlistView::default();
        let loaded = view.mount(&FailingSource).await;

        assert_eq!(loaded, 0);
        assert!(view.entries().is_empty());
        assert!(view.page_rows().is_empty());
        view.set_query("yoga");
        assert!(!view.filtered().no_results);
    }

    #[test]
    fn test_switching_modes_keeps_other_mode_values() {
        let mut view = WaitlistView::default();
        view.set_entries(entries(4));
        view.set_query("pil");
        view.set_search_mode(SearchMode::ByTags);
        view.set_service_type(ServiceTypeFilter::Custom("Yoga".to_string()));
        view.set_status(StatusFilter::Custom("Active".to_string()));

        assert_eq!(view.filtered().matching_service_names, vec!["Yoga"]);

        view.set_search_mode(SearchMode::ByName);
        assert_eq!(view.filtered().matching_service_names, vec!["Pilates"]);
        assert_eq!(view.summary(), "Showing 1 result matching 'pil'");
    }

    #[test]
    fn test_service_toggle_notifies_listener() {
        let mut view = WaitlistView::new(RecordingListener::default());
        view.set_entries(entries(4));
        view.toggle_service("Yoga");
        view.toggle_service("Pilates");
        view.toggle_service("Yoga");

        assert_eq!(view.selected_services(), ["Pilates"]);
        assert_eq!(view.listener().services.last().unwrap(), &vec!["Pilates".to_string()]);
        assert_eq!(view.listener().services.len(), 3);
    }

    #[test]
    fn test_service_badges_follow_filter() {
        let mut view = WaitlistView::default();
        view.set_entries(entries(4));
        view.set_query("yo");
        view.toggle_service("Yoga");

        let badges = view.service_badges();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].name, "Yoga");
        assert_eq!(badges[0].statuses, vec![&EntryStatus::Active, &EntryStatus::Lead]);
        assert!(badges[0].selected);
    }

    #[test]
    fn test_row_selection_survives_page_changes() {
        let mut view = WaitlistView::new(RecordingListener::default());
        view.set_entries(entries(25));

        view.toggle_row(2);
        assert!(view.next_page());
        view.toggle_row(12);

        let rows = view.page_rows();
        assert_eq!(rows.first().map(|row| row.index), Some(11));
        assert!(rows.iter().any(|row| row.index == 12 && row.selected));

        assert!(view.previous_page());
        assert!(view.page_rows()[2].selected);
        assert_eq!(view.selected_rows(), vec![2, 12]);
        assert_eq!(view.listener().pages, vec![2, 1]);
    }

    #[test]
    fn test_select_all_rows_and_single_toggle() {
        let mut view = WaitlistView::new(RecordingListener::default());
        view.set_entries(entries(25));

        view.set_all_rows_selected(true);
        assert!(view.all_rows_selected());
        assert_eq!(view.listener().rows.last().map(|(_, all)| *all), Some(true));

        view.toggle_row(24);
        assert!(!view.all_rows_selected());
        assert_eq!(view.listener().rows.last().map(|(rows, all)| (rows.len(), *all)), Some((24, false)));

        view.set_all_rows_selected(false);
        assert!(view.selected_rows().is_empty());
    }

    #[test]
    fn test_out_of_range_actions_are_ignored() {
        let mut view = WaitlistView::new(RecordingListener::default());
        view.set_entries(entries(25));

        assert!(!view.go_to_page(0));
        assert!(!view.go_to_page(4));
        assert!(!view.previous_page());
        view.toggle_row(99);

        assert!(view.listener().pages.is_empty());
        assert!(view.listener().rows.is_empty());
        assert_eq!(view.pagination().current_page(), 1);
    }

    #[test]
    fn test_last_page_rows() {
        let mut view = WaitlistView::default();
        view.set_entries(entries(25));
        view.go_to_page(3);

        let indices: Vec<usize> = view.page_rows().iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![22, 23, 24]);
    }
}
