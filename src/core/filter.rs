use crate::core::{EntryStatus, FilterCriteria, FilteredResult, WaitlistEntry};
use crate::domain::model::{ServiceTypeFilter, StatusFilter};
use std::collections::HashSet;

/// 依出現順序收集不重複的服務名稱
fn distinct_service_names<'a, I>(matches: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a WaitlistEntry>,
{
    let mut seen = HashSet::new();
    matches
        .into_iter()
        .filter(|entry| seen.insert(entry.services.as_str()))
        .map(|entry| entry.services.clone())
        .collect()
}

/// Case-insensitive substring search over the `services` field.
///
/// An empty query, or an empty entry list, yields an empty result that is not
/// flagged as "no results".
pub fn filter_by_name(entries: &[WaitlistEntry], query: &str) -> FilteredResult {
    if query.is_empty() || entries.is_empty() {
        return FilteredResult::default();
    }

    let needle = query.to_lowercase();
    let matching_service_names = distinct_service_names(
        entries
            .iter()
            .filter(|entry| entry.services.to_lowercase().contains(&needle)),
    );

    let no_results = matching_service_names.is_empty() && !query.trim().is_empty();
    FilteredResult {
        matching_service_names,
        no_results,
    }
}

/// Structured search on service type and status; `all` on either selector is a wildcard.
pub fn filter_by_tags(
    entries: &[WaitlistEntry],
    service_type: &ServiceTypeFilter,
    status: &StatusFilter,
) -> FilteredResult {
    // 資料尚未載入時不顯示「查無結果」
    if entries.is_empty() {
        return FilteredResult::default();
    }

    let matching_service_names = distinct_service_names(
        entries
            .iter()
            .filter(|entry| service_type.matches(&entry.services) && status.matches(&entry.status)),
    );

    let no_results =
        matching_service_names.is_empty() && (!service_type.is_all() || !status.is_all());
    FilteredResult {
        matching_service_names,
        no_results,
    }
}

pub fn compute_filtered_result(entries: &[WaitlistEntry], criteria: &FilterCriteria) -> FilteredResult {
    match criteria {
        FilterCriteria::NameSearch { query } => filter_by_name(entries, query),
        FilterCriteria::TagSearch {
            service_type,
            status,
        } => filter_by_tags(entries, service_type, status),
    }
}

/// Statuses of every entry offering `service_name`, in source order.
pub fn statuses_for_service<'a>(entries: &'a [WaitlistEntry], service_name: &str) -> Vec<&'a EntryStatus> {
    entries
        .iter()
        .filter(|entry| entry.services == service_name)
        .map(|entry| &entry.status)
        .collect()
}

impl FilteredResult {
    /// Result line shown above the service list.
    pub fn summary(&self, criteria: &FilterCriteria) -> String {
        let count = self.len();
        let noun = if count == 1 { "result" } else { "results" };
        match criteria {
            FilterCriteria::NameSearch { query } => {
                format!("Showing {} {} matching '{}'", count, noun, query)
            }
            FilterCriteria::TagSearch { .. } => format!("Showing {} {} matching tags", count, noun),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(services: &str, status: &str) -> WaitlistEntry {
        WaitlistEntry {
            services: services.to_string(),
            status: EntryStatus::from(status.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<WaitlistEntry> {
        vec![
            entry("Yoga", "Active"),
            entry("Yoga", "Lead"),
            entry("Pilates", "Active"),
        ]
    }

    #[test]
    fn test_name_search_is_case_insensitive_and_deduplicated() {
        let entries = vec![
            entry("Morning Yoga", "Active"),
            entry("Pilates", "Lead"),
            entry("Morning Yoga", "Lead"),
            entry("YOGA Nidra", "Active"),
        ];

        let result = filter_by_name(&entries, "yoga");
        assert_eq!(result.matching_service_names, vec!["Morning Yoga", "YOGA Nidra"]);
        assert!(!result.no_results);
    }

    #[test]
    fn test_empty_query_is_empty_but_not_flagged() {
        let result = filter_by_name(&sample(), "");
        assert!(result.is_empty());
        assert!(!result.no_results);
    }

    #[test]
    fn test_whitespace_query_never_flags_no_results() {
        let result = filter_by_name(&sample(), "   ");
        assert!(result.is_empty());
        assert!(!result.no_results);
    }

    #[test]
    fn test_unmatched_query_flags_no_results() {
        let result = filter_by_name(&sample(), "boxing");
        assert!(result.is_empty());
        assert!(result.no_results);
    }

    #[test]
    fn test_empty_input_list() {
        assert_eq!(filter_by_name(&[], "yoga"), FilteredResult::default());
        assert_eq!(
            filter_by_tags(&[], &ServiceTypeFilter::Class, &StatusFilter::Draft),
            FilteredResult::default()
        );
    }

    #[test]
    fn test_tags_all_all_returns_every_distinct_name() {
        let result = filter_by_tags(&sample(), &ServiceTypeFilter::All, &StatusFilter::All);
        assert_eq!(result.matching_service_names, vec!["Yoga", "Pilates"]);
        assert!(!result.no_results);
    }

    #[test]
    fn test_tags_by_service_type() {
        let yoga = ServiceTypeFilter::Custom("Yoga".to_string());
        let result = filter_by_tags(&sample(), &yoga, &StatusFilter::All);
        assert_eq!(result.matching_service_names, vec!["Yoga"]);
        assert!(!result.no_results);
    }

    #[test]
    fn test_tags_by_status() {
        let lead = StatusFilter::Custom("Lead".to_string());
        let result = filter_by_tags(&sample(), &ServiceTypeFilter::All, &lead);
        assert_eq!(result.matching_service_names, vec!["Yoga"]);
    }

    #[test]
    fn test_tags_without_match_flags_no_results() {
        let result = filter_by_tags(&sample(), &ServiceTypeFilter::Class, &StatusFilter::All);
        assert!(result.is_empty());
        assert!(result.no_results);

        let result = filter_by_tags(&sample(), &ServiceTypeFilter::All, &StatusFilter::Draft);
        assert!(result.no_results);
    }

    #[test]
    fn test_literal_all_in_data_is_not_a_wildcard() {
        let entries = vec![entry("all", "Active"), entry("Yoga", "Active")];

        let result = filter_by_name(&entries, "ALL");
        assert_eq!(result.matching_service_names, vec!["all"]);

        let result = filter_by_tags(&entries, &ServiceTypeFilter::Custom("Yoga".to_string()), &StatusFilter::All);
        assert_eq!(result.matching_service_names, vec!["Yoga"]);
    }

    #[test]
    fn test_compute_filtered_result_dispatches_on_mode() {
        let entries = sample();
        let by_name = FilterCriteria::NameSearch {
            query: "pil".to_string(),
        };
        assert_eq!(
            compute_filtered_result(&entries, &by_name).matching_service_names,
            vec!["Pilates"]
        );

        let by_tags = FilterCriteria::TagSearch {
            service_type: ServiceTypeFilter::All,
            status: StatusFilter::Custom("Active".to_string()),
        };
        assert_eq!(
            compute_filtered_result(&entries, &by_tags).matching_service_names,
            vec!["Yoga", "Pilates"]
        );
    }

    #[test]
    fn test_statuses_for_service() {
        let entries = sample();
        let statuses = statuses_for_service(&entries, "Yoga");
        assert_eq!(statuses, vec![&EntryStatus::Active, &EntryStatus::Lead]);
        assert!(statuses_for_service(&entries, "yoga").is_empty());
    }

    #[test]
    fn test_summary_pluralization() {
        let entries = sample();
        let criteria = FilterCriteria::NameSearch {
            query: "Pil".to_string(),
        };
        let result = compute_filtered_result(&entries, &criteria);
        assert_eq!(result.summary(&criteria), "Showing 1 result matching 'Pil'");

        let criteria = FilterCriteria::TagSearch {
            service_type: ServiceTypeFilter::All,
            status: StatusFilter::All,
        };
        let result = compute_filtered_result(&entries, &criteria);
        assert_eq!(result.summary(&criteria), "Showing 2 results matching tags");
    }
}
