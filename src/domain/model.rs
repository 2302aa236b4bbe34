use crate::utils::error::{Result, WaitlistError};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One prospective customer's service request, as published in `waitlistData.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub created_on: String,
    pub payer: String,
    pub status: EntryStatus,
    pub email: String,
    pub phone: String,
    pub services: String,
    pub scheduled: String,
}

impl WaitlistEntry {
    /// 寬鬆轉換：缺少或非字串的欄位一律當作空字串，非物件則回傳 None
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |key: &str| {
            obj.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Some(Self {
            created_on: field("createdOn"),
            payer: field("payer"),
            status: EntryStatus::from(field("status")),
            email: field("email"),
            phone: field("phone"),
            services: field("services"),
            scheduled: field("scheduled"),
        })
    }

    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::CreatedOn => &self.created_on,
            Column::Payer => &self.payer,
            Column::Status => self.status.as_str(),
            Column::Email => &self.email,
            Column::Phone => &self.phone,
            Column::Services => &self.services,
            Column::Scheduled => &self.scheduled,
        }
    }
}

/// Parses a waitlist document. The document itself must be a JSON array.
pub fn parse_waitlist(bytes: &[u8]) -> Result<Vec<WaitlistEntry>> {
    let document: serde_json::Value = serde_json::from_slice(bytes)?;

    let items = match document {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(WaitlistError::MalformedDataError {
                message: format!("expected a JSON array, found {}", json_kind(&other)),
            })
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        match WaitlistEntry::from_json_value(item) {
            Some(entry) => entries.push(entry),
            None => tracing::warn!(
                "Skipping waitlist element {}: expected an object, found {}",
                position,
                json_kind(item)
            ),
        }
    }

    Ok(entries)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum EntryStatus {
    Active,
    Lead,
    Other(String),
    #[default]
    Unknown,
}

impl EntryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Lead => "Lead",
            Self::Other(raw) => raw,
            Self::Unknown => "",
        }
    }

    pub fn badge(&self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Green,
            Self::Lead => BadgeTone::Blue,
            Self::Other(_) | Self::Unknown => BadgeTone::Gray,
        }
    }
}

impl From<String> for EntryStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Active" => Self::Active,
            "Lead" => Self::Lead,
            "" => Self::Unknown,
            _ => Self::Other(raw),
        }
    }
}

impl From<EntryStatus> for String {
    fn from(status: EntryStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Green,
    Blue,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    CreatedOn,
    Payer,
    Status,
    Email,
    Phone,
    Services,
    Scheduled,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::CreatedOn,
        Column::Payer,
        Column::Status,
        Column::Email,
        Column::Phone,
        Column::Services,
        Column::Scheduled,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Column::CreatedOn => "createdOn",
            Column::Payer => "payer",
            Column::Status => "status",
            Column::Email => "email",
            Column::Phone => "phone",
            Column::Services => "services",
            Column::Scheduled => "scheduled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::CreatedOn => "Created On",
            Column::Payer => "Payer",
            Column::Status => "Status",
            Column::Email => "Email",
            Column::Phone => "Payer Phone",
            Column::Services => "Services",
            Column::Scheduled => "Scheduled",
        }
    }

    /// 依照表格固定欄位順序輸出，重複的欄位只保留一次
    pub fn canonical(columns: &[Column]) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|column| columns.contains(column))
            .collect()
    }
}

impl FromStr for Column {
    type Err = WaitlistError;

    fn from_str(s: &str) -> Result<Self> {
        Column::ALL
            .into_iter()
            .find(|column| column.key() == s.trim())
            .ok_or_else(|| WaitlistError::InvalidConfigValueError {
                field: "columns".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown column. Valid columns: {}",
                    Column::ALL.map(Column::key).join(", ")
                ),
            })
    }
}

/// Service-type selector of the tag search. `All` is the only wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ServiceTypeFilter {
    #[default]
    All,
    Class,
    Appointment,
    Facility,
    ClassPack,
    Membership,
    GeneralItem,
    Custom(String),
}

impl ServiceTypeFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Class => "class",
            Self::Appointment => "appointment",
            Self::Facility => "facility",
            Self::ClassPack => "classPack",
            Self::Membership => "membership",
            Self::GeneralItem => "generalItem",
            Self::Custom(raw) => raw,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, services: &str) -> bool {
        self.is_all() || self.as_str() == services
    }
}

impl FromStr for ServiceTypeFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(match s {
            "all" => Self::All,
            "class" => Self::Class,
            "appointment" => Self::Appointment,
            "facility" => Self::Facility,
            "classPack" => Self::ClassPack,
            "membership" => Self::Membership,
            "generalItem" => Self::GeneralItem,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for ServiceTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status selector of the tag search. `All` is the only wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Public,
    Private,
    Disabled,
    Draft,
    Custom(String),
}

impl StatusFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Public => "public",
            Self::Private => "private",
            Self::Disabled => "disabled",
            Self::Draft => "draft",
            Self::Custom(raw) => raw,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, status: &EntryStatus) -> bool {
        self.is_all() || self.as_str() == status.as_str()
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(match s {
            "all" => Self::All,
            "public" => Self::Public,
            "private" => Self::Private,
            "disabled" => Self::Disabled,
            "draft" => Self::Draft,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    ByName,
    ByTags,
}

impl FromStr for SearchMode {
    type Err = WaitlistError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" | "searchByName" => Ok(Self::ByName),
            "tags" | "searchByTags" => Ok(Self::ByTags),
            other => Err(WaitlistError::InvalidConfigValueError {
                field: "mode".to_string(),
                value: other.to_string(),
                reason: "Valid modes: name, tags".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCriteria {
    NameSearch {
        query: String,
    },
    TagSearch {
        service_type: ServiceTypeFilter,
        status: StatusFilter,
    },
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::NameSearch {
            query: String::new(),
        }
    }
}

/// Distinct matching service names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilteredResult {
    pub matching_service_names: Vec<String>,
    /// "No results" flag: only set when the active filter is non-trivial.
    pub no_results: bool,
}

impl FilteredResult {
    pub fn len(&self) -> usize {
        self.matching_service_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matching_service_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_reads_camel_case_keys() {
        let entries = parse_waitlist(
            br#"[{
                "createdOn": "2024-03-01 10:00",
                "payer": "Ann Lee",
                "status": "Lead",
                "email": "ann@example.com",
                "phone": "+1 555 0100",
                "services": "Yoga",
                "scheduled": "2024-03-04 09:00"
            }]"#,
        )
        .unwrap();
        let entry = &entries[0];

        assert_eq!(entry.created_on, "2024-03-01 10:00");
        assert_eq!(entry.status, EntryStatus::Lead);
        assert_eq!(entry.cell(Column::Services), "Yoga");
    }

    #[test]
    fn test_lenient_conversion_fills_missing_fields() {
        let entry = WaitlistEntry::from_json_value(&serde_json::json!({
            "payer": "Bo",
            "services": 42,
            "status": "Waiting"
        }))
        .unwrap();

        assert_eq!(entry.payer, "Bo");
        assert_eq!(entry.services, "");
        assert_eq!(entry.email, "");
        assert_eq!(entry.status, EntryStatus::Other("Waiting".to_string()));
        assert!(WaitlistEntry::from_json_value(&serde_json::json!("oops")).is_none());
    }

    #[test]
    fn test_parse_waitlist_skips_non_objects() {
        let bytes = br#"[{"services": "Yoga", "status": "Active"}, 7, null, {"services": "Pilates"}]"#;
        let entries = parse_waitlist(bytes).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].services, "Pilates");
        assert_eq!(entries[1].status, EntryStatus::Unknown);
    }

    #[test]
    fn test_parse_waitlist_rejects_non_array() {
        let err = parse_waitlist(br#"{"services": "Yoga"}"#).unwrap_err();
        assert!(matches!(err, WaitlistError::MalformedDataError { .. }));

        let err = parse_waitlist(b"not json").unwrap_err();
        assert!(matches!(err, WaitlistError::SerializationError(_)));
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(EntryStatus::Active.badge(), BadgeTone::Green);
        assert_eq!(EntryStatus::Lead.badge(), BadgeTone::Blue);
        assert_eq!(EntryStatus::from("Cancelled".to_string()).badge(), BadgeTone::Gray);
        assert_eq!(String::from(EntryStatus::from("Cancelled".to_string())), "Cancelled");
    }

    #[test]
    fn test_column_parsing_and_order() {
        assert_eq!("phone".parse::<Column>().unwrap().label(), "Payer Phone");
        assert!("balance".parse::<Column>().is_err());

        let columns = Column::canonical(&[Column::Status, Column::Payer, Column::Status]);
        assert_eq!(columns, vec![Column::Payer, Column::Status]);
    }

    #[test]
    fn test_selectors_parse_known_and_custom_values() {
        assert_eq!("classPack".parse::<ServiceTypeFilter>().unwrap(), ServiceTypeFilter::ClassPack);
        assert_eq!(
            "Yoga".parse::<ServiceTypeFilter>().unwrap(),
            ServiceTypeFilter::Custom("Yoga".to_string())
        );
        assert_eq!("draft".parse::<StatusFilter>().unwrap(), StatusFilter::Draft);
        assert!("all".parse::<StatusFilter>().unwrap().is_all());
        assert!("table".parse::<SearchMode>().is_err());
    }

    #[test]
    fn test_selector_wildcard_only_on_selector_side() {
        // 資料中的 "all" 只是普通字串
        assert!(ServiceTypeFilter::All.matches("Yoga"));
        assert!(!ServiceTypeFilter::Custom("Yoga".to_string()).matches("all"));
        assert!(StatusFilter::Custom("Active".to_string()).matches(&EntryStatus::Active));
        assert!(!StatusFilter::Public.matches(&EntryStatus::Active));
    }
}
