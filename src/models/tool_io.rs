//! Input and output shapes for the 13-tool surface (§6). Inputs derive
//! `Deserialize` tolerant of loosely-typed JSON callers (numbers-as-strings,
//! `"true"`/`"false"` strings for booleans) via `#[serde(deserialize_with)]`
//! helpers; outputs are the `data` payload wrapped by
//! [`crate::models::domain::EnrichedResponse`].

use super::domain::ActSummary;
use super::enums::{DetailLevel, MetadataCategory};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

fn de_flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Bool(bool),
        Str(String),
        Null,
    }
    match Option::<Flexible>::deserialize(deserializer)? {
        None | Some(Flexible::Null) => Ok(None),
        Some(Flexible::Bool(b)) => Ok(Some(b)),
        Some(Flexible::Str(s)) => Ok(Some(
            s.eq_ignore_ascii_case("true") || s == "1" || s.eq_ignore_ascii_case("yes"),
        )),
    }
}

fn de_flexible_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Int(i64),
        Str(String),
        Null,
    }
    match Option::<Flexible>::deserialize(deserializer)? {
        None | Some(Flexible::Null) => Ok(None),
        Some(Flexible::Int(n)) => Ok(Some(n)),
        Some(Flexible::Str(s)) => Ok(s.parse::<i64>().ok()),
    }
}

// ---------------------------------------------------------------------
// Inputs

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchRequest {
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub year: Option<i64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub title: Option<String>,
    pub act_type: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub pub_date_from: Option<String>,
    pub pub_date_to: Option<String>,
    #[serde(default, deserialize_with = "de_flexible_bool")]
    pub in_force: Option<bool>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub offset: Option<i64>,
    #[serde(default)]
    pub detail_level: String,
}

impl SearchRequest {
    pub fn detail_level(&self) -> DetailLevel {
        DetailLevel::parse(&self.detail_level)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BrowseRequest {
    pub publisher: String,
    #[serde(deserialize_with = "de_flexible_int")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub detail_level: String,
}

impl BrowseRequest {
    pub fn detail_level(&self) -> DetailLevel {
        DetailLevel::parse(&self.detail_level)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActDetailsRequest {
    pub eli: String,
    #[serde(default, deserialize_with = "de_flexible_bool")]
    pub load_content: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReadContentRequest {
    pub eli: String,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchInActRequest {
    pub eli: String,
    pub query: String,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub context_chars: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetadataRequest {
    #[serde(default)]
    pub category: String,
}

impl MetadataRequest {
    pub fn category(&self) -> MetadataCategory {
        MetadataCategory::parse(&self.category)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RelationshipsRequest {
    pub eli: String,
    pub relationship_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrackChangesRequest {
    pub date_from: String,
    #[serde(default = "default_publisher")]
    pub publisher: String,
    pub date_to: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

fn default_publisher() -> String {
    "DU".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DateCalculationRequest {
    pub base_date: Option<String>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub days: Option<i64>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub months: Option<i64>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub years: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterRequest {
    pub result_set_id: String,
    pub pattern: Option<String>,
    #[serde(default = "default_field")]
    pub field: String,
    pub type_equals: Option<String>,
    pub status_equals: Option<String>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub year_equals: Option<i64>,
    pub date_field: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "de_flexible_bool")]
    pub sort_desc: Option<bool>,
    #[serde(default, deserialize_with = "de_flexible_int")]
    pub limit: Option<i64>,
}

fn default_field() -> String {
    "title".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompareRequest {
    pub eli_a: String,
    pub eli_b: String,
}

// ---------------------------------------------------------------------
// Outputs

#[derive(Debug, Clone, Serialize, Default)]
pub struct SearchOutput {
    pub results: Vec<ActSummary>,
    pub total_count: i64,
    pub query_summary: String,
    pub returned_count: usize,
    pub result_set_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ActDetailOutput {
    #[serde(flatten)]
    pub detail: super::domain::ActDetail,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ContentOutput {
    pub eli: String,
    pub section_id: Option<String>,
    pub section_title: String,
    pub content: String,
    #[serde(default)]
    pub toc: Vec<TocEntry>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct SearchMatch {
    pub section_id: String,
    pub section_title: String,
    pub context: String,
    pub position: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct SearchInActOutput {
    pub eli: String,
    pub query: String,
    pub matches: Vec<SearchMatch>,
    pub total_matches: usize,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct MetadataOutput {
    pub category: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct RelationshipsOutput {
    pub eli: String,
    pub relationship_type: Option<String>,
    pub relationships: serde_json::Map<String, serde_json::Value>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ChangesOutput {
    pub date_range: String,
    pub publisher: String,
    pub keywords: Vec<String>,
    pub changes: Vec<ActSummary>,
    pub total_count: usize,
    pub result_set_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct DateOutput {
    pub base_date: String,
    pub calculated_date: String,
    pub days_offset: i64,
    pub months_offset: i64,
    pub years_offset: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct FilterOutput {
    pub source_result_set_id: String,
    pub result_set_id: Option<String>,
    pub results: Vec<ActSummary>,
    pub original_count: usize,
    pub filtered_count: usize,
    pub filters_applied: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ResultSetInfo {
    pub result_set_id: String,
    pub query_summary: String,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ResultSetListOutput {
    pub sets: Vec<ResultSetInfo>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct LoadedDocumentInfo {
    pub eli: String,
    pub size_bytes: usize,
    pub section_count: usize,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct LoadedDocumentListOutput {
    pub documents: Vec<LoadedDocumentInfo>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct CompareOutput {
    pub eli_a: String,
    pub eli_b: String,
    pub comparison: BTreeMap<String, serde_json::Value>,
    pub common_keywords: Vec<String>,
    pub differences: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_bool_accepts_string_and_native() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "de_flexible_bool")]
            v: Option<bool>,
        }
        let a: Wrapper = serde_json::from_str(r#"{"v":"true"}"#).unwrap();
        let b: Wrapper = serde_json::from_str(r#"{"v":false}"#).unwrap();
        let c: Wrapper = serde_json::from_str(r#"{"v":"yes"}"#).unwrap();
        assert_eq!(a.v, Some(true));
        assert_eq!(b.v, Some(false));
        assert_eq!(c.v, Some(true));
    }

    #[test]
    fn flexible_int_accepts_string_and_native() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "de_flexible_int")]
            v: Option<i64>,
        }
        let a: Wrapper = serde_json::from_str(r#"{"v":"42"}"#).unwrap();
        let b: Wrapper = serde_json::from_str(r#"{"v":42}"#).unwrap();
        assert_eq!(a.v, Some(42));
        assert_eq!(b.v, Some(42));
    }

    #[test]
    fn flexible_int_falls_back_to_none_on_unparseable_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "de_flexible_int")]
            v: Option<i64>,
        }
        let w: Wrapper = serde_json::from_str(r#"{"v":"not-a-number"}"#).unwrap();
        assert_eq!(w.v, None);
    }

    #[test]
    fn search_request_defaults_detail_level_to_standard() {
        let req: SearchRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.detail_level(), DetailLevel::Standard);
    }

    #[test]
    fn filter_request_defaults_field_to_title() {
        let req: FilterRequest = serde_json::from_str(r#"{"result_set_id":"rs_1"}"#).unwrap();
        assert_eq!(req.field, "title");
    }
}
