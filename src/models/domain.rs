//! Domain data model (§3), independent of the upstream wire shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a search/browse list. Immutable after construction.
///
/// Invariant: `eli == format!("{publisher}/{year}/{pos}")`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ActSummary {
    pub eli: String,
    pub publisher: String,
    pub year: i64,
    pub pos: i64,
    pub title: String,
    pub status: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub act_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promulgation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_force: Option<bool>,
}

impl ActSummary {
    pub fn eli_of(publisher: &str, year: i64, pos: i64) -> String {
        format!("{publisher}/{year}/{pos}")
    }
}

/// ActSummary extended with full detail fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActDetail {
    #[serde(flatten)]
    pub summary: ActSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_into_force: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeal_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_date: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub references: BTreeMap<String, Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
    pub has_html: bool,
    pub has_pdf: bool,
    #[serde(default)]
    pub toc: Vec<TocNode>,
    pub is_loaded: bool,
}

/// A node of the best-effort `struct` TOC fetch (not the section index
/// computed by the Content Processor — see [`Section`]).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TocNode {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub children: Vec<TocNode>,
}

/// A node in a document's computed table of contents (§4.4's section index).
///
/// Sections are totally ordered by `start_pos`; `end_pos > start_pos` for all
/// but the final section, whose `end_pos` equals document length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub start_pos: usize,
    pub end_pos: usize,
}

/// A Document Store entry.
///
/// Invariants: (a) `size_bytes <= max_size_bytes`; (b) for every section `s`,
/// `s.end_pos <= size_bytes`; (c) sections are disjoint and ordered.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub eli: String,
    pub markdown: String,
    pub sections: Vec<Section>,
    pub size_bytes: usize,
    pub loaded_at: std::time::Instant,
    pub last_accessed: std::time::Instant,
}

/// A Result Set Store entry.
#[derive(Debug, Clone)]
pub struct StoredResultSet {
    pub result_set_id: String,
    pub results: Vec<ActSummary>,
    pub query_summary: String,
    pub total_count: i64,
    pub created_at: std::time::Instant,
    pub last_accessed: std::time::Instant,
}

/// A single match produced by [`crate::document_store::DocumentStore::search`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub section_id: String,
    pub section_title: String,
    pub context: String,
    pub match_start: usize,
    pub match_end: usize,
}

/// A suggested next action.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hint {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl Hint {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tool: None,
            parameters: None,
        }
    }

    pub fn with_tool(message: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tool: Some(tool.into()),
            parameters: None,
        }
    }

    pub fn with_params(
        message: impl Into<String>,
        tool: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            message: message.into(),
            tool: Some(tool.into()),
            parameters: Some(parameters),
        }
    }
}

/// The uniform envelope returned by every tool. On error, `data` is a
/// zero-valued instance of the tool's output type and
/// `metadata.error_category` is set.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl<T> EnrichedResponse<T> {
    pub fn ok(data: T, hints: Vec<Hint>) -> Self {
        Self {
            data,
            hints,
            error: None,
            metadata: serde_json::Map::new(),
        }
    }

    pub fn error(data: T, message: impl Into<String>, category: &'static str) -> Self {
        let mut metadata = serde_json::Map::new();
        metadata.insert("error_category".into(), category.into());
        Self {
            data,
            hints: Vec::new(),
            error: Some(message.into()),
            metadata,
        }
    }
}

impl<T: Serialize> EnrichedResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eli_invariant_holds() {
        assert_eq!(ActSummary::eli_of("DU", 2024, 1716), "DU/2024/1716");
    }

    #[test]
    fn enriched_response_shape_is_valid_json() {
        let resp = EnrichedResponse::ok(ActSummary::eli_of("DU", 2024, 1), vec![]);
        let json = resp.to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("data").is_some());
        assert!(!value["data"].is_null());
    }

    #[test]
    fn error_response_sets_category_and_zero_data() {
        let resp: EnrichedResponse<Vec<ActSummary>> =
            EnrichedResponse::error(Vec::new(), "boom", "internal");
        assert_eq!(resp.metadata["error_category"], "internal");
        assert!(resp.data.is_empty());
    }
}
