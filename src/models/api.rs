//! Upstream wire shapes, deserialized verbatim from `api.sejm.gov.pl/eli/`
//! JSON before being mapped into the domain model (§6 external interfaces).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActSummaryWire {
    #[serde(rename = "ELI")]
    pub eli: String,
    pub publisher: String,
    pub year: i64,
    pub pos: i64,
    pub title: String,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub act_type: Option<String>,
    pub promulgation: Option<String>,
    #[serde(rename = "dateEffect")]
    pub date_effect: Option<String>,
    #[serde(rename = "inForce")]
    pub in_force: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActDetailWire {
    #[serde(flatten)]
    pub summary: ActSummaryWire,
    #[serde(rename = "announcementDate")]
    pub announcement_date: Option<String>,
    #[serde(rename = "entryIntoForce")]
    pub entry_into_force: Option<String>,
    #[serde(rename = "validFrom")]
    pub valid_from: Option<String>,
    #[serde(rename = "repealDate")]
    pub repeal_date: Option<String>,
    #[serde(rename = "changeDate")]
    pub change_date: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub references: BTreeMap<String, Vec<ActReferenceWire>>,
    pub volume: Option<i64>,
    #[serde(rename = "textPDF")]
    pub text_pdf: Option<bool>,
    #[serde(rename = "textHTML")]
    pub text_html: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActReferenceWire {
    #[serde(rename = "ELI")]
    pub eli: Option<String>,
    pub title: Option<String>,
    pub art: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StructureNodeWire {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub children: Vec<StructureNodeWire>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchApiResponse {
    pub count: i64,
    #[serde(default)]
    pub items: Vec<ActSummaryWire>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublisherInfo {
    pub code: String,
    pub name: String,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(rename = "actsCount")]
    pub acts_count: Option<i64>,
    #[serde(default)]
    pub years: Vec<i64>,
}

impl From<ActSummaryWire> for crate::models::domain::ActSummary {
    fn from(w: ActSummaryWire) -> Self {
        crate::models::domain::ActSummary {
            eli: w.eli,
            publisher: w.publisher,
            year: w.year,
            pos: w.pos,
            title: w.title,
            status: w.status.unwrap_or_default(),
            act_type: w.act_type,
            promulgation_date: w.promulgation,
            effective_date: w.date_effect,
            in_force: w.in_force.map(|s| s.eq_ignore_ascii_case("true")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn act_summary_wire_deserializes_eli_field_name() {
        let json = r#"{"ELI":"DU/2024/1716","publisher":"DU","year":2024,"pos":1716,
                        "title":"Ustawa o czymś","status":"obowiązujący"}"#;
        let wire: ActSummaryWire = serde_json::from_str(json).unwrap();
        assert_eq!(wire.eli, "DU/2024/1716");
        assert_eq!(wire.year, 2024);
    }

    #[test]
    fn search_api_response_defaults_items_when_absent() {
        let json = r#"{"count":0}"#;
        let resp: SearchApiResponse = serde_json::from_str(json).unwrap();
        assert!(resp.items.is_empty());
    }

    #[test]
    fn wire_to_domain_conversion_preserves_eli() {
        let wire = ActSummaryWire {
            eli: "MP/2023/5".to_string(),
            publisher: "MP".to_string(),
            year: 2023,
            pos: 5,
            title: "Obwieszczenie".to_string(),
            status: Some("uchylony".to_string()),
            act_type: None,
            promulgation: None,
            date_effect: None,
            in_force: Some("false".to_string()),
        };
        let domain: crate::models::domain::ActSummary = wire.into();
        assert_eq!(domain.eli, "MP/2023/5");
        assert_eq!(domain.in_force, Some(false));
    }
}
