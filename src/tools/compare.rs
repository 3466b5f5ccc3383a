//! `compare_acts` (§6).

use crate::gateway::GatewayContext;
use crate::hints::compare_hints;
use crate::models::domain::{ActDetail, EnrichedResponse};
use crate::models::tool_io::{CompareOutput, CompareRequest};
use serde_json::json;
use std::collections::BTreeMap;

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: CompareRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(CompareOutput::default(), e.to_string(), "validation").to_json()
        }
    };

    let service = ctx.act_service();
    let (a, b) = tokio::join!(
        service.get_details(&req.eli_a, false),
        service.get_details(&req.eli_b, false),
    );

    match (a, b) {
        (Ok(details_a), Ok(details_b)) => {
            let comparison = build_comparison(&details_a, &details_b);
            let set_a: std::collections::BTreeSet<&str> =
                details_a.keywords.iter().map(String::as_str).collect();
            let set_b: std::collections::BTreeSet<&str> =
                details_b.keywords.iter().map(String::as_str).collect();
            let common_keywords: Vec<String> =
                set_a.intersection(&set_b).map(|s| s.to_string()).collect();

            let differences = build_differences(&details_a, &details_b, &set_a, &set_b);

            EnrichedResponse::ok(
                CompareOutput {
                    eli_a: req.eli_a.clone(),
                    eli_b: req.eli_b.clone(),
                    comparison,
                    common_keywords,
                    differences,
                },
                compare_hints(&req.eli_a, &req.eli_b),
            )
            .to_json()
        }
        (Err(e), _) | (_, Err(e)) => EnrichedResponse::error(
            CompareOutput {
                eli_a: req.eli_a,
                eli_b: req.eli_b,
                ..Default::default()
            },
            e.to_string(),
            e.category(),
        )
        .to_json(),
    }
}

fn build_comparison(a: &ActDetail, b: &ActDetail) -> BTreeMap<String, serde_json::Value> {
    let mut comparison = BTreeMap::new();
    comparison.insert("title_a".to_string(), json!(a.summary.title));
    comparison.insert("title_b".to_string(), json!(b.summary.title));
    comparison.insert("type_a".to_string(), json!(a.summary.act_type.as_deref().unwrap_or("N/A")));
    comparison.insert("type_b".to_string(), json!(b.summary.act_type.as_deref().unwrap_or("N/A")));
    comparison.insert("status_a".to_string(), json!(a.summary.status));
    comparison.insert("status_b".to_string(), json!(b.summary.status));
    comparison.insert(
        "announcement_date_a".to_string(),
        json!(a.announcement_date.as_deref().unwrap_or("N/A")),
    );
    comparison.insert(
        "announcement_date_b".to_string(),
        json!(b.announcement_date.as_deref().unwrap_or("N/A")),
    );
    comparison.insert(
        "promulgation_date_a".to_string(),
        json!(a.summary.promulgation_date.as_deref().unwrap_or("N/A")),
    );
    comparison.insert(
        "promulgation_date_b".to_string(),
        json!(b.summary.promulgation_date.as_deref().unwrap_or("N/A")),
    );
    comparison.insert(
        "entry_into_force_a".to_string(),
        json!(a.entry_into_force.as_deref().unwrap_or("N/A")),
    );
    comparison.insert(
        "entry_into_force_b".to_string(),
        json!(b.entry_into_force.as_deref().unwrap_or("N/A")),
    );
    comparison.insert("keywords_a".to_string(), json!(a.keywords));
    comparison.insert("keywords_b".to_string(), json!(b.keywords));
    comparison
}

fn build_differences(
    a: &ActDetail,
    b: &ActDetail,
    set_a: &std::collections::BTreeSet<&str>,
    set_b: &std::collections::BTreeSet<&str>,
) -> Vec<String> {
    let mut differences = Vec::new();

    if a.summary.title != b.summary.title {
        differences.push("Tytuły różnią się".to_string());
    }

    let type_a = a.summary.act_type.as_deref().unwrap_or("N/A");
    let type_b = b.summary.act_type.as_deref().unwrap_or("N/A");
    if type_a != type_b {
        differences.push(format!("Typy różnią się: '{type_a}' vs '{type_b}'"));
    }

    if a.summary.status != b.summary.status {
        differences.push(format!(
            "Statusy różnią się: '{}' vs '{}'",
            a.summary.status, b.summary.status
        ));
    }

    if a.summary.promulgation_date != b.summary.promulgation_date {
        differences.push(format!(
            "Daty promulgacji różnią się: '{}' vs '{}'",
            a.summary.promulgation_date.as_deref().unwrap_or("N/A"),
            b.summary.promulgation_date.as_deref().unwrap_or("N/A"),
        ));
    }

    if a.entry_into_force != b.entry_into_force {
        differences.push(format!(
            "Daty wejścia w życie różnią się: '{}' vs '{}'",
            a.entry_into_force.as_deref().unwrap_or("N/A"),
            b.entry_into_force.as_deref().unwrap_or("N/A"),
        ));
    }

    if set_a != set_b {
        let only_a: Vec<&str> = set_a.difference(set_b).copied().collect();
        let only_b: Vec<&str> = set_b.difference(set_a).copied().collect();
        if !only_a.is_empty() {
            differences.push(format!("Słowa kluczowe tylko w A: {}", only_a.join(", ")));
        }
        if !only_b.is_empty() {
            differences.push(format!("Słowa kluczowe tylko w B: {}", only_b.join(", ")));
        }
    }

    if differences.is_empty() {
        differences.push("Brak istotnych różnic w metadanych".to_string());
    }

    differences
}
