//! `filter_results` and `list_result_sets` (§6).

use crate::gateway::GatewayContext;
use crate::models::domain::{EnrichedResponse, Hint};
use crate::models::tool_io::{FilterOutput, FilterRequest, ResultSetInfo, ResultSetListOutput};
use crate::result_store::FilterOptions;
use serde_json::json;
use std::collections::BTreeMap;

pub async fn handle_filter(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: FilterRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(FilterOutput::default(), e.to_string(), "validation").to_json()
        }
    };

    let opts = FilterOptions {
        pattern: req.pattern.clone(),
        field: Some(req.field.clone()),
        type_equals: req.type_equals.clone(),
        status_equals: req.status_equals.clone(),
        year_equals: req.year_equals,
        date_field: req.date_field.clone(),
        date_from: req.date_from.clone(),
        date_to: req.date_to.clone(),
        sort_by: req.sort_by.clone(),
        sort_desc: req.sort_desc.unwrap_or(false),
        limit: req.limit,
    };

    match ctx.result_store.filter_results(&req.result_set_id, &opts).await {
        Ok((filtered, original_count)) => {
            let filters_applied = build_filters_applied(&req, &opts);

            let new_set_id = if filtered.is_empty() {
                None
            } else {
                let filters_desc = describe_filters(&filters_applied);
                let query_summary = format!("filtered({}): {filters_desc}", req.result_set_id);
                Some(
                    ctx.result_store
                        .store(filtered.clone(), query_summary, filtered.len() as i64)
                        .await,
                )
            };

            let mut hints = Vec::new();
            if let Some(first) = filtered.first() {
                hints.push(Hint::with_params(
                    "Użyj get_act_details aby zobaczyć szczegóły wybranego aktu.",
                    "get_act_details",
                    json!({"eli": first.eli}),
                ));
                if let Some(new_id) = &new_set_id {
                    hints.push(Hint::with_params(
                        format!("Możesz dalej filtrować te wyniki używając result_set_id='{new_id}'."),
                        "filter_results",
                        json!({"result_set_id": new_id}),
                    ));
                }
            }

            let filtered_count = filtered.len();
            EnrichedResponse::ok(
                FilterOutput {
                    source_result_set_id: req.result_set_id.clone(),
                    result_set_id: new_set_id,
                    results: filtered,
                    original_count,
                    filtered_count,
                    filters_applied,
                },
                hints,
            )
            .to_json()
        }
        Err(e) => EnrichedResponse::error(
            FilterOutput {
                source_result_set_id: req.result_set_id.clone(),
                ..Default::default()
            },
            e.to_string(),
            e.category(),
        )
        .to_json(),
    }
}

fn build_filters_applied(
    req: &FilterRequest,
    opts: &FilterOptions,
) -> BTreeMap<String, serde_json::Value> {
    let mut applied = BTreeMap::new();
    if let Some(pattern) = &req.pattern {
        applied.insert("pattern".to_string(), json!(pattern));
        applied.insert("field".to_string(), json!(req.field));
    }
    if let Some(v) = &req.type_equals {
        applied.insert("type_equals".to_string(), json!(v));
    }
    if let Some(v) = &req.status_equals {
        applied.insert("status_equals".to_string(), json!(v));
    }
    if let Some(v) = req.year_equals {
        if v != 0 {
            applied.insert("year_equals".to_string(), json!(v));
        }
    }
    if let Some(date_field) = &req.date_field {
        applied.insert("date_field".to_string(), json!(date_field));
        if let Some(from) = &req.date_from {
            applied.insert("date_from".to_string(), json!(from));
        }
        if let Some(to) = &req.date_to {
            applied.insert("date_to".to_string(), json!(to));
        }
    }
    if let Some(sort_by) = &req.sort_by {
        applied.insert("sort_by".to_string(), json!(sort_by));
        applied.insert("sort_desc".to_string(), json!(opts.sort_desc));
    }
    if let Some(limit) = req.limit {
        if limit != 0 {
            applied.insert("limit".to_string(), json!(limit));
        }
    }
    applied
}

fn describe_filters(applied: &BTreeMap<String, serde_json::Value>) -> String {
    if applied.is_empty() {
        return "no filters".to_string();
    }
    applied
        .iter()
        .map(|(k, v)| format!("{k}={}", v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string())))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub async fn handle_list_sets(ctx: &GatewayContext, _params: serde_json::Value) -> String {
    let raw = ctx.result_store.list_sets().await;
    let sets: Vec<ResultSetInfo> = raw
        .into_iter()
        .map(|rs| ResultSetInfo {
            result_set_id: rs.result_set_id,
            query_summary: rs.query_summary,
            total_count: rs.total_count as usize,
        })
        .collect();

    let mut hints = Vec::new();
    if let Some(first) = sets.first() {
        hints.push(Hint::with_params(
            format!(
                "Użyj filter_results(result_set_id='{}') aby filtrować wyniki.",
                first.result_set_id
            ),
            "filter_results",
            json!({"result_set_id": first.result_set_id}),
        ));
    }

    let count = sets.len();
    EnrichedResponse::ok(ResultSetListOutput { sets, count }, hints).to_json()
}
