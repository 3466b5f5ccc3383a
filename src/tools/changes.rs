//! `track_legal_changes` (§6).

use crate::gateway::GatewayContext;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{ChangesOutput, TrackChangesRequest};

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: TrackChangesRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(ChangesOutput::default(), e.to_string(), "validation").to_json()
        }
    };

    match run(ctx, &req).await {
        Ok(resp) => resp.to_json(),
        Err(e) => {
            let date_to = req.date_to.clone().unwrap_or_else(|| "dziś".to_string());
            EnrichedResponse::error(
                ChangesOutput {
                    date_range: format!("{} do {}", req.date_from, date_to),
                    publisher: req.publisher.clone(),
                    keywords: req.keywords.clone(),
                    ..Default::default()
                },
                e.to_string(),
                e.category(),
            )
            .to_json()
        }
    }
}

async fn run(
    ctx: &GatewayContext,
    req: &TrackChangesRequest,
) -> crate::errors::GatewayResult<EnrichedResponse<ChangesOutput>> {
    let today = GatewayContext::today();
    let (results, date_from, date_to) = ctx
        .changes_service()
        .track_changes(
            &req.publisher,
            &req.date_from,
            req.date_to.as_deref(),
            &req.keywords,
            &today,
        )
        .await?;
    let date_range = format!("{date_from} to {date_to}");

    let result_set_id = if results.is_empty() {
        None
    } else {
        let mut query_summary = format!("changes: {date_range} | publisher={}", req.publisher);
        if !req.keywords.is_empty() {
            query_summary.push_str(&format!(" | keywords={}", req.keywords.join(",")));
        }
        Some(
            ctx.result_store
                .store(results.clone(), query_summary, results.len())
                .await,
        )
    };

    let total_count = results.len();
    Ok(EnrichedResponse::ok(
        ChangesOutput {
            date_range,
            publisher: req.publisher.clone(),
            keywords: req.keywords.clone(),
            changes: results,
            total_count,
            result_set_id,
        },
        Vec::new(),
    ))
}
