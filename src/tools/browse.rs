//! `browse_acts` (§6).

use crate::gateway::GatewayContext;
use crate::hints::search_hints;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{BrowseRequest, SearchOutput};

const DEFAULT_BROWSE_LIMIT: usize = 20;

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: BrowseRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(SearchOutput::default(), e.to_string(), "validation").to_json()
        }
    };

    match run(ctx, &req).await {
        Ok(resp) => resp.to_json(),
        Err(e) => {
            let query_summary = format!("publisher={} | year={}", req.publisher, req.year.unwrap_or(0));
            EnrichedResponse::error(
                SearchOutput {
                    query_summary,
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
    req: &BrowseRequest,
) -> crate::errors::GatewayResult<EnrichedResponse<SearchOutput>> {
    let year = req.year.unwrap_or(0);
    let (mut results, total_count) = ctx
        .search_service()
        .browse(&req.publisher, year, req.detail_level())
        .await?;

    let effective_limit = req
        .limit
        .filter(|&l| l > 0)
        .map(|l| l as usize)
        .unwrap_or(DEFAULT_BROWSE_LIMIT);
    let was_truncated = results.len() > effective_limit;
    if was_truncated {
        results.truncate(effective_limit);
    }

    let query_summary = format!("publisher={} | year={year}", req.publisher);
    let result_set_id = if results.is_empty() {
        None
    } else {
        Some(
            ctx.result_store
                .store(results.clone(), query_summary.clone(), total_count)
                .await,
        )
    };
    let first_eli = results.first().map(|r| r.eli.clone());

    let hints = search_hints(
        total_count,
        !results.is_empty(),
        first_eli.as_deref(),
        result_set_id.as_deref(),
        was_truncated,
        Some(effective_limit as i64),
    );

    Ok(EnrichedResponse::ok(
        SearchOutput {
            returned_count: results.len(),
            results,
            total_count,
            query_summary,
            result_set_id,
        },
        hints,
    ))
}
