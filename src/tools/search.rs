//! `search_legal_acts` (§6).

use crate::gateway::GatewayContext;
use crate::hints::search_hints;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{SearchOutput, SearchRequest};

const DEFAULT_SEARCH_LIMIT: usize = 20;

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: SearchRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(SearchOutput::default(), e.to_string(), "validation").to_json()
        }
    };

    match run(ctx, &req).await {
        Ok(resp) => resp.to_json(),
        Err(e) => EnrichedResponse::error(
            SearchOutput {
                query_summary: String::new(),
                ..Default::default()
            },
            e.to_string(),
            e.category(),
        )
        .to_json(),
    }
}

async fn run(
    ctx: &GatewayContext,
    req: &SearchRequest,
) -> crate::errors::GatewayResult<EnrichedResponse<SearchOutput>> {
    let (mut results, total_count, query_summary) =
        ctx.search_service().search(req, req.detail_level()).await?;

    let effective_limit = req
        .limit
        .filter(|&l| l > 0)
        .map(|l| l as usize)
        .unwrap_or(DEFAULT_SEARCH_LIMIT);
    let was_truncated = results.len() > effective_limit;
    if was_truncated {
        results.truncate(effective_limit);
    }

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
