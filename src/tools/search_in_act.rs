//! `search_in_act` (§6).

use crate::gateway::GatewayContext;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{SearchInActOutput, SearchInActRequest, SearchMatch};

const DEFAULT_CONTEXT_CHARS: usize = 500;

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: SearchInActRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(SearchInActOutput::default(), e.to_string(), "validation")
                .to_json()
        }
    };

    let context_chars = req
        .context_chars
        .filter(|&c| c > 0)
        .map(|c| c as usize)
        .unwrap_or(DEFAULT_CONTEXT_CHARS);

    match ctx.doc_store.search(&req.eli, &req.query, context_chars).await {
        Ok(hits) => {
            let matches: Vec<SearchMatch> = hits
                .into_iter()
                .map(|hit| SearchMatch {
                    section_id: hit.section_id,
                    section_title: hit.section_title,
                    context: hit.context,
                    position: format!("{}-{}", hit.match_start, hit.match_end),
                })
                .collect();
            let total_matches = matches.len();
            EnrichedResponse::ok(
                SearchInActOutput {
                    eli: req.eli,
                    query: req.query,
                    matches,
                    total_matches,
                },
                Vec::new(),
            )
            .to_json()
        }
        Err(e) => EnrichedResponse::error(
            SearchInActOutput {
                eli: req.eli,
                query: req.query,
                ..Default::default()
            },
            e.to_string(),
            e.category(),
        )
        .to_json(),
    }
}
