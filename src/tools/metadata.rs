//! `get_system_metadata` (§6).

use crate::gateway::GatewayContext;
use crate::hints::metadata_hints;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{MetadataOutput, MetadataRequest};

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: MetadataRequest = serde_json::from_value(params).unwrap_or_default();
    let category_str = if req.category.is_empty() {
        "all".to_string()
    } else {
        req.category.clone()
    };

    let metadata = ctx.metadata_service().get_metadata(req.category()).await;
    let count = metadata
        .values()
        .map(|v| v.as_array().map_or(1, Vec::len))
        .sum();

    let response = EnrichedResponse::ok(
        MetadataOutput {
            category: category_str.clone(),
            metadata,
            count,
        },
        metadata_hints(&category_str),
    );
    response.to_json()
}
