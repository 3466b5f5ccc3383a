//! `analyze_act_relationships` (§6).

use crate::eli::parse_eli;
use crate::gateway::GatewayContext;
use crate::hints::relationships_hints;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{RelationshipsOutput, RelationshipsRequest};
use serde_json::{Map, Value};
use std::time::Duration;

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: RelationshipsRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(RelationshipsOutput::default(), e.to_string(), "validation")
                .to_json()
        }
    };

    match run(ctx, &req).await {
        Ok(resp) => resp.to_json(),
        Err(e) => EnrichedResponse::error(
            RelationshipsOutput {
                eli: req.eli,
                relationship_type: req.relationship_type,
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
    req: &RelationshipsRequest,
) -> crate::errors::GatewayResult<EnrichedResponse<RelationshipsOutput>> {
    let eli = parse_eli(&req.eli)?;
    let ttl = Duration::from_secs(ctx.settings.cache_details_ttl_secs);
    let references = ctx
        .client
        .get_act_references(&eli.publisher, eli.year, eli.pos, ttl)
        .await?;

    let mut relationships = Map::new();
    match references {
        Value::Object(map) => {
            for (key, value) in map {
                if req.relationship_type.as_deref().is_none_or(|t| t == key) {
                    let as_list = match value {
                        Value::Array(items) => Value::Array(items),
                        other => Value::Array(vec![other]),
                    };
                    relationships.insert(key, as_list);
                }
            }
        }
        Value::Array(items) => {
            relationships.insert("references".to_string(), Value::Array(items));
        }
        _ => {}
    }

    let total_count: usize = relationships
        .values()
        .map(|v| v.as_array().map_or(1, Vec::len))
        .sum();
    let keys: Vec<String> = relationships.keys().cloned().collect();

    Ok(EnrichedResponse::ok(
        RelationshipsOutput {
            eli: req.eli.clone(),
            relationship_type: req.relationship_type.clone(),
            relationships,
            total_count,
        },
        relationships_hints(&req.eli, &keys),
    ))
}
