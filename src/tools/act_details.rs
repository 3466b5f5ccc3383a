//! `get_act_details` (§6).

use crate::gateway::GatewayContext;
use crate::hints::act_details_hints;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{ActDetailOutput, ActDetailsRequest};

pub async fn handle(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: ActDetailsRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(ActDetailOutput::default(), e.to_string(), "validation")
                .to_json()
        }
    };
    let load_content = req.load_content.unwrap_or(false);

    match ctx.act_service().get_details(&req.eli, load_content).await {
        Ok(detail) => {
            let just_loaded = load_content && detail.is_loaded;
            let hints = act_details_hints(&req.eli, detail.is_loaded, detail.has_html, just_loaded);
            EnrichedResponse::ok(ActDetailOutput { detail }, hints).to_json()
        }
        Err(e) => EnrichedResponse::error(ActDetailOutput::default(), e.to_string(), e.category()).to_json(),
    }
}
