//! Dispatch registry mapping the fixed tool catalog (§6) to their handlers.

pub mod act_details;
pub mod browse;
pub mod changes;
pub mod compare;
pub mod content;
pub mod dates;
pub mod filter_results;
pub mod metadata;
pub mod relationships;
pub mod search;
pub mod search_in_act;

use crate::gateway::GatewayContext;
use crate::models::domain::EnrichedResponse;

/// Fixed 13-tool catalog, in upstream registration order: (name, one-line
/// description).
pub const TOOL_CATALOG: &[(&str, &str)] = &[
    ("get_system_metadata", "List available publishers, act types, statuses or keywords."),
    ("search_legal_acts", "Search the registry by publisher, year, title, keywords or date range."),
    ("browse_acts", "List every act published by one publisher in one year."),
    ("get_act_details", "Fetch full metadata for a single act, optionally loading its content."),
    ("read_act_content", "Read a loaded act's table of contents or one section's text."),
    ("search_in_act", "Full-text search within a previously loaded act."),
    ("analyze_act_relationships", "List acts an act amends, is amended by, or is based on."),
    ("track_legal_changes", "Find acts published or changed within a date range."),
    ("calculate_legal_date", "Add or subtract days/months/years from a base date."),
    ("filter_results", "Narrow a stored search/browse/changes result set."),
    ("list_result_sets", "List active stored result sets."),
    ("list_loaded_documents", "List acts currently held in the document cache."),
    ("compare_acts", "Compare the metadata of two acts."),
];

pub const TOOL_NAMES: &[&str] = &[
    "get_system_metadata",
    "search_legal_acts",
    "browse_acts",
    "get_act_details",
    "read_act_content",
    "search_in_act",
    "analyze_act_relationships",
    "track_legal_changes",
    "calculate_legal_date",
    "filter_results",
    "list_result_sets",
    "list_loaded_documents",
    "compare_acts",
];

pub async fn dispatch(ctx: &GatewayContext, tool_name: &str, params: serde_json::Value) -> String {
    match tool_name {
        "get_system_metadata" => metadata::handle(ctx, params).await,
        "search_legal_acts" => search::handle(ctx, params).await,
        "browse_acts" => browse::handle(ctx, params).await,
        "get_act_details" => act_details::handle(ctx, params).await,
        "read_act_content" => content::handle_read(ctx, params).await,
        "search_in_act" => search_in_act::handle(ctx, params).await,
        "analyze_act_relationships" => relationships::handle(ctx, params).await,
        "track_legal_changes" => changes::handle(ctx, params).await,
        "calculate_legal_date" => dates::handle(ctx, params).await,
        "filter_results" => filter_results::handle_filter(ctx, params).await,
        "list_result_sets" => filter_results::handle_list_sets(ctx, params).await,
        "list_loaded_documents" => content::handle_list_loaded(ctx, params).await,
        "compare_acts" => compare::handle(ctx, params).await,
        other => EnrichedResponse::error(
            serde_json::json!({}),
            format!("Nieznane narzędzie: {other}"),
            "validation",
        )
        .to_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_thirteen_tools() {
        assert_eq!(TOOL_NAMES.len(), 13);
    }
}
