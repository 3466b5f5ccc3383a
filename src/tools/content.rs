//! `read_act_content` and `list_loaded_documents` (§6).

use crate::gateway::GatewayContext;
use crate::hints::content_hints;
use crate::models::domain::{EnrichedResponse, Hint};
use crate::models::tool_io::{
    ContentOutput, LoadedDocumentInfo, LoadedDocumentListOutput, ReadContentRequest, TocEntry,
};
use serde_json::json;

pub async fn handle_read(ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: ReadContentRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(ContentOutput::default(), e.to_string(), "validation").to_json()
        }
    };

    match &req.section {
        None => match ctx.doc_store.get_toc(&req.eli).await {
            Ok(sections) => {
                let toc: Vec<TocEntry> = sections
                    .iter()
                    .map(|s| TocEntry {
                        id: s.id.clone(),
                        title: s.title.clone(),
                        level: s.level,
                    })
                    .collect();
                let count = toc.len();
                EnrichedResponse::ok(
                    ContentOutput {
                        eli: req.eli.clone(),
                        section_id: None,
                        section_title: "Spis treści".to_string(),
                        content: format!("Znaleziono {count} sekcji"),
                        toc,
                    },
                    content_hints(&req.eli, count > 0),
                )
                .to_json()
            }
            Err(e) => EnrichedResponse::error(
                ContentOutput {
                    eli: req.eli.clone(),
                    ..Default::default()
                },
                e.to_string(),
                e.category(),
            )
            .to_json(),
        },
        Some(section) => match ctx.doc_store.get_section(&req.eli, section).await {
            Ok(Some(content)) => EnrichedResponse::ok(
                ContentOutput {
                    eli: req.eli.clone(),
                    section_id: Some(section.clone()),
                    section_title: section.clone(),
                    content,
                    toc: Vec::new(),
                },
                content_hints(&req.eli, true),
            )
            .to_json(),
            Ok(None) => EnrichedResponse::error(
                ContentOutput {
                    eli: req.eli.clone(),
                    section_id: Some(section.clone()),
                    ..Default::default()
                },
                format!(
                    "Sekcja '{section}' nie znaleziona w akcie {}. \
                     Użyj read_act_content(eli='{}') aby zobaczyć dostępne sekcje.",
                    req.eli, req.eli
                ),
                "not_found",
            )
            .to_json(),
            Err(e) => EnrichedResponse::error(
                ContentOutput {
                    eli: req.eli.clone(),
                    section_id: Some(section.clone()),
                    ..Default::default()
                },
                e.to_string(),
                e.category(),
            )
            .to_json(),
        },
    }
}

pub async fn handle_list_loaded(ctx: &GatewayContext, _params: serde_json::Value) -> String {
    let raw = ctx.doc_store.list_documents().await;
    let documents: Vec<LoadedDocumentInfo> = raw
        .into_iter()
        .map(|(eli, size_bytes, section_count)| LoadedDocumentInfo {
            eli,
            size_bytes,
            section_count,
        })
        .collect();

    let mut hints = Vec::new();
    if let Some(first) = documents.first() {
        hints.push(Hint::with_params(
            format!("Użyj read_act_content(eli='{}') aby czytać treść.", first.eli),
            "read_act_content",
            json!({"eli": first.eli}),
        ));
    }

    let count = documents.len();
    EnrichedResponse::ok(LoadedDocumentListOutput { documents, count }, hints).to_json()
}
