//! Act detail retrieval with best-effort structure fetch and optional
//! content loading into the Document Store (§4.7).

use crate::client::SejmClient;
use crate::content::ContentProcessor;
use crate::document_store::DocumentStore;
use crate::eli::parse_eli;
use crate::errors::GatewayResult;
use crate::models::api::{ActDetailWire, StructureNodeWire};
use crate::models::domain::{ActDetail, ActSummary, TocNode};
use std::time::Duration;
use tracing::{debug, error, info};

pub struct ActService<'a> {
    client: &'a SejmClient,
    doc_store: &'a DocumentStore,
    content: &'a ContentProcessor,
    details_ttl: Duration,
}

impl<'a> ActService<'a> {
    pub fn new(
        client: &'a SejmClient,
        doc_store: &'a DocumentStore,
        content: &'a ContentProcessor,
        details_ttl: Duration,
    ) -> Self {
        Self {
            client,
            doc_store,
            content,
            details_ttl,
        }
    }

    pub async fn get_details(&self, eli_str: &str, load_content: bool) -> GatewayResult<ActDetail> {
        let eli = parse_eli(eli_str)?;
        let canonical = eli.to_id();

        let wire = self
            .client
            .get_json_typed::<ActDetailWire>(
                &format!("acts/{}/{}/{}", eli.publisher, eli.year, eli.pos),
                &[],
                Some(self.details_ttl),
            )
            .await?;

        let toc_value = self
            .client
            .get_act_structure(&eli.publisher, eli.year, eli.pos, self.details_ttl)
            .await;
        let toc = parse_toc(toc_value);

        let has_html = wire.text_html.unwrap_or(false);
        let has_pdf = wire.text_pdf.unwrap_or(false);

        let mut is_loaded = self.doc_store.is_loaded(&canonical).await;
        if load_content && !is_loaded {
            self.load_content(&canonical, &eli.publisher, eli.year, eli.pos, has_html, has_pdf)
                .await;
            is_loaded = self.doc_store.is_loaded(&canonical).await;
        }

        let summary = ActSummary {
            eli: canonical,
            publisher: wire.summary.publisher,
            year: wire.summary.year,
            pos: wire.summary.pos,
            title: wire.summary.title,
            status: wire.summary.status.unwrap_or_default(),
            act_type: wire.summary.act_type,
            promulgation_date: wire.summary.promulgation,
            effective_date: wire.summary.date_effect,
            in_force: wire.summary.in_force.map(|s| s.eq_ignore_ascii_case("true")),
        };

        Ok(ActDetail {
            summary,
            announcement_date: wire.announcement_date,
            entry_into_force: wire.entry_into_force,
            valid_from: wire.valid_from,
            repeal_date: wire.repeal_date,
            change_date: wire.change_date,
            keywords: wire.keywords,
            references: wire
                .references
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().map(|r| serde_json::to_value(r).unwrap_or_default()).collect()))
                .collect(),
            volume: wire.volume,
            has_html,
            has_pdf,
            toc,
            is_loaded,
        })
    }

    async fn load_content(
        &self,
        canonical_eli: &str,
        publisher: &str,
        year: i64,
        pos: i64,
        has_html: bool,
        has_pdf: bool,
    ) {
        let markdown = if has_html {
            match self.client.get_act_html(publisher, year, pos).await {
                Ok(html) => self.content.html_to_markdown(&html).ok(),
                Err(e) => {
                    debug!("failed to fetch html for {canonical_eli}: {e}");
                    None
                }
            }
        } else if has_pdf {
            match self.client.get_act_pdf_bytes(publisher, year, pos).await {
                Ok(bytes) => self.content.pdf_to_text(&bytes).ok().filter(|s| !s.is_empty()).or_else(|| {
                    Some(format!(
                        "*Content extraction failed. PDF available at: {}*",
                        self.client.get_act_pdf_url(publisher, year, pos)
                    ))
                }),
                Err(_) => Some(format!(
                    "*No readable content available for {canonical_eli}. PDF URL: {}*",
                    self.client.get_act_pdf_url(publisher, year, pos)
                )),
            }
        } else {
            None
        };

        let Some(markdown) = markdown else {
            error!("no content available for {canonical_eli}");
            return;
        };

        let sections = self.content.index_sections(&markdown);
        info!("loaded content for {canonical_eli}: {} sections", sections.len());
        self.doc_store.load(canonical_eli, markdown, sections).await;
    }
}

fn parse_toc(value: serde_json::Value) -> Vec<TocNode> {
    let nodes: Vec<StructureNodeWire> = if value.is_array() {
        serde_json::from_value(value).unwrap_or_default()
    } else if value.is_object() {
        serde_json::from_value::<StructureNodeWire>(value)
            .map(|n| vec![n])
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    nodes.into_iter().map(convert_node).collect()
}

fn convert_node(node: StructureNodeWire) -> TocNode {
    TocNode {
        id: node.id.unwrap_or_default(),
        title: node.title,
        node_type: node.node_type,
        children: node.children.into_iter().map(convert_node).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::CircuitBreaker;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_details_without_load_content_leaves_document_unloaded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ELI": "DU/2024/1", "publisher": "DU", "year": 2024, "pos": 1,
                "title": "Ustawa", "status": "obowiązujący", "textHTML": true
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/1/struct"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = SejmClient::with_base_url(
            format!("{}/eli", server.uri()),
            Duration::from_secs(5),
            4,
            0,
            10,
            CircuitBreaker::with_defaults(),
        );
        let doc_store = DocumentStore::with_defaults();
        let content = ContentProcessor::new();
        let service = ActService::new(&client, &doc_store, &content, Duration::from_secs(60));

        let detail = service.get_details("DU/2024/1", false).await.unwrap();
        assert!(!detail.is_loaded);
        assert!(detail.toc.is_empty());
        assert!(detail.has_html);
    }

    #[tokio::test]
    async fn get_details_with_load_content_fetches_and_indexes_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ELI": "DU/2024/2", "publisher": "DU", "year": 2024, "pos": 2,
                "title": "Ustawa", "status": "obowiązujący", "textHTML": true
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/2/struct"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/2/text.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Tytuł</h1><p>Treść</p>"))
            .mount(&server)
            .await;

        let client = SejmClient::with_base_url(
            format!("{}/eli", server.uri()),
            Duration::from_secs(5),
            4,
            0,
            10,
            CircuitBreaker::with_defaults(),
        );
        let doc_store = DocumentStore::with_defaults();
        let content = ContentProcessor::new();
        let service = ActService::new(&client, &doc_store, &content, Duration::from_secs(60));

        let detail = service.get_details("DU/2024/2", true).await.unwrap();
        assert!(detail.is_loaded);
    }
}
