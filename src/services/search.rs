//! Search and browse of legal acts (§4.7), grounded on the upstream query
//! parameter mapping documented in SPEC_FULL.md §4.7.

use crate::client::SejmClient;
use crate::models::api::{ActSummaryWire, SearchApiResponse};
use crate::models::domain::ActSummary;
use crate::models::enums::DetailLevel;
use crate::models::tool_io::SearchRequest;
use crate::errors::GatewayResult;
use std::collections::BTreeMap;
use std::time::Duration;

pub struct SearchService<'a> {
    client: &'a SejmClient,
    search_ttl: Duration,
    browse_ttl: Duration,
}

impl<'a> SearchService<'a> {
    pub fn new(client: &'a SejmClient, search_ttl: Duration, browse_ttl: Duration) -> Self {
        Self {
            client,
            search_ttl,
            browse_ttl,
        }
    }

    pub async fn search(
        &self,
        req: &SearchRequest,
        detail_level: DetailLevel,
    ) -> GatewayResult<(Vec<ActSummary>, i64, String)> {
        let publisher = req.publisher.clone().unwrap_or_else(|| "DU".to_string());
        let mut params: BTreeMap<&str, String> = BTreeMap::new();
        let mut summary_parts = vec![format!("publisher={publisher}")];
        params.insert("publisher", publisher.clone());

        if let Some(year) = req.year {
            params.insert("year", year.to_string());
            summary_parts.push(format!("year={year}"));
        }
        if !req.keywords.is_empty() {
            let joined = req.keywords.join(",");
            params.insert("keyword", joined.clone());
            summary_parts.push(format!("keywords={joined}"));
        }
        if let Some(date_from) = &req.date_from {
            params.insert("dateEffectFrom", date_from.clone());
            summary_parts.push(format!("effective_from={date_from}"));
        }
        if let Some(date_to) = &req.date_to {
            params.insert("dateEffectTo", date_to.clone());
            summary_parts.push(format!("effective_to={date_to}"));
        }
        if let Some(title) = &req.title {
            params.insert("title", title.clone());
            summary_parts.push(format!("title={title}"));
        }
        if let Some(act_type) = &req.act_type {
            params.insert("type", act_type.clone());
            summary_parts.push(format!("type={act_type}"));
        }
        if let Some(pub_from) = &req.pub_date_from {
            params.insert("dateFrom", pub_from.clone());
        }
        if let Some(pub_to) = &req.pub_date_to {
            params.insert("dateTo", pub_to.clone());
        }
        if let Some(in_force) = req.in_force {
            params.insert("inForce", in_force.to_string());
            summary_parts.push(format!("in_force={in_force}"));
        }
        if let Some(limit) = req.limit {
            params.insert("limit", limit.to_string());
        }
        if let Some(offset) = req.offset {
            params.insert("offset", offset.to_string());
        }

        let data = self.client.search_acts(&params, self.search_ttl).await?;
        let parsed: SearchApiResponse = serde_json::from_value(data)
            .map_err(|e| crate::errors::GatewayError::Internal(anyhow::anyhow!(e)))?;

        let total_count = parsed.count;
        let results: Vec<ActSummary> = parsed
            .items
            .into_iter()
            .map(|item| format_act(item, detail_level))
            .collect();

        Ok((results, total_count, summary_parts.join(" | ")))
    }

    pub async fn browse(
        &self,
        publisher: &str,
        year: i64,
        detail_level: DetailLevel,
    ) -> GatewayResult<(Vec<ActSummary>, i64)> {
        let data = self
            .client
            .get_json(
                &format!("acts/{publisher}/{year}"),
                &[],
                Some(self.browse_ttl),
            )
            .await?;

        let items: Vec<ActSummaryWire> = serde_json::from_value(
            data.get("items").cloned().unwrap_or(serde_json::Value::Array(Vec::new())),
        )
        .map_err(|e| crate::errors::GatewayError::Internal(anyhow::anyhow!(e)))?;
        let total_count = data
            .get("totalCount")
            .and_then(|v| v.as_i64())
            .unwrap_or(items.len() as i64);

        let results = items
            .into_iter()
            .map(|item| format_act(item, detail_level))
            .collect();

        Ok((results, total_count))
    }
}

/// `minimal` keeps only the core identity fields; `standard`/`full` both add
/// the extended field set (the upstream field selection does not distinguish
/// further between the two at this layer).
fn format_act(item: ActSummaryWire, detail_level: DetailLevel) -> ActSummary {
    let mut summary = ActSummary {
        eli: item.eli,
        publisher: item.publisher,
        year: item.year,
        pos: item.pos,
        title: item.title,
        status: item.status.unwrap_or_default(),
        act_type: None,
        promulgation_date: None,
        effective_date: None,
        in_force: None,
    };

    if matches!(detail_level, DetailLevel::Standard | DetailLevel::Full) {
        summary.act_type = item.act_type;
        summary.promulgation_date = item.promulgation;
        summary.effective_date = item.date_effect;
        summary.in_force = item.in_force.map(|s| s.eq_ignore_ascii_case("true"));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::CircuitBreaker;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SejmClient {
        SejmClient::with_base_url(
            format!("{}/eli", server.uri()),
            Duration::from_secs(5),
            4,
            1,
            10,
            CircuitBreaker::with_defaults(),
        )
    }

    #[tokio::test]
    async fn search_maps_keywords_and_dates_to_upstream_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/search"))
            .and(query_param("keyword", "podatki,vat"))
            .and(query_param("dateEffectFrom", "2024-01-01"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 0, "items": []})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let service = SearchService::new(&client, Duration::from_secs(60), Duration::from_secs(60));
        let req = SearchRequest {
            keywords: vec!["podatki".to_string(), "vat".to_string()],
            date_from: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let (results, total, _summary) = service.search(&req, DetailLevel::Standard).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn minimal_detail_level_omits_extended_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "items": [{"ELI": "DU/2024/1", "publisher": "DU", "year": 2024, "pos": 1,
                           "title": "Ustawa", "status": "obowiązujący", "type": "ustawa"}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let service = SearchService::new(&client, Duration::from_secs(60), Duration::from_secs(60));
        let (results, _, _) = service
            .search(&SearchRequest::default(), DetailLevel::Minimal)
            .await
            .unwrap();
        assert_eq!(results[0].act_type, None);
    }

    #[tokio::test]
    async fn browse_reads_items_and_total_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalCount": 42,
                "items": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let service = SearchService::new(&client, Duration::from_secs(60), Duration::from_secs(60));
        let (results, total) = service.browse("DU", 2024, DetailLevel::Standard).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(total, 42);
    }
}
