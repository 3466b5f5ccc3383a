//! Tracks legal changes via the search endpoint with a publication-date
//! window — a workaround for the WAF-blocked `/changes/acts` endpoint
//! (§4.7, §9).

use crate::client::SejmClient;
use crate::errors::GatewayResult;
use crate::models::api::SearchApiResponse;
use crate::models::domain::ActSummary;
use std::collections::BTreeMap;
use std::time::Duration;

pub struct ChangesService<'a> {
    client: &'a SejmClient,
    ttl: Duration,
}

impl<'a> ChangesService<'a> {
    pub fn new(client: &'a SejmClient, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    /// `today` is passed in rather than computed here (the time source is
    /// the caller's concern; `Settings`/tool layer supplies it once per call).
    pub async fn track_changes(
        &self,
        publisher: &str,
        date_from: &str,
        date_to: Option<&str>,
        keywords: &[String],
        today: &str,
    ) -> GatewayResult<(Vec<ActSummary>, String, String)> {
        let date_to = date_to.unwrap_or(today).to_string();

        let mut params: BTreeMap<&str, String> = BTreeMap::new();
        params.insert("publisher", publisher.to_string());
        params.insert("dateFrom", date_from.to_string());
        params.insert("dateTo", date_to.clone());
        if !keywords.is_empty() {
            params.insert("keyword", keywords.join(","));
        }

        let data = self.client.search_acts(&params, self.ttl).await?;
        let parsed: SearchApiResponse = serde_json::from_value(data)
            .map_err(|e| crate::errors::GatewayError::Internal(anyhow::anyhow!(e)))?;

        let results: Vec<ActSummary> = parsed.items.into_iter().map(Into::into).collect();
        Ok((results, date_from.to_string(), date_to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::CircuitBreaker;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn defaults_date_to_today_when_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/search"))
            .and(query_param("dateTo", "2026-07-27"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 0, "items": []})),
            )
            .mount(&server)
            .await;

        let client = SejmClient::with_base_url(
            format!("{}/eli", server.uri()),
            Duration::from_secs(5),
            4,
            1,
            10,
            CircuitBreaker::with_defaults(),
        );
        let service = ChangesService::new(&client, Duration::from_secs(60));
        let (_results, date_from, date_to) = service
            .track_changes("DU", "2024-01-01", None, &[], "2026-07-27")
            .await
            .unwrap();
        assert_eq!(date_from, "2024-01-01");
        assert_eq!(date_to, "2026-07-27");
    }
}
