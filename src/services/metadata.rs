//! Retrieves system metadata: keywords, publishers, statuses, types,
//! institutions (§4.7, per-category endpoint map).

use crate::client::SejmClient;
use crate::models::enums::MetadataCategory;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

fn endpoint_for(category: MetadataCategory) -> &'static str {
    match category {
        MetadataCategory::Keywords => "keywords",
        MetadataCategory::Publishers => "acts",
        MetadataCategory::Statuses => "statuses",
        MetadataCategory::Types => "types",
        MetadataCategory::Institutions => "institutions",
        MetadataCategory::All => unreachable!("All is expanded before dispatch"),
    }
}

pub struct MetadataService<'a> {
    client: &'a SejmClient,
    ttl: Duration,
}

impl<'a> MetadataService<'a> {
    pub fn new(client: &'a SejmClient, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    /// `all` fans out to every category concurrently, substituting an empty
    /// list for any category whose request fails.
    pub async fn get_metadata(&self, category: MetadataCategory) -> serde_json::Map<String, Value> {
        let mut out = serde_json::Map::new();

        if category != MetadataCategory::All {
            let value = self.fetch_category(category).await;
            out.insert(category.as_str().to_string(), value);
            return out;
        }

        let (keywords, publishers, statuses, types, institutions) = tokio::join!(
            self.fetch_category(MetadataCategory::Keywords),
            self.fetch_category(MetadataCategory::Publishers),
            self.fetch_category(MetadataCategory::Statuses),
            self.fetch_category(MetadataCategory::Types),
            self.fetch_category(MetadataCategory::Institutions),
        );
        for (cat, value) in [
            (MetadataCategory::Keywords, keywords),
            (MetadataCategory::Publishers, publishers),
            (MetadataCategory::Statuses, statuses),
            (MetadataCategory::Types, types),
            (MetadataCategory::Institutions, institutions),
        ] {
            out.insert(cat.as_str().to_string(), value);
        }
        out
    }

    async fn fetch_category(&self, category: MetadataCategory) -> Value {
        let endpoint = endpoint_for(category);
        match self.client.get_metadata(endpoint, self.ttl).await {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to fetch metadata for {endpoint}: {e}");
                Value::Array(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::CircuitBreaker;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn single_category_fetches_its_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/keywords"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["podatki"])))
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
        let service = MetadataService::new(&client, Duration::from_secs(60));
        let result = service.get_metadata(MetadataCategory::Keywords).await;
        assert_eq!(result["keywords"], serde_json::json!(["podatki"]));
    }

    #[tokio::test]
    async fn failing_subcategory_degrades_to_empty_list_under_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/keywords"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/eli/acts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/eli/statuses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/eli/types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/eli/institutions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
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
        let service = MetadataService::new(&client, Duration::from_secs(60));
        let result = service.get_metadata(MetadataCategory::All).await;
        assert_eq!(result["keywords"], serde_json::json!([]));
        assert_eq!(result.len(), 5);
    }
}
