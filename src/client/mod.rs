//! HTTP client wrapping the cache, circuit breaker, and concurrency gate
//! around the upstream Sejm ELI registry (§4.3).

use crate::cache::Cache;
use crate::circuit_breaker::CircuitBreaker;
use crate::errors::{GatewayError, GatewayResult};
use crate::utils::http::default_http_client;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const BASE_URL: &str = "https://api.sejm.gov.pl/eli";
const USER_AGENT: &str = concat!("sejm-gateway/", env!("CARGO_PKG_VERSION"));

pub struct SejmClient {
    http: Client,
    base_url: String,
    cache: Cache<Value>,
    breaker: CircuitBreaker,
    semaphore: Arc<Semaphore>,
    max_retries: u32,
}

impl SejmClient {
    pub fn new(
        timeout: Duration,
        max_concurrent: usize,
        max_retries: u32,
        cache_max_entries: usize,
        breaker: CircuitBreaker,
    ) -> Self {
        Self::with_base_url(
            BASE_URL.to_string(),
            timeout,
            max_concurrent,
            max_retries,
            cache_max_entries,
            breaker,
        )
    }

    pub fn with_base_url(
        base_url: String,
        timeout: Duration,
        max_concurrent: usize,
        max_retries: u32,
        cache_max_entries: usize,
        breaker: CircuitBreaker,
    ) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| default_http_client());

        Self {
            http,
            base_url,
            cache: Cache::new(cache_max_entries),
            breaker,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            max_retries,
        }
    }

    pub async fn breaker_state(&self) -> crate::circuit_breaker::BreakerState {
        self.breaker.state().await
    }

    async fn request(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<reqwest::Response> {
        if !self.breaker.can_execute().await {
            return Err(GatewayError::ApiUnavailable);
        }

        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| GatewayError::Internal(anyhow::anyhow!(e)))?;

        let mut attempt = 0;
        loop {
            let response = self
                .http
                .get(&url)
                .query(query)
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        self.breaker.record_success().await;
                        return Ok(resp);
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(GatewayError::ActNotFound { eli: path.to_string() });
                    }
                    if status == StatusCode::BAD_GATEWAY || status == StatusCode::SERVICE_UNAVAILABLE {
                        self.breaker.record_failure().await;
                        if attempt + 1 < self.max_retries {
                            attempt += 1;
                            tokio::time::sleep(backoff(attempt)).await;
                            continue;
                        }
                        return Err(GatewayError::SejmApi {
                            message: format!("API temporarily unavailable: {status}"),
                            status_code: Some(status.as_u16()),
                        });
                    }
                    let body = resp.text().await.unwrap_or_default();
                    return Err(GatewayError::SejmApi {
                        message: format!("HTTP {status}: {body}"),
                        status_code: Some(status.as_u16()),
                    });
                }
                Err(e) if e.is_timeout() => {
                    self.breaker.record_failure().await;
                    if attempt + 1 < self.max_retries {
                        attempt += 1;
                        tokio::time::sleep(backoff(attempt)).await;
                        continue;
                    }
                    return Err(GatewayError::ApiUnavailable);
                }
                Err(e) => return Err(GatewayError::Internal(anyhow::anyhow!(e))),
            }
        }
    }

    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        cache_ttl: Option<Duration>,
    ) -> GatewayResult<Value> {
        let cache_key = cache_ttl.map(|_| cache_key(path, query));
        if let Some(key) = &cache_key {
            if let Some(cached) = self.cache.get(key).await {
                return Ok(cached);
            }
        }

        let resp = self.request(path, query).await?;
        let data: Value = resp
            .json()
            .await
            .map_err(|e| GatewayError::Internal(anyhow::anyhow!(e)))?;

        if let (Some(key), Some(ttl)) = (cache_key, cache_ttl) {
            self.cache.set(key, data.clone(), ttl).await;
        }
        Ok(data)
    }

    pub async fn get_json_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        cache_ttl: Option<Duration>,
    ) -> GatewayResult<T> {
        let value = self.get_json(path, query, cache_ttl).await?;
        serde_json::from_value(value).map_err(|e| GatewayError::Internal(anyhow::anyhow!(e)))
    }

    pub async fn get_text(&self, path: &str) -> GatewayResult<String> {
        let resp = self.request(path, &[]).await?;
        resp.text()
            .await
            .map_err(|e| GatewayError::Internal(anyhow::anyhow!(e)))
    }

    pub async fn get_bytes(&self, path: &str) -> GatewayResult<Vec<u8>> {
        let resp = self.request(path, &[]).await?;
        Ok(resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Internal(anyhow::anyhow!(e)))?
            .to_vec())
    }

    pub async fn get_act(&self, publisher: &str, year: i64, pos: i64, ttl: Duration) -> GatewayResult<Value> {
        self.get_json(&format!("acts/{publisher}/{year}/{pos}"), &[], Some(ttl))
            .await
    }

    pub async fn search_acts(&self, params: &BTreeMap<&str, String>, ttl: Duration) -> GatewayResult<Value> {
        let query: Vec<(&str, String)> = params.iter().map(|(k, v)| (*k, v.clone())).collect();
        self.get_json("acts/search", &query, Some(ttl)).await
    }

    pub async fn get_act_structure(&self, publisher: &str, year: i64, pos: i64, ttl: Duration) -> Value {
        self.get_json(
            &format!("acts/{publisher}/{year}/{pos}/struct"),
            &[],
            Some(ttl),
        )
        .await
        .unwrap_or(Value::Array(Vec::new()))
    }

    pub async fn get_act_references(&self, publisher: &str, year: i64, pos: i64, ttl: Duration) -> GatewayResult<Value> {
        self.get_json(
            &format!("acts/{publisher}/{year}/{pos}/references"),
            &[],
            Some(ttl),
        )
        .await
    }

    pub async fn get_act_html(&self, publisher: &str, year: i64, pos: i64) -> GatewayResult<String> {
        self.get_text(&format!("acts/{publisher}/{year}/{pos}/text.html"))
            .await
    }

    pub async fn get_act_pdf_bytes(&self, publisher: &str, year: i64, pos: i64) -> GatewayResult<Vec<u8>> {
        self.get_bytes(&format!("acts/{publisher}/{year}/{pos}/text.pdf"))
            .await
    }

    pub fn get_act_pdf_url(&self, publisher: &str, year: i64, pos: i64) -> String {
        format!("{BASE_URL}/acts/{publisher}/{year}/{pos}/text.pdf")
    }

    pub async fn get_metadata(&self, endpoint: &str, ttl: Duration) -> GatewayResult<Value> {
        self.get_json(endpoint, &[], Some(ttl)).await
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1u64.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))).min(Duration::from_secs(10))
}

fn cache_key(path: &str, query: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = query.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    let qs: Vec<String> = sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("json:{path}:{}", qs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> SejmClient {
        SejmClient::new(
            Duration::from_secs(5),
            4,
            1,
            100,
            CircuitBreaker::with_defaults(),
        )
    }

    fn test_client_for(server: &MockServer) -> SejmClient {
        SejmClient::with_base_url(
            format!("{}/eli", server.uri()),
            Duration::from_secs(5),
            4,
            1,
            100,
            CircuitBreaker::with_defaults(),
        )
    }

    #[test]
    fn cache_key_is_order_independent() {
        let a = cache_key("acts/search", &[("year", "2024".into()), ("publisher", "DU".into())]);
        let b = cache_key("acts/search", &[("publisher", "DU".into()), ("year", "2024".into())]);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn breaker_starts_closed() {
        let client = test_client();
        assert_eq!(
            client.breaker_state().await,
            crate::circuit_breaker::BreakerState::Closed
        );
    }

    #[tokio::test]
    async fn not_found_status_maps_to_act_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client_for(&server);
        let err = client.get_act("DU", 2024, 1, Duration::from_secs(60)).await.unwrap_err();
        assert_eq!(err.category(), "not_found");
    }

    #[tokio::test]
    async fn successful_json_response_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ELI": "DU/2024/1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client_for(&server);
        let first = client.get_act("DU", 2024, 1, Duration::from_secs(60)).await.unwrap();
        let second = client.get_act("DU", 2024, 1, Duration::from_secs(60)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn service_unavailable_retries_then_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eli/acts/DU/2024/2"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = test_client_for(&server);
        let err = client.get_act("DU", 2024, 2, Duration::from_secs(60)).await.unwrap_err();
        assert_eq!(err.category(), "unavailable");
    }
}
