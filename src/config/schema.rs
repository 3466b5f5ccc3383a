//! Environment-driven settings, prefixed `SEJM_MCP_`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Transport {
    Stdio,
    Http,
}

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub transport: Transport,
    pub host: String,
    pub port: u16,

    pub api_timeout_secs: f64,
    pub api_max_concurrent: usize,
    pub api_max_retries: u32,

    pub cache_metadata_ttl_secs: u64,
    pub cache_search_ttl_secs: u64,
    pub cache_browse_ttl_secs: u64,
    pub cache_details_ttl_secs: u64,
    pub cache_changes_ttl_secs: u64,
    pub cache_max_entries: usize,

    pub doc_store_max_documents: usize,
    pub doc_store_max_size_bytes: usize,
    pub doc_store_ttl_secs: u64,

    pub result_store_max_sets: usize,
    pub result_store_ttl_secs: u64,

    pub circuit_breaker_threshold: u32,
    pub circuit_breaker_recovery_timeout_secs: f64,
    pub circuit_breaker_half_open_max_calls: u32,

    pub log_level: String,
    pub log_format: LogFormat,

    pub server_name: String,
    pub server_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: "0.0.0.0".to_string(),
            port: 7683,

            api_timeout_secs: 30.0,
            api_max_concurrent: 10,
            api_max_retries: 3,

            cache_metadata_ttl_secs: 86_400,
            cache_search_ttl_secs: 600,
            cache_browse_ttl_secs: 3600,
            cache_details_ttl_secs: 3600,
            cache_changes_ttl_secs: 300,
            cache_max_entries: 1000,

            doc_store_max_documents: 10,
            doc_store_max_size_bytes: 5 * 1024 * 1024,
            doc_store_ttl_secs: 7200,

            result_store_max_sets: 20,
            result_store_ttl_secs: 3600,

            circuit_breaker_threshold: 5,
            circuit_breaker_recovery_timeout_secs: 60.0,
            circuit_breaker_half_open_max_calls: 3,

            log_level: "INFO".to_string(),
            log_format: LogFormat::Text,

            server_name: "sejm-gateway".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
