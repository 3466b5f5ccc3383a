//! Loads [`Settings`] from the process environment, `SEJM_MCP_`-prefixed.

use super::schema::{LogFormat, Settings, Transport};

const PREFIX: &str = "SEJM_MCP_";

fn env_var(key: &str) -> Option<String> {
    std::env::var(format!("{PREFIX}{key}")).ok()
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_var(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads settings from the environment, falling back to defaults for any
/// key that is absent or fails to parse.
pub fn load_settings() -> Settings {
    let defaults = Settings::default();

    let transport = match env_var("TRANSPORT").as_deref() {
        Some("http") => Transport::Http,
        _ => defaults.transport,
    };
    let log_format = match env_var("LOG_FORMAT").as_deref() {
        Some("json") => LogFormat::Json,
        _ => defaults.log_format,
    };

    Settings {
        transport,
        host: env_var("HOST").unwrap_or(defaults.host),
        port: env_parse("PORT", defaults.port),

        api_timeout_secs: env_parse("API_TIMEOUT", defaults.api_timeout_secs),
        api_max_concurrent: env_parse("API_MAX_CONCURRENT", defaults.api_max_concurrent),
        api_max_retries: env_parse("API_MAX_RETRIES", defaults.api_max_retries),

        cache_metadata_ttl_secs: env_parse("CACHE_METADATA_TTL", defaults.cache_metadata_ttl_secs),
        cache_search_ttl_secs: env_parse("CACHE_SEARCH_TTL", defaults.cache_search_ttl_secs),
        cache_browse_ttl_secs: env_parse("CACHE_BROWSE_TTL", defaults.cache_browse_ttl_secs),
        cache_details_ttl_secs: env_parse("CACHE_DETAILS_TTL", defaults.cache_details_ttl_secs),
        cache_changes_ttl_secs: env_parse("CACHE_CHANGES_TTL", defaults.cache_changes_ttl_secs),
        cache_max_entries: env_parse("CACHE_MAX_ENTRIES", defaults.cache_max_entries),

        doc_store_max_documents: env_parse(
            "DOC_STORE_MAX_DOCUMENTS",
            defaults.doc_store_max_documents,
        ),
        doc_store_max_size_bytes: env_parse(
            "DOC_STORE_MAX_SIZE_BYTES",
            defaults.doc_store_max_size_bytes,
        ),
        doc_store_ttl_secs: env_parse("DOC_STORE_TTL", defaults.doc_store_ttl_secs),

        result_store_max_sets: env_parse(
            "RESULT_STORE_MAX_SETS",
            defaults.result_store_max_sets,
        ),
        result_store_ttl_secs: env_parse("RESULT_STORE_TTL", defaults.result_store_ttl_secs),

        circuit_breaker_threshold: env_parse(
            "CIRCUIT_BREAKER_THRESHOLD",
            defaults.circuit_breaker_threshold,
        ),
        circuit_breaker_recovery_timeout_secs: env_parse(
            "CIRCUIT_BREAKER_RECOVERY_TIMEOUT",
            defaults.circuit_breaker_recovery_timeout_secs,
        ),
        circuit_breaker_half_open_max_calls: env_parse(
            "CIRCUIT_BREAKER_HALF_OPEN_MAX_CALLS",
            defaults.circuit_breaker_half_open_max_calls,
        ),

        log_level: env_var("LOG_LEVEL").unwrap_or(defaults.log_level),
        log_format,

        server_name: env_var("SERVER_NAME").unwrap_or(defaults.server_name),
        server_version: env_var("SERVER_VERSION").unwrap_or(defaults.server_version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unset_environment() {
        // SAFETY: single-threaded test, no concurrent env mutation.
        unsafe {
            std::env::remove_var("SEJM_MCP_PORT");
        }
        let settings = load_settings();
        assert_eq!(settings.port, 7683);
        assert_eq!(settings.server_name, "sejm-gateway");
    }

    #[test]
    fn env_override_is_honored() {
        // SAFETY: single-threaded test, no concurrent env mutation.
        unsafe {
            std::env::set_var("SEJM_MCP_API_MAX_RETRIES", "7");
        }
        let settings = load_settings();
        assert_eq!(settings.api_max_retries, 7);
        unsafe {
            std::env::remove_var("SEJM_MCP_API_MAX_RETRIES");
        }
    }
}
