//! Dispatcher context: owns the client, stores, content processor and
//! services for the lifetime of the process (§4, modeled on the upstream
//! lifespan-scoped context object).

use crate::circuit_breaker::CircuitBreaker;
use crate::client::SejmClient;
use crate::config::Settings;
use crate::content::ContentProcessor;
use crate::document_store::DocumentStore;
use crate::result_store::ResultStore;
use crate::services::{ActService, ChangesService, MetadataService, SearchService};
use std::time::Duration;

/// Everything a tool handler needs to do its work. Built once at startup
/// and shared (immutably, behind an `Arc`) across every request.
pub struct GatewayContext {
    pub client: SejmClient,
    pub doc_store: DocumentStore,
    pub result_store: ResultStore,
    pub content: ContentProcessor,
    pub settings: Settings,
}

impl GatewayContext {
    pub fn new(settings: Settings) -> Self {
        let breaker = CircuitBreaker::new(
            settings.circuit_breaker_threshold,
            Duration::from_secs_f64(settings.circuit_breaker_recovery_timeout_secs),
            settings.circuit_breaker_half_open_max_calls,
        );
        let client = SejmClient::new(
            Duration::from_secs_f64(settings.api_timeout_secs),
            settings.api_max_concurrent,
            settings.api_max_retries,
            settings.cache_max_entries,
            breaker,
        );
        let doc_store = DocumentStore::new(
            settings.doc_store_max_documents,
            settings.doc_store_max_size_bytes,
            Duration::from_secs(settings.doc_store_ttl_secs),
        );
        let result_store = ResultStore::new(
            settings.result_store_max_sets,
            Duration::from_secs(settings.result_store_ttl_secs),
        );
        Self {
            client,
            doc_store,
            result_store,
            content: ContentProcessor::new(),
            settings,
        }
    }

    pub fn metadata_service(&self) -> MetadataService<'_> {
        MetadataService::new(
            &self.client,
            Duration::from_secs(self.settings.cache_metadata_ttl_secs),
        )
    }

    pub fn search_service(&self) -> SearchService<'_> {
        SearchService::new(
            &self.client,
            Duration::from_secs(self.settings.cache_search_ttl_secs),
            Duration::from_secs(self.settings.cache_browse_ttl_secs),
        )
    }

    pub fn changes_service(&self) -> ChangesService<'_> {
        ChangesService::new(
            &self.client,
            Duration::from_secs(self.settings.cache_changes_ttl_secs),
        )
    }

    pub fn act_service(&self) -> ActService<'_> {
        ActService::new(
            &self.client,
            &self.doc_store,
            &self.content,
            Duration::from_secs(self.settings.cache_details_ttl_secs),
        )
    }

    /// Today's date, `YYYY-MM-DD`, computed once per call site that needs
    /// "now" (keeps services pure and testable).
    pub fn today() -> String {
        chrono::Utc::now().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builds_from_default_settings() {
        let ctx = GatewayContext::new(Settings::default());
        assert_eq!(ctx.settings.server_name, "sejm-gateway");
    }
}
