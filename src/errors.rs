use thiserror::Error;

/// Typed error hierarchy for the gateway.
///
/// Mirrors the upstream exception hierarchy one-to-one so that tool-layer
/// error classification (§7) is a pure match on the variant, not a string
/// sniff. Leaf/internal code can keep using `anyhow::Result` and convert at
/// a service boundary via `?` thanks to the `Internal` variant.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Nieprawidłowy format ELI: {eli}. Oczekiwany: wydawca/rok/pozycja (np. DU/2024/1716)")]
    InvalidEli { eli: String },

    #[error("Nie znaleziono aktu: {eli}")]
    ActNotFound { eli: String },

    #[error("Treść niedostępna dla {eli} w formacie {format}")]
    ContentNotAvailable { eli: String, format: String },

    #[error(
        "Dokument {eli} nie jest załadowany. Użyj get_act_details(eli='{eli}', load_content=true)"
    )]
    DocumentNotLoaded { eli: String },

    #[error(
        "Zestaw wyników '{result_set_id}' nie istnieje lub wygasł. \
         Wykonaj wyszukiwanie, a następnie użyj zwróconego result_set_id."
    )]
    ResultSetNotFound { result_set_id: String },

    #[error("Usługa Sejm API jest tymczasowo niedostępna")]
    ApiUnavailable,

    #[error("Błąd Sejm API: {message}")]
    SejmApi {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Nieprawidłowe dane wejściowe: {0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Classify into one of the five error categories from §7. Used by the
    /// tool layer to populate `metadata.error_category`; never surfaced to
    /// the caller as a Rust type.
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::InvalidEli { .. } | GatewayError::Validation(_) => "validation",
            GatewayError::ActNotFound { .. } | GatewayError::ContentNotAvailable { .. } => {
                "not_found"
            }
            GatewayError::DocumentNotLoaded { .. } | GatewayError::ResultSetNotFound { .. } => {
                "precondition"
            }
            GatewayError::ApiUnavailable | GatewayError::SejmApi { .. } => "unavailable",
            GatewayError::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_match_spec_table() {
        assert_eq!(
            GatewayError::InvalidEli { eli: "x".into() }.category(),
            "validation"
        );
        assert_eq!(
            GatewayError::ActNotFound { eli: "x".into() }.category(),
            "not_found"
        );
        assert_eq!(
            GatewayError::DocumentNotLoaded { eli: "x".into() }.category(),
            "precondition"
        );
        assert_eq!(GatewayError::ApiUnavailable.category(), "unavailable");
        assert_eq!(
            GatewayError::Internal(anyhow::anyhow!("bug")).category(),
            "internal"
        );
    }

    #[test]
    fn invalid_eli_message_matches_upstream_wording() {
        let err = GatewayError::InvalidEli {
            eli: "bad".to_string(),
        };
        assert!(err.to_string().contains("wydawca/rok/pozycja"));
    }
}
