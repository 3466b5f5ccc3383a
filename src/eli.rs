//! ELI identifier parsing (§6: "Accept bare `{pub}/{year}/{pos}`...").

use crate::errors::GatewayError;

pub struct Eli {
    pub publisher: String,
    pub year: i64,
    pub pos: i64,
}

impl Eli {
    pub fn to_id(&self) -> String {
        format!("{}/{}/{}", self.publisher, self.year, self.pos)
    }
}

const URL_MARKER: &str = "api.sejm.gov.pl/eli/";

/// Parses a bare or fully-qualified ELI into its three components.
pub fn parse_eli(raw: &str) -> Result<Eli, GatewayError> {
    let stripped = if let Some(idx) = raw.find(URL_MARKER) {
        &raw[idx + URL_MARKER.len()..]
    } else if raw.starts_with("http") {
        return Err(GatewayError::InvalidEli {
            eli: raw.to_string(),
        });
    } else {
        raw
    };

    let trimmed = stripped.trim_end_matches('/');
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() != 3 {
        return Err(GatewayError::InvalidEli {
            eli: raw.to_string(),
        });
    }

    let (publisher, year_str, pos_str) = (parts[0], parts[1], parts[2]);
    let year = year_str
        .parse::<i64>()
        .map_err(|_| GatewayError::InvalidEli {
            eli: raw.to_string(),
        })?;
    let pos = pos_str.parse::<i64>().map_err(|_| GatewayError::InvalidEli {
        eli: raw.to_string(),
    })?;

    Ok(Eli {
        publisher: publisher.to_string(),
        year,
        pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_eli() {
        let eli = parse_eli("DU/2024/1716").unwrap();
        assert_eq!(eli.publisher, "DU");
        assert_eq!(eli.year, 2024);
        assert_eq!(eli.pos, 1716);
    }

    #[test]
    fn strips_trailing_slash() {
        let eli = parse_eli("DU/2024/1716/").unwrap();
        assert_eq!(eli.to_id(), "DU/2024/1716");
    }

    #[test]
    fn strips_known_url_prefix() {
        let eli = parse_eli("https://api.sejm.gov.pl/eli/DU/2024/1716").unwrap();
        assert_eq!(eli.to_id(), "DU/2024/1716");
    }

    #[test]
    fn rejects_other_absolute_urls() {
        let err = parse_eli("https://example.com/DU/2024/1716").unwrap_err();
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(parse_eli("DU/2024").is_err());
        assert!(parse_eli("DU/2024/1716/extra").is_err());
    }

    #[test]
    fn rejects_non_integer_year_or_pos() {
        assert!(parse_eli("DU/abcd/1716").is_err());
        assert!(parse_eli("DU/2024/xyz").is_err());
    }
}
