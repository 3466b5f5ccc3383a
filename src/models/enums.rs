//! Closed enum sets referenced by §6 and §9. Values are the literal strings
//! compared against the upstream API (especially `RelationshipType`, whose
//! variants are Polish category names used verbatim as keys in the
//! `references` map).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Publisher {
    #[serde(rename = "DU")]
    Du,
    #[serde(rename = "MP")]
    Mp,
}

impl Publisher {
    pub fn as_str(self) -> &'static str {
        match self {
            Publisher::Du => "DU",
            Publisher::Mp => "MP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Publisher::Du => "Dziennik Ustaw",
            Publisher::Mp => "Monitor Polski",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DU" => Some(Publisher::Du),
            "MP" => Some(Publisher::Mp),
            _ => None,
        }
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Publisher::Du
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Minimal,
    Standard,
    Full,
}

impl Default for DetailLevel {
    fn default() -> Self {
        DetailLevel::Standard
    }
}

impl DetailLevel {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "minimal" => DetailLevel::Minimal,
            "full" => DetailLevel::Full,
            _ => DetailLevel::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataCategory {
    Keywords,
    Publishers,
    Statuses,
    Types,
    Institutions,
    All,
}

impl MetadataCategory {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "keywords" => MetadataCategory::Keywords,
            "publishers" => MetadataCategory::Publishers,
            "statuses" => MetadataCategory::Statuses,
            "types" => MetadataCategory::Types,
            "institutions" => MetadataCategory::Institutions,
            _ => MetadataCategory::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataCategory::Keywords => "keywords",
            MetadataCategory::Publishers => "publishers",
            MetadataCategory::Statuses => "statuses",
            MetadataCategory::Types => "types",
            MetadataCategory::Institutions => "institutions",
            MetadataCategory::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Html,
    Pdf,
}

/// Relationship category names, matched verbatim against the upstream
/// `references` map's keys. Not exhaustive of everything upstream may
/// return, but exhaustive of the categories the gateway knows to hint on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipType {
    ChangedActs,
    RepealedActs,
    DeemedRepealedActs,
    LegalBasis,
    AmendingActs,
    RepealingActs,
    ConsolidatedTexts,
}

impl RelationshipType {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipType::ChangedActs => "Akty zmienione",
            RelationshipType::RepealedActs => "Akty uchylone",
            RelationshipType::DeemedRepealedActs => "Akty uznane za uchylone",
            RelationshipType::LegalBasis => "Podstawa prawna",
            RelationshipType::AmendingActs => "Akty zmieniające",
            RelationshipType::RepealingActs => "Akty uchylające",
            RelationshipType::ConsolidatedTexts => "Teksty jednolite",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_roundtrips() {
        assert_eq!(Publisher::parse("du").unwrap().as_str(), "DU");
        assert_eq!(Publisher::parse("MP").unwrap().as_str(), "MP");
        assert!(Publisher::parse("XX").is_none());
    }

    #[test]
    fn detail_level_falls_back_to_standard() {
        assert_eq!(DetailLevel::parse("bogus"), DetailLevel::Standard);
        assert_eq!(DetailLevel::parse("FULL"), DetailLevel::Full);
    }

    #[test]
    fn relationship_type_values_are_polish_literals() {
        assert_eq!(RelationshipType::ChangedActs.as_str(), "Akty zmienione");
        assert_eq!(RelationshipType::LegalBasis.as_str(), "Podstawa prawna");
    }
}
