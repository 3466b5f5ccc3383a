//! HTML/PDF to markdown conversion plus section indexing (§4.4).

use crate::models::domain::Section;
use regex::Regex;
use std::sync::LazyLock;

/// ATX headings first, then the three Polish legal-structure markers, each
/// followed by a trailing capture so the rest of the heading line joins the
/// marker into the full section title.
static SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(#{1,6})\s+(.+)$|^(Art\.\s*\d+[a-z]?\.?)(.*)$|^(Rozdział\s+\S+)(.*)$|^(DZIAŁ\s+\S+)(.*)$",
    )
    .expect("section pattern is a fixed, valid regex")
});

pub struct ContentProcessor;

impl ContentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Converts HTML act text to Markdown using an ATX-heading converter.
    pub fn html_to_markdown(&self, html: &str) -> anyhow::Result<String> {
        htmd::convert(html).map_err(|e| anyhow::anyhow!("html conversion failed: {e}"))
    }

    /// Extracts plain text per page from a PDF act document.
    pub fn pdf_to_text(&self, pdf_bytes: &[u8]) -> anyhow::Result<String> {
        pdf_extract::extract_text_from_mem(pdf_bytes)
            .map_err(|e| anyhow::anyhow!("pdf extraction failed: {e}"))
    }

    /// Builds the ordered, disjoint section index for a converted document.
    ///
    /// Each match starts a new section running to the next match (or EOF).
    /// Heading level is the ATX hash count for markdown headings, 2 for
    /// `Art.` markers, and 1 for `Rozdział`/`DZIAŁ`. Titles join the marker
    /// with the remainder of its line. IDs are url-safe slugs of the title,
    /// truncated to 50 bytes and disambiguated with a numeric suffix on
    /// collision.
    pub fn index_sections(&self, markdown: &str) -> Vec<Section> {
        let mut starts: Vec<(usize, u8, String)> = Vec::new();
        for caps in SECTION_PATTERN.captures_iter(markdown) {
            let whole = caps.get(0).unwrap();
            let (level, title) = if let Some(hashes) = caps.get(1) {
                (hashes.as_str().len() as u8, caps.get(2).unwrap().as_str().to_string())
            } else if let Some(art) = caps.get(3) {
                let rest = caps.get(4).map(|m| m.as_str()).unwrap_or("");
                (2, format!("{art}{rest}"))
            } else if let Some(rozdzial) = caps.get(5) {
                let rest = caps.get(6).map(|m| m.as_str()).unwrap_or("");
                (1, format!("{rozdzial}{rest}"))
            } else {
                let dzial = caps.get(7).unwrap().as_str();
                let rest = caps.get(8).map(|m| m.as_str()).unwrap_or("");
                (1, format!("{dzial}{rest}"))
            };
            starts.push((whole.start(), level, title.trim().to_string()));
        }

        if starts.is_empty() {
            return Vec::new();
        }

        let mut used_ids: std::collections::HashSet<String> = std::collections::HashSet::new();
        let mut sections = Vec::with_capacity(starts.len());
        for (i, (start, level, title)) in starts.iter().enumerate() {
            let end = starts.get(i + 1).map(|(s, _, _)| *s).unwrap_or(markdown.len());
            let id = unique_slug(title, &mut used_ids);
            sections.push(Section {
                id,
                title: title.clone(),
                level: *level,
                start_pos: *start,
                end_pos: end,
            });
        }
        sections
    }
}

impl Default for ContentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn slugify(title: &str) -> String {
    let mut slug: String = title
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                '_'
            } else if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect();
    slug.truncate(50);
    if slug.is_empty() {
        slug = "section".to_string();
    }
    slug
}

fn unique_slug(title: &str, used: &mut std::collections::HashSet<String>) -> String {
    let base = slugify(title);
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_atx_headings_in_order() {
        let md = "# Tytuł\ntext\n## Rozdział 1\nmore text\n";
        let sections = ContentProcessor::new().index_sections(md);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Tytuł");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[1].level, 2);
        assert_eq!(sections[1].end_pos, md.len());
    }

    #[test]
    fn indexes_art_markers_as_level_two_with_full_title() {
        let md = "Art. 1. Przepis ogólny.\ntreść\nArt. 2a. Kolejny przepis.\n";
        let sections = ContentProcessor::new().index_sections(md);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].level, 2);
        assert_eq!(sections[0].title, "Art. 1. Przepis ogólny.");
        assert_eq!(sections[1].title, "Art. 2a. Kolejny przepis.");
    }

    #[test]
    fn document_with_no_headings_has_no_sections() {
        let sections = ContentProcessor::new().index_sections("plain text with no structure");
        assert!(sections.is_empty());
    }

    #[test]
    fn colliding_titles_get_disambiguated_ids() {
        let md = "# Wstęp\na\n# Wstęp\nb\n";
        let sections = ContentProcessor::new().index_sections(md);
        assert_ne!(sections[0].id, sections[1].id);
    }

    #[test]
    fn long_titles_are_truncated_to_fifty_bytes() {
        let long_title = "a".repeat(200);
        let md = format!("# {long_title}\nbody\n");
        let sections = ContentProcessor::new().index_sections(&md);
        assert!(sections[0].id.len() <= 50);
    }
}
