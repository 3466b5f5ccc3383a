//! Bounded in-memory store of loaded act documents with section access (§4.5).

use crate::errors::{GatewayError, GatewayResult};
use crate::models::domain::{LoadedDocument, Section, SearchHit};
use lru::LruCache;
use regex::escape;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub struct DocumentStore {
    inner: Mutex<LruCache<String, LoadedDocument>>,
    max_size_bytes: usize,
    ttl: Duration,
}

impl DocumentStore {
    pub fn new(max_documents: usize, max_size_bytes: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(
                NonZeroUsize::new(max_documents.max(1)).unwrap(),
            )),
            max_size_bytes,
            ttl,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(10, 5 * 1024 * 1024, Duration::from_secs(7200))
    }

    /// Loads a document, truncating to `max_size_bytes` and dropping any
    /// section that starts past the truncation point if it is oversized.
    pub async fn load(&self, eli: &str, markdown: String, sections: Vec<Section>) {
        let mut inner = self.inner.lock().await;
        sweep_expired(&mut inner, self.ttl);

        let (markdown, sections) = if markdown.len() > self.max_size_bytes {
            let truncated = truncate_to_char_boundary(&markdown, self.max_size_bytes);
            let kept = sections
                .into_iter()
                .filter(|s| s.start_pos < truncated.len())
                .collect();
            (truncated, kept)
        } else {
            (markdown, sections)
        };

        let now = Instant::now();
        let doc = LoadedDocument {
            eli: eli.to_string(),
            size_bytes: markdown.len(),
            markdown,
            sections,
            loaded_at: now,
            last_accessed: now,
        };
        inner.put(eli.to_string(), doc);
    }

    pub async fn is_loaded(&self, eli: &str) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.peek(eli) {
            Some(doc) if doc.last_accessed.elapsed() <= self.ttl => true,
            Some(_) => {
                inner.pop(eli);
                false
            }
            None => false,
        }
    }

    pub async fn get_toc(&self, eli: &str) -> GatewayResult<Vec<Section>> {
        let mut inner = self.inner.lock().await;
        let doc = touch(&mut inner, eli, self.ttl)?;
        Ok(doc.sections.clone())
    }

    /// Resolves a section by exact slug, title prefix, or `Art. N` lookup,
    /// returning its text slice.
    pub async fn get_section(&self, eli: &str, section_id: &str) -> GatewayResult<Option<String>> {
        let mut inner = self.inner.lock().await;
        let doc = touch(&mut inner, eli, self.ttl)?;

        let wanted_slug = section_id.to_lowercase().replace(' ', "_");
        let wanted_lower = section_id.to_lowercase();
        for section in &doc.sections {
            if section.id.to_lowercase() == wanted_slug
                || section.title.to_lowercase().starts_with(&wanted_lower)
            {
                return Ok(Some(slice(&doc.markdown, section)));
            }
        }

        if let Some(art_num) = parse_art_number(section_id) {
            let pattern = regex::RegexBuilder::new(&format!(r"^Art\.?\s*{}", escape(&art_num)))
                .case_insensitive(true)
                .build()
                .expect("constructed from escaped input");
            for section in &doc.sections {
                if pattern.is_match(&section.title) {
                    return Ok(Some(slice(&doc.markdown, section)));
                }
            }
        }

        Ok(None)
    }

    pub async fn search(
        &self,
        eli: &str,
        query: &str,
        context_chars: usize,
    ) -> GatewayResult<Vec<SearchHit>> {
        let mut inner = self.inner.lock().await;
        let doc = touch(&mut inner, eli, self.ttl)?;

        let pattern = regex::RegexBuilder::new(&escape(query))
            .case_insensitive(true)
            .build()
            .expect("constructed from escaped input");

        let mut hits = Vec::new();
        for m in pattern.find_iter(&doc.markdown) {
            let start = m.start().saturating_sub(context_chars);
            let end = (m.end() + context_chars).min(doc.markdown.len());
            let context = safe_slice(&doc.markdown, start, end);

            let mut section_id = "unknown".to_string();
            let mut section_title = "Unknown section".to_string();
            for section in &doc.sections {
                if section.start_pos <= m.start() && m.start() < section.end_pos {
                    section_id = section.id.clone();
                    section_title = section.title.clone();
                    break;
                }
            }

            hits.push(SearchHit {
                section_id,
                section_title,
                context,
                match_start: m.start(),
                match_end: m.end(),
            });
        }
        Ok(hits)
    }

    pub async fn list_documents(&self) -> Vec<(String, usize, usize)> {
        let mut inner = self.inner.lock().await;
        sweep_expired(&mut inner, self.ttl);
        inner
            .iter()
            .map(|(eli, doc)| (eli.clone(), doc.size_bytes, doc.sections.len()))
            .collect()
    }

    pub async fn evict(&self, eli: &str) {
        self.inner.lock().await.pop(eli);
    }
}

fn touch<'a>(
    inner: &'a mut LruCache<String, LoadedDocument>,
    eli: &str,
    ttl: Duration,
) -> GatewayResult<&'a mut LoadedDocument> {
    let expired = matches!(inner.peek(eli), Some(doc) if doc.last_accessed.elapsed() > ttl);
    if expired {
        inner.pop(eli);
    }
    let doc = inner.get_mut(eli).ok_or_else(|| GatewayError::DocumentNotLoaded {
        eli: eli.to_string(),
    })?;
    doc.last_accessed = Instant::now();
    Ok(doc)
}

fn sweep_expired(inner: &mut LruCache<String, LoadedDocument>, ttl: Duration) {
    let expired: Vec<String> = inner
        .iter()
        .filter(|(_, doc)| doc.last_accessed.elapsed() > ttl)
        .map(|(k, _)| k.clone())
        .collect();
    for key in expired {
        inner.pop(&key);
    }
}

fn slice(markdown: &str, section: &Section) -> String {
    safe_slice(markdown, section.start_pos, section.end_pos)
}

fn safe_slice(markdown: &str, start: usize, end: usize) -> String {
    let start = start.min(markdown.len());
    let end = end.min(markdown.len()).max(start);
    markdown[start..end].to_string()
}

fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> String {
    let mut end = max_bytes.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

fn parse_art_number(section_id: &str) -> Option<String> {
    let re = regex::RegexBuilder::new(r"^art\.?\s*(\d+[a-z]?)")
        .case_insensitive(true)
        .build()
        .unwrap();
    re.captures(section_id)
        .map(|c| c.get(1).unwrap().as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, title: &str, start: usize, end: usize) -> Section {
        Section {
            id: id.to_string(),
            title: title.to_string(),
            level: 1,
            start_pos: start,
            end_pos: end,
        }
    }

    #[tokio::test]
    async fn load_then_is_loaded() {
        let store = DocumentStore::new(10, 1024, Duration::from_secs(60));
        store.load("DU/2024/1", "# A\nbody".to_string(), vec![]).await;
        assert!(store.is_loaded("DU/2024/1").await);
        assert!(!store.is_loaded("DU/2024/2").await);
    }

    #[tokio::test]
    async fn get_section_by_exact_slug() {
        let store = DocumentStore::new(10, 1024, Duration::from_secs(60));
        let md = "# Wstęp\nAAA\nArt. 1. BBB\n";
        let sections = vec![section("wstep", "Wstęp", 0, 8), section("art_1", "Art. 1. BBB", 8, md.len())];
        store.load("DU/2024/1", md.to_string(), sections).await;

        let content = store.get_section("DU/2024/1", "art_1").await.unwrap();
        assert_eq!(content.unwrap(), "Art. 1. BBB\n");
    }

    #[tokio::test]
    async fn get_section_by_art_number_fallback() {
        let store = DocumentStore::new(10, 1024, Duration::from_secs(60));
        let md = "Art. 5a. Treść przepisu.\n";
        let sections = vec![section("art_5a_tresc_przepisu", "Art. 5a. Treść przepisu.", 0, md.len())];
        store.load("DU/2024/1", md.to_string(), sections).await;

        let content = store.get_section("DU/2024/1", "Art 5a").await.unwrap();
        assert!(content.unwrap().contains("Treść przepisu"));
    }

    #[tokio::test]
    async fn missing_document_is_document_not_loaded_error() {
        let store = DocumentStore::new(10, 1024, Duration::from_secs(60));
        let err = store.get_toc("DU/2024/999").await.unwrap_err();
        assert_eq!(err.category(), "precondition");
    }

    #[tokio::test]
    async fn oversized_document_is_truncated() {
        let store = DocumentStore::new(10, 10, Duration::from_secs(60));
        store
            .load("DU/2024/1", "0123456789ABCDEF".to_string(), vec![])
            .await;
        let docs = store.list_documents().await;
        assert_eq!(docs[0].1, 10);
    }

    #[tokio::test]
    async fn search_finds_matches_with_context() {
        let store = DocumentStore::new(10, 4096, Duration::from_secs(60));
        let md = "lorem ipsum KEYWORD dolor sit amet";
        store.load("DU/2024/1", md.to_string(), vec![]).await;
        let hits = store.search("DU/2024/1", "KEYWORD", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].context.contains("KEYWORD"));
    }

    #[tokio::test]
    async fn capacity_overflow_evicts_least_recently_used() {
        let store = DocumentStore::new(1, 4096, Duration::from_secs(60));
        store.load("A", "x".to_string(), vec![]).await;
        store.load("B", "y".to_string(), vec![]).await;
        assert!(!store.is_loaded("A").await);
        assert!(store.is_loaded("B").await);
    }
}
