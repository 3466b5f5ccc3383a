//! Bounded in-memory store of search/browse result sets with grep-like
//! chainable filtering (§4.6).

use crate::errors::{GatewayError, GatewayResult};
use crate::models::domain::{ActSummary, StoredResultSet};
use lru::LruCache;
use regex::RegexBuilder;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub pattern: Option<String>,
    pub field: Option<String>,
    pub type_equals: Option<String>,
    pub status_equals: Option<String>,
    pub year_equals: Option<i64>,
    pub date_field: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: bool,
    pub limit: Option<i64>,
}

const SEARCHABLE_FIELDS: &[&str] = &["title", "eli", "status", "type", "publisher"];
const DATE_FIELDS: &[&str] = &["promulgation_date", "effective_date"];
const SORTABLE_FIELDS: &[&str] = &[
    "title",
    "eli",
    "year",
    "pos",
    "status",
    "type",
    "promulgation_date",
    "effective_date",
];

pub struct ResultStore {
    inner: Mutex<LruCache<String, StoredResultSet>>,
    ttl: Duration,
    counter: AtomicU64,
}

impl ResultStore {
    pub fn new(max_sets: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(NonZeroUsize::new(max_sets.max(1)).unwrap())),
            ttl,
            counter: AtomicU64::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(20, Duration::from_secs(3600))
    }

    pub async fn store(
        &self,
        results: Vec<ActSummary>,
        query_summary: String,
        total_count: i64,
    ) -> String {
        let mut inner = self.inner.lock().await;
        sweep_expired(&mut inner, self.ttl);

        let id = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let result_set_id = format!("rs_{id}");
        let now = Instant::now();
        inner.put(
            result_set_id.clone(),
            StoredResultSet {
                result_set_id: result_set_id.clone(),
                results,
                query_summary,
                total_count,
                created_at: now,
                last_accessed: now,
            },
        );
        result_set_id
    }

    pub async fn get(&self, result_set_id: &str) -> Option<StoredResultSet> {
        let mut inner = self.inner.lock().await;
        match inner.peek(result_set_id) {
            Some(rs) if rs.last_accessed.elapsed() <= self.ttl => {
                let rs = inner.get_mut(result_set_id).unwrap();
                rs.last_accessed = Instant::now();
                Some(rs.clone())
            }
            Some(_) => {
                inner.pop(result_set_id);
                None
            }
            None => None,
        }
    }

    pub async fn list_sets(&self) -> Vec<StoredResultSet> {
        let mut inner = self.inner.lock().await;
        sweep_expired(&mut inner, self.ttl);
        inner.iter().map(|(_, rs)| rs.clone()).collect()
    }

    /// Returns the filtered results plus the pre-filter count.
    pub async fn filter_results(
        &self,
        result_set_id: &str,
        opts: &FilterOptions,
    ) -> GatewayResult<(Vec<ActSummary>, usize)> {
        let rs = self
            .get(result_set_id)
            .await
            .ok_or_else(|| GatewayError::ResultSetNotFound {
                result_set_id: result_set_id.to_string(),
            })?;

        let mut filtered = rs.results;
        let original_count = filtered.len();

        if let Some(t) = &opts.type_equals {
            filtered.retain(|r| r.act_type.as_deref() == Some(t.as_str()));
        }
        if let Some(s) = &opts.status_equals {
            filtered.retain(|r| &r.status == s);
        }
        if let Some(y) = opts.year_equals {
            filtered.retain(|r| r.year == y);
        }

        if let Some(pattern) = &opts.pattern {
            let field = opts
                .field
                .as_deref()
                .filter(|f| SEARCHABLE_FIELDS.contains(f))
                .unwrap_or("title");
            let compiled = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| GatewayError::Validation(format!("Invalid regex pattern: {e}")))?;
            filtered.retain(|r| match_field(r, field, &compiled));
        }

        if let Some(date_field) = &opts.date_field {
            if (opts.date_from.is_some() || opts.date_to.is_some())
                && DATE_FIELDS.contains(&date_field.as_str())
            {
                filtered = filter_by_date(
                    filtered,
                    date_field,
                    opts.date_from.as_deref(),
                    opts.date_to.as_deref(),
                );
            }
        }

        if let Some(sort_by) = &opts.sort_by {
            if SORTABLE_FIELDS.contains(&sort_by.as_str()) {
                sort_results(&mut filtered, sort_by, opts.sort_desc);
            }
        }

        if let Some(limit) = opts.limit {
            if limit > 0 {
                filtered.truncate(limit as usize);
            }
        }

        Ok((filtered, original_count))
    }
}

fn match_field(act: &ActSummary, field: &str, compiled: &regex::Regex) -> bool {
    let value: Option<&str> = match field {
        "title" => Some(&act.title),
        "eli" => Some(&act.eli),
        "status" => Some(&act.status),
        "type" => act.act_type.as_deref(),
        "publisher" => Some(&act.publisher),
        _ => Some(&act.title),
    };
    value.is_some_and(|v| compiled.is_match(v))
}

fn date_field_value<'a>(act: &'a ActSummary, field: &str) -> Option<&'a str> {
    match field {
        "promulgation_date" => act.promulgation_date.as_deref(),
        "effective_date" => act.effective_date.as_deref(),
        _ => None,
    }
}

fn filter_by_date(
    results: Vec<ActSummary>,
    date_field: &str,
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> Vec<ActSummary> {
    results
        .into_iter()
        .filter(|r| {
            let Some(value) = date_field_value(r, date_field) else {
                return false;
            };
            if let Some(from) = date_from {
                if value < from {
                    return false;
                }
            }
            if let Some(to) = date_to {
                if value > to {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn sort_results(results: &mut [ActSummary], sort_by: &str, desc: bool) {
    results.sort_by(|a, b| {
        let ord = match sort_by {
            "title" => a.title.cmp(&b.title),
            "eli" => a.eli.cmp(&b.eli),
            "year" => a.year.cmp(&b.year),
            "pos" => a.pos.cmp(&b.pos),
            "status" => a.status.cmp(&b.status),
            "type" => a.act_type.cmp(&b.act_type),
            "promulgation_date" => a.promulgation_date.cmp(&b.promulgation_date),
            "effective_date" => a.effective_date.cmp(&b.effective_date),
            _ => std::cmp::Ordering::Equal,
        };
        if desc {
            ord.reverse()
        } else {
            ord
        }
    });
}

fn sweep_expired(inner: &mut LruCache<String, StoredResultSet>, ttl: Duration) {
    let expired: Vec<String> = inner
        .iter()
        .filter(|(_, rs)| rs.last_accessed.elapsed() > ttl)
        .map(|(k, _)| k.clone())
        .collect();
    for key in expired {
        inner.pop(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(eli: &str, title: &str, year: i64, status: &str) -> ActSummary {
        ActSummary {
            eli: eli.to_string(),
            publisher: "DU".to_string(),
            year,
            pos: 1,
            title: title.to_string(),
            status: status.to_string(),
            act_type: None,
            promulgation_date: None,
            effective_date: None,
            in_force: None,
        }
    }

    #[tokio::test]
    async fn store_then_get_round_trips() {
        let store = ResultStore::new(10, Duration::from_secs(60));
        let id = store
            .store(vec![act("DU/2024/1", "A", 2024, "x")], "q".to_string(), 1)
            .await;
        let rs = store.get(&id).await.unwrap();
        assert_eq!(rs.results.len(), 1);
    }

    #[tokio::test]
    async fn missing_id_is_result_set_not_found() {
        let store = ResultStore::new(10, Duration::from_secs(60));
        let err = store
            .filter_results("rs_999", &FilterOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.category(), "precondition");
    }

    #[tokio::test]
    async fn pattern_filter_matches_title_case_insensitively() {
        let store = ResultStore::new(10, Duration::from_secs(60));
        let id = store
            .store(
                vec![act("A", "Ustawa o podatkach", 2024, "x"), act("B", "Inna", 2024, "x")],
                "q".to_string(),
                2,
            )
            .await;
        let opts = FilterOptions {
            pattern: Some("PODATK".to_string()),
            ..Default::default()
        };
        let (filtered, original) = store.filter_results(&id, &opts).await.unwrap();
        assert_eq!(original, 2);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].eli, "A");
    }

    #[tokio::test]
    async fn invalid_regex_is_validation_error() {
        let store = ResultStore::new(10, Duration::from_secs(60));
        let id = store.store(vec![], "q".to_string(), 0).await;
        let opts = FilterOptions {
            pattern: Some("[".to_string()),
            ..Default::default()
        };
        let err = store.filter_results(&id, &opts).await.unwrap_err();
        assert_eq!(err.category(), "validation");
    }

    #[tokio::test]
    async fn sort_and_limit_apply_after_filtering() {
        let store = ResultStore::new(10, Duration::from_secs(60));
        let id = store
            .store(
                vec![act("A", "Z", 2024, "x"), act("B", "A", 2024, "x"), act("C", "M", 2024, "x")],
                "q".to_string(),
                3,
            )
            .await;
        let opts = FilterOptions {
            sort_by: Some("title".to_string()),
            limit: Some(2),
            ..Default::default()
        };
        let (filtered, _) = store.filter_results(&id, &opts).await.unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "A");
        assert_eq!(filtered[1].title, "M");
    }

    #[tokio::test]
    async fn capacity_overflow_evicts_least_recently_used_set() {
        let store = ResultStore::new(1, Duration::from_secs(60));
        let first = store.store(vec![], "a".to_string(), 0).await;
        let _second = store.store(vec![], "b".to_string(), 0).await;
        assert!(store.get(&first).await.is_none());
    }
}
