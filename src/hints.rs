//! Contextual next-step hints attached to tool responses (§4.8). Pure
//! functions over already-computed outputs — no I/O, no service access.

use crate::models::domain::Hint;
use serde_json::json;

pub fn search_hints(
    total_count: i64,
    has_results: bool,
    eli: Option<&str>,
    result_set_id: Option<&str>,
    was_truncated: bool,
    applied_limit: Option<i64>,
) -> Vec<Hint> {
    let mut hints = Vec::new();

    if has_results {
        if let Some(eli) = eli {
            hints.push(Hint::with_params(
                "Użyj get_act_details aby zobaczyć szczegóły wybranego aktu.",
                "get_act_details",
                json!({"eli": eli}),
            ));
        }
        if let Some(result_set_id) = result_set_id {
            hints.push(Hint::with_params(
                "Użyj filter_results aby zawęzić wyniki, np. po typie dokumentu \
                 (Ustawa, Rozporządzenie) lub wzorcem regex w tytule.",
                "filter_results",
                json!({"result_set_id": result_set_id}),
            ));
        }
    }

    if was_truncated {
        if let Some(limit) = applied_limit {
            hints.push(Hint::with_tool(
                format!(
                    "Wyniki ograniczone do {limit} (z {total_count} dostępnych). \
                     Użyj limit/offset do paginacji lub filter_results do zawężenia."
                ),
                "search_legal_acts",
            ));
        }
    } else if total_count > 20 {
        hints.push(Hint::with_tool(
            "Użyj parametrów 'limit' i 'offset' do paginacji wyników.",
            "search_legal_acts",
        ));
    }

    if !has_results {
        hints.push(Hint::with_tool(
            "Brak wyników. UWAGA: Słowa kluczowe API działają z logiką AND — \
             wszystkie muszą wystąpić jednocześnie. Spróbuj mniej słów kluczowych \
             lub szukaj każdego osobno (logika OR).",
            "search_legal_acts",
        ));
        hints.push(Hint::with_tool(
            "Spróbuj poszerzyć kryteria: usuń filtry dat, zmień typ dokumentu lub rok.",
            "search_legal_acts",
        ));
        hints.push(Hint::with_params(
            "Sprawdź dostępne słowa kluczowe, typy lub statusy w metadanych systemu.",
            "get_system_metadata",
            json!({"category": "keywords"}),
        ));
    }

    hints
}

pub fn act_details_hints(eli: &str, is_loaded: bool, has_html: bool, just_loaded: bool) -> Vec<Hint> {
    let mut hints = Vec::new();

    if !is_loaded && has_html {
        hints.push(Hint::with_params(
            "Załaduj pełną treść aby czytać sekcje lub przeszukiwać akt.",
            "get_act_details",
            json!({"eli": eli, "load_content": true}),
        ));
    }
    if is_loaded {
        if just_loaded {
            hints.push(Hint::new(
                "Dokument załadowany do pamięci. TTL: 2h. \
                 Po tym czasie wymagane ponowne załadowanie (load_content=true).",
            ));
        }
        hints.push(Hint::with_params(
            "Przeczytaj wybraną sekcję aktu.",
            "read_act_content",
            json!({"eli": eli}),
        ));
        hints.push(Hint::with_params(
            "Wyszukaj konkretne terminy w treści aktu.",
            "search_in_act",
            json!({"eli": eli}),
        ));
    }
    hints.push(Hint::with_params(
        "Przeanalizuj powiązania i referencje tego aktu z innymi aktami.",
        "analyze_act_relationships",
        json!({"eli": eli}),
    ));

    hints
}

pub fn metadata_hints(category: &str) -> Vec<Hint> {
    let mut hints = Vec::new();
    if category == "all" || category == "keywords" {
        hints.push(Hint::with_tool(
            "Użyj pobranych słów kluczowych do wyszukiwania aktów prawnych.",
            "search_legal_acts",
        ));
    }
    if category == "all" || category == "types" {
        hints.push(Hint::with_tool(
            "Filtruj wyniki wyszukiwania po typie dokumentu (np. 'Ustawa', 'Rozporządzenie').",
            "search_legal_acts",
        ));
    }
    hints
}

pub fn content_hints(eli: &str, has_sections: bool) -> Vec<Hint> {
    if has_sections {
        vec![Hint::with_params(
            "Wyszukaj konkretne terminy w treści tego aktu.",
            "search_in_act",
            json!({"eli": eli}),
        )]
    } else {
        Vec::new()
    }
}

pub fn relationships_hints(eli: &str, relationship_types: &[String]) -> Vec<Hint> {
    let mut hints = vec![
        Hint::with_params(
            "Sprawdź szczegóły tego aktu.",
            "get_act_details",
            json!({"eli": eli}),
        ),
        Hint::with_params(
            "Załaduj treść aby przeczytać akt.",
            "get_act_details",
            json!({"eli": eli, "load_content": true}),
        ),
    ];
    if relationship_types
        .iter()
        .any(|t| t == "Akty zmieniające" || t == "Akty zmienione")
    {
        hints.push(Hint::with_tool(
            "Śledź zmiany prawne w czasie.",
            "track_legal_changes",
        ));
    }
    hints
}

pub fn date_hints() -> Vec<Hint> {
    vec![
        Hint::with_tool(
            "Użyj obliczonej daty jako filtra w wyszukiwaniu aktów prawnych.",
            "search_legal_acts",
        ),
        Hint::with_tool("Śledź zmiany prawne w zakresie dat.", "track_legal_changes"),
    ]
}

pub fn compare_hints(eli_a: &str, eli_b: &str) -> Vec<Hint> {
    vec![
        Hint::with_params(
            "Załaduj treść pierwszego aktu aby przeczytać szczegóły.",
            "get_act_details",
            json!({"eli": eli_a, "load_content": true}),
        ),
        Hint::with_params(
            "Załaduj treść drugiego aktu aby przeczytać szczegóły.",
            "get_act_details",
            json!({"eli": eli_b, "load_content": true}),
        ),
        Hint::with_params(
            "Przeanalizuj powiązania pierwszego aktu.",
            "analyze_act_relationships",
            json!({"eli": eli_a}),
        ),
        Hint::with_params(
            "Przeanalizuj powiązania drugiego aktu.",
            "analyze_act_relationships",
            json!({"eli": eli_b}),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_results_gets_three_guidance_hints() {
        let hints = search_hints(0, false, None, None, false, None);
        assert_eq!(hints.len(), 3);
    }

    #[test]
    fn truncated_results_mention_limit() {
        let hints = search_hints(50, true, Some("DU/2024/1"), Some("rs_1"), true, Some(20));
        assert!(hints.iter().any(|h| h.message.contains("20")));
    }

    #[test]
    fn relationships_hints_add_tracking_for_amendments() {
        let hints = relationships_hints("DU/2024/1", &["Akty zmienione".to_string()]);
        assert!(hints.iter().any(|h| h.tool.as_deref() == Some("track_legal_changes")));
    }
}
