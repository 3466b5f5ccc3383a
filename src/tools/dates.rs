//! `calculate_legal_date` (§6).

use crate::errors::GatewayError;
use crate::gateway::GatewayContext;
use crate::hints::date_hints;
use crate::models::domain::EnrichedResponse;
use crate::models::tool_io::{DateCalculationRequest, DateOutput};
use chrono::{Datelike, NaiveDate};

pub async fn handle(_ctx: &GatewayContext, params: serde_json::Value) -> String {
    let req: DateCalculationRequest = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => {
            return EnrichedResponse::error(DateOutput::default(), e.to_string(), "validation").to_json()
        }
    };

    let days = req.days.unwrap_or(0);
    let months = req.months.unwrap_or(0);
    let years = req.years.unwrap_or(0);

    let base = match &req.base_date {
        Some(s) => match parse_flexible_date(s) {
            Ok(d) => d,
            Err(e) => {
                return EnrichedResponse::error(
                    DateOutput {
                        base_date: s.clone(),
                        ..Default::default()
                    },
                    e.to_string(),
                    "validation",
                )
                .to_json()
            }
        },
        None => {
            let today = GatewayContext::today();
            NaiveDate::parse_from_str(&today, "%Y-%m-%d").expect("today() is always well-formed")
        }
    };
    let base_date_str = base.format("%Y-%m-%d").to_string();

    let calculated = add_relative(base, years, months, days);
    let calculated_str = calculated.format("%Y-%m-%d").to_string();

    let description = describe(&base_date_str, years, months, days);

    EnrichedResponse::ok(
        DateOutput {
            base_date: base_date_str,
            calculated_date: calculated_str,
            days_offset: days,
            months_offset: months,
            years_offset: years,
            description,
        },
        date_hints(),
    )
    .to_json()
}

fn parse_flexible_date(raw: &str) -> Result<NaiveDate, GatewayError> {
    let s = raw.trim();
    let invalid = || {
        GatewayError::Validation(format!(
            "Nieprawidłowy format daty: '{raw}'. \
             Obsługiwane formaty: YYYY-MM-DD, YYYY-MM, YYYY."
        ))
    };

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if s.len() == 7 && s.as_bytes().get(4) == Some(&b'-') {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Ok(d);
        }
    }
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d") {
            return Ok(d);
        }
    }
    Err(invalid())
}

/// Mirrors `dateutil.relativedelta(years=, months=, years=)`: year/month
/// offsets shift the calendar month first, clamping the day into the target
/// month if it overflows (e.g. Jan 31 + 1 month -> Feb 28/29), then the day
/// offset is applied as a plain calendar delta.
fn add_relative(base: NaiveDate, years: i64, months: i64, days: i64) -> NaiveDate {
    let total_months = years * 12 + months;
    let base_month_index = base.year() as i64 * 12 + (base.month() as i64 - 1);
    let target_month_index = base_month_index + total_months;
    let target_year = target_month_index.div_euclid(12) as i32;
    let target_month = (target_month_index.rem_euclid(12) + 1) as u32;

    let mut day = base.day();
    let shifted = loop {
        match NaiveDate::from_ymd_opt(target_year, target_month, day) {
            Some(d) => break d,
            None => day -= 1,
        }
    };

    shifted + chrono::Duration::days(days)
}

fn describe(base_date_str: &str, years: i64, months: i64, days: i64) -> String {
    let mut parts = Vec::new();

    if years != 0 {
        let y = years.unsigned_abs();
        parts.push(match y {
            1 => "1 rok".to_string(),
            2..=4 => format!("{y} lata"),
            _ => format!("{y} lat"),
        });
    }
    if months != 0 {
        let m = months.unsigned_abs();
        parts.push(match m {
            1 => "1 miesiąc".to_string(),
            2..=4 => format!("{m} miesiące"),
            _ => format!("{m} miesięcy"),
        });
    }
    if days != 0 {
        let d = days.unsigned_abs();
        parts.push(if d == 1 {
            "1 dzień".to_string()
        } else {
            format!("{d} dni")
        });
    }

    if parts.is_empty() {
        return format!("Data bazowa: {base_date_str}");
    }

    let direction = if days + months + years >= 0 { "po" } else { "przed" };
    format!("{} {direction} {base_date_str}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_end_of_month_overflow() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let result = add_relative(base, 0, 1, 0);
        assert_eq!(result, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn applies_days_after_month_shift() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let result = add_relative(base, 0, 1, 2);
        assert_eq!(result, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn description_uses_polish_plural_rules() {
        assert_eq!(describe("2024-01-01", 0, 0, 0), "Data bazowa: 2024-01-01");
        assert_eq!(describe("2024-01-01", 0, 0, 1), "1 dzień po 2024-01-01");
        assert_eq!(describe("2024-01-01", 0, 0, -14), "14 dni przed 2024-01-01");
        assert_eq!(describe("2024-01-01", 1, 0, 0), "1 rok po 2024-01-01");
        assert_eq!(describe("2024-01-01", 3, 0, 0), "3 lata po 2024-01-01");
        assert_eq!(describe("2024-01-01", 5, 0, 0), "5 lat po 2024-01-01");
    }

    #[test]
    fn parses_year_only_and_year_month_formats() {
        assert_eq!(parse_flexible_date("2024").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(parse_flexible_date("2024-06").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(parse_flexible_date("not-a-date").is_err());
    }
}
