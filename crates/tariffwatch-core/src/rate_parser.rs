//! Rate expression parser.
//!
//! Turns the free text of one rate cell into a [`RateValue`]. The parser is
//! total: every input produces a value, and unrecognised text becomes
//! [`RateKind::Unparseable`](crate::model::RateKind::Unparseable) with the
//! trimmed text preserved.
//!
//! ## Policy (priority order)
//!
//! 1. Empty, whitespace-only or case-insensitive `free` → `Free`, 0%
//! 2. A leading `<decimal>%` with no specific-duty unit token → `Percent`
//! 3. A unit token and no percentage → `Specific`
//! 4. A unit token and a percentage → `Compound`
//! 5. Anything else → `Unparseable`
//!
//! A compound rate contains a `%` too, so the unit token is checked before a
//! percentage is accepted.

use crate::model::RateValue;
use regex::Regex;
use std::sync::OnceLock;

/// An amount tied to a unit: `$1.20`, `4.4¢`, `25 cents`, `12/kg`,
/// `5 per kilogram` or `3 each`. A bare sign or word is not a unit token.
fn unit_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)[$€£]\s*\d|\d[\d.]*\s*(?:¢|cents?\b)|\d[\d.]*\s*(?:/|per\s+)[a-z]|\d[\d.]*\s*(?:¢\s*)?each\b",
        )
        .expect("valid unit token regex")
    })
}

fn leading_percent() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)?)\s*%").expect("valid leading percent regex")
    })
}

fn any_percent() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?\s*%").expect("valid percent regex"))
}

/// Parse one raw rate expression.
///
/// # Examples
///
/// ```
/// use tariffwatch_core::model::RateKind;
/// use tariffwatch_core::rate_parser::parse_rate;
///
/// let rate = parse_rate(" 19.7% ");
/// assert_eq!(rate.kind(), RateKind::Percent);
/// assert_eq!(rate.percent_value(), Some(19.7));
/// assert_eq!(rate.raw(), "19.7%");
///
/// assert_eq!(parse_rate("$0.52/kg + 10%").kind(), RateKind::Compound);
/// ```
pub fn parse_rate(raw: &str) -> RateValue {
    let text = raw.trim();

    if text.is_empty() || text.eq_ignore_ascii_case("free") {
        return RateValue::free(text.to_string());
    }

    if unit_token().is_match(text) {
        return if any_percent().is_match(text) {
            RateValue::compound(text.to_string())
        } else {
            RateValue::specific(text.to_string())
        };
    }

    if let Some(caps) = leading_percent().captures(text) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return RateValue::percent(text.to_string(), value);
        }
    }

    RateValue::unparseable(text.to_string())
}
