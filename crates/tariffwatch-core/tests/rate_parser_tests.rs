//! Rate parser classification tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tariffwatch_core::{parse_rate, RateKind};

fn assert_kind(input: &str, kind: RateKind, percent: Option<f64>) {
    let rate = parse_rate(input);
    assert_eq!(rate.kind(), kind, "kind for {:?}", input);
    assert_eq!(rate.percent_value(), percent, "percent for {:?}", input);
}

#[test]
fn test_free_and_empty() {
    assert_kind("", RateKind::Free, Some(0.0));
    assert_kind("free", RateKind::Free, Some(0.0));
    assert_kind("FREE", RateKind::Free, Some(0.0));
    assert_kind(" \t ", RateKind::Free, Some(0.0));
}

#[test]
fn test_disambiguation() {
    assert_kind("19.7%", RateKind::Percent, Some(19.7));
    assert_kind("$0.52/kg", RateKind::Specific, None);
    assert_kind("$0.52/kg + 10%", RateKind::Compound, None);
}

#[test]
fn test_percent_forms() {
    assert_kind("25%", RateKind::Percent, Some(25.0));
    assert_kind("6.5 %", RateKind::Percent, Some(6.5));
    assert_kind("0%", RateKind::Percent, Some(0.0));
    assert_kind("5% on the value of each part", RateKind::Percent, Some(5.0));
    assert_kind("8% per annum", RateKind::Percent, Some(8.0));
}

#[test]
fn test_specific_unit_forms() {
    for input in [
        "1.4¢/kg",
        "4.4¢/liter",
        "$1.18/doz.",
        "68¢/head",
        "5 cents per kilogram",
        "$3 each",
        "€1.20/kg",
    ] {
        assert_kind(input, RateKind::Specific, None);
    }
}

#[test]
fn test_compound_forms() {
    for input in ["0.9¢/kg + 4.1%", "10% + $1.50/kg", "2.2¢/kg + 3.5% 1/"] {
        assert_kind(input, RateKind::Compound, None);
    }
}

#[test]
fn test_percent_not_leading_is_unparseable() {
    assert_kind("See 9903.88.01, 25%", RateKind::Unparseable, None);
}

#[test]
fn test_unrecognised_text_is_unparseable() {
    for input in [
        "The rate applicable to the article",
        "The rate applicable to each component",
        "As per subheading 9903.88.01",
        "See US$ note 2",
        "N/A",
        "see note 3",
        "-",
    ] {
        let rate = parse_rate(input);
        assert_eq!(rate.kind(), RateKind::Unparseable, "input {:?}", input);
        assert_eq!(rate.percent_value(), None);
        assert_eq!(rate.raw(), input.trim());
    }
}

#[test]
fn test_raw_text_preserved_verbatim_inside() {
    let rate = parse_rate("   Free (A+,AU,  BH)  ");
    assert_eq!(rate.raw(), "Free (A+,AU,  BH)");
}
