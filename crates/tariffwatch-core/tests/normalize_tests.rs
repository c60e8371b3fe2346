//! Row normalizer tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{full_row, raw_row};
use tariffwatch_core::errors::{ExError, ExErrorKind};
use tariffwatch_core::{normalize_row, RateKind, TariffWatchError};

#[test]
fn test_full_row_normalizes() {
    let row = raw_row(&[
        ("hts_code", "6111.20.10.00"),
        ("description", "  Babies'   garments,\n of cotton "),
        ("rate_general", "19.7%"),
        ("rate_special", "Free (AU,BH,CL)"),
        ("rate_column2", "90%"),
        ("additional_duties", "  +25% (Sec. 301) "),
    ]);

    let record = normalize_row(&row).unwrap();
    assert_eq!(record.hts_code(), "6111201000");
    assert_eq!(record.description(), "Babies' garments, of cotton");
    assert_eq!(record.rate_general().kind(), RateKind::Percent);
    assert_eq!(record.rate_special().kind(), RateKind::Unparseable);
    assert_eq!(record.rate_special().raw(), "Free (AU,BH,CL)");
    assert_eq!(record.rate_column2().percent_value(), Some(90.0));
    assert_eq!(record.additional_duties(), "+25% (Sec. 301)");
}

#[test]
fn test_blank_code_is_malformed_with_row_verbatim() {
    let row = raw_row(&[
        ("hts_code", " . "),
        ("description", "Heading text only"),
        ("rate_general", ""),
    ]);

    let err = normalize_row(&row).unwrap_err();
    let TariffWatchError::MalformedRow { row: rendered } = &err else {
        panic!("expected MalformedRow, got {:?}", err);
    };
    assert_eq!(
        rendered,
        "hts_code= . , description=Heading text only, rate_general="
    );

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::MalformedRow);
    assert_eq!(ex.code(), "ERR_MALFORMED_ROW");
}

#[test]
fn test_absent_and_blank_rates_differ_in_kind_only() {
    let absent = normalize_row(&raw_row(&[("hts_code", "0101")])).unwrap();
    let blank = normalize_row(&raw_row(&[("hts_code", "0101"), ("rate_general", "  ")])).unwrap();

    assert_eq!(absent.rate_general().kind(), RateKind::Unparseable);
    assert_eq!(blank.rate_general().kind(), RateKind::Free);
    assert_eq!(absent.rate_general().raw(), blank.rate_general().raw());
}

#[test]
fn test_code_is_not_padded_or_truncated() {
    let short = normalize_row(&full_row("01", "Live animals", "", "")).unwrap();
    assert_eq!(short.hts_code(), "01");

    let long = normalize_row(&full_row("0101.21.00.10.99", "Odd", "", "")).unwrap();
    assert_eq!(long.hts_code(), "010121001099");
}
