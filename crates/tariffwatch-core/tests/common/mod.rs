use chrono::NaiveDate;
use tariffwatch_core::normalize::RawRow;
use tariffwatch_core::{RateValue, Snapshot, TariffRecord};

/// Build a raw row from `(column, value)` pairs
#[allow(dead_code)]
pub fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A fully populated raw row in canonical columns
#[allow(dead_code)]
pub fn full_row(code: &str, description: &str, general: &str, special: &str) -> RawRow {
    raw_row(&[
        ("hts_code", code),
        ("description", description),
        ("rate_general", general),
        ("rate_special", special),
        ("rate_column2", "35%"),
        ("additional_duties", ""),
    ])
}

/// Record with the given general rate and additional duties, other rates fixed
#[allow(dead_code)]
pub fn record(code: &str, description: &str, general: &str, additional: &str) -> TariffRecord {
    TariffRecord::new(
        code.to_string(),
        description.to_string(),
        RateValue::parse(general),
        RateValue::parse("Free"),
        RateValue::parse("90%"),
        additional.to_string(),
    )
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(dead_code)]
pub fn snapshot(on: &str, records: Vec<TariffRecord>) -> Snapshot {
    Snapshot::new(date(on), records)
}
