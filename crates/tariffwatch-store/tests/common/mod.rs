use chrono::NaiveDate;
use std::path::PathBuf;
use tariffwatch_core::{RateValue, Snapshot, TariffRecord};

#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(dead_code)]
pub fn record(code: &str, general: &str) -> TariffRecord {
    TariffRecord::new(
        code.to_string(),
        format!("Article {}", code),
        RateValue::parse(general),
        RateValue::parse("Free"),
        RateValue::parse("35%"),
        String::new(),
    )
}

#[allow(dead_code)]
pub fn snapshot(on: &str, records: Vec<TariffRecord>) -> Snapshot {
    Snapshot::new(date(on), records)
}
