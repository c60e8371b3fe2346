use serde::{Deserialize, Serialize};

/// Classification of one published rate expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateKind {
    /// Empty cell or the literal word "free"
    Free,
    /// A plain ad valorem percentage, e.g. `19.7%`
    Percent,
    /// An amount per unit, e.g. `$0.52/kg` or `1.4¢/kg`
    Specific,
    /// A specific component combined with a percentage, e.g. `0.9¢/kg + 4.1%`
    Compound,
    /// Anything the parser does not recognise
    Unparseable,
}

impl RateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateKind::Free => "FREE",
            RateKind::Percent => "PERCENT",
            RateKind::Specific => "SPECIFIC",
            RateKind::Compound => "COMPOUND",
            RateKind::Unparseable => "UNPARSEABLE",
        }
    }
}

/// Result of parsing one rate cell
///
/// `raw` is the published text (trimmed) and is the only value that
/// takes part in change detection. `percent_value` is a derived
/// convenience, present only for `Free` (0) and `Percent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateValue {
    raw: String,
    kind: RateKind,
    percent_value: Option<f64>,
}

impl RateValue {
    /// Parse a raw rate expression. Never fails.
    pub fn parse(raw: &str) -> Self {
        crate::rate_parser::parse_rate(raw)
    }

    /// Rate for a column the export did not supply at all
    pub fn absent() -> Self {
        Self::unparseable(String::new())
    }

    pub(crate) fn free(raw: String) -> Self {
        Self {
            raw,
            kind: RateKind::Free,
            percent_value: Some(0.0),
        }
    }

    pub(crate) fn percent(raw: String, value: f64) -> Self {
        Self {
            raw,
            kind: RateKind::Percent,
            percent_value: Some(value),
        }
    }

    pub(crate) fn specific(raw: String) -> Self {
        Self {
            raw,
            kind: RateKind::Specific,
            percent_value: None,
        }
    }

    pub(crate) fn compound(raw: String) -> Self {
        Self {
            raw,
            kind: RateKind::Compound,
            percent_value: None,
        }
    }

    pub(crate) fn unparseable(raw: String) -> Self {
        Self {
            raw,
            kind: RateKind::Unparseable,
            percent_value: None,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> RateKind {
        self.kind
    }

    pub fn percent_value(&self) -> Option<f64> {
        self.percent_value
    }
}
