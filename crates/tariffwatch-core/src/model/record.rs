use crate::model::rate::RateValue;
use serde::{Deserialize, Serialize};

/// The four change-significant fields of a tariff line
///
/// Declaration order is the order in which per-field change events for
/// one HTS code are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateField {
    RateGeneral,
    RateSpecial,
    RateColumn2,
    AdditionalDuties,
}

impl RateField {
    pub const ALL: [RateField; 4] = [
        RateField::RateGeneral,
        RateField::RateSpecial,
        RateField::RateColumn2,
        RateField::AdditionalDuties,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RateField::RateGeneral => "rate_general",
            RateField::RateSpecial => "rate_special",
            RateField::RateColumn2 => "rate_column2",
            RateField::AdditionalDuties => "additional_duties",
        }
    }
}

impl std::fmt::Display for RateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical representation of one schedule row at one point in time
///
/// Built by the row normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRecord {
    hts_code: String,
    description: String,
    rate_general: RateValue,
    rate_special: RateValue,
    rate_column2: RateValue,
    additional_duties: String,
}

impl TariffRecord {
    /// Assemble a record from already-normalized parts.
    ///
    /// `hts_code` is stored as given; use
    /// [`normalize_row`](crate::normalize::normalize_row) to build records
    /// from raw export text.
    pub fn new(
        hts_code: String,
        description: String,
        rate_general: RateValue,
        rate_special: RateValue,
        rate_column2: RateValue,
        additional_duties: String,
    ) -> Self {
        Self {
            hts_code,
            description,
            rate_general,
            rate_special,
            rate_column2,
            additional_duties,
        }
    }

    pub fn hts_code(&self) -> &str {
        &self.hts_code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rate_general(&self) -> &RateValue {
        &self.rate_general
    }

    pub fn rate_special(&self) -> &RateValue {
        &self.rate_special
    }

    pub fn rate_column2(&self) -> &RateValue {
        &self.rate_column2
    }

    pub fn additional_duties(&self) -> &str {
        &self.additional_duties
    }

    /// Published text of a change-significant field
    ///
    /// Rates yield their raw text, never the derived percentage.
    pub fn field_text(&self, field: RateField) -> &str {
        match field {
            RateField::RateGeneral => self.rate_general.raw(),
            RateField::RateSpecial => self.rate_special.raw(),
            RateField::RateColumn2 => self.rate_column2.raw(),
            RateField::AdditionalDuties => &self.additional_duties,
        }
    }
}
