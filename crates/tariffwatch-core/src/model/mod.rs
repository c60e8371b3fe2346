pub mod rate;
pub mod record;

pub use rate::{RateKind, RateValue};
pub use record::{RateField, TariffRecord};
