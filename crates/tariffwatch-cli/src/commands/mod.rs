pub mod diff;
pub mod lookup;
pub mod run;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Today's date in local time, unless overridden on the command line
pub(crate) fn run_date(date: Option<chrono::NaiveDate>) -> chrono::NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}
