//! Short plain-text summary for chat or terminal output.

use crate::diff::{ChangeEvent, ChangeType};
use crate::report::{change_label, top_changes, HIGHLIGHT_COUNT};
use chrono::NaiveDate;

/// Upper bound on the summary's line count
pub const MAX_SUMMARY_LINES: usize = 20;

/// Render a summary of at most [`MAX_SUMMARY_LINES`] lines
pub fn render_text_summary(
    events: &[ChangeEvent],
    run_date: NaiveDate,
    md_path: &str,
    json_path: &str,
) -> String {
    let mut lines = vec![
        format!("Tariff Watch update ({})", run_date.format("%Y-%m-%d")),
        format!("Total changes detected: {}", events.len()),
        String::new(),
    ];

    if events.is_empty() {
        lines.push("No changes detected.".to_string());
    } else {
        lines.push("Top highlights:".to_string());
        for e in top_changes(events, HIGHLIGHT_COUNT) {
            let line = match e.change_type {
                ChangeType::RateChanged => format!(
                    "  - [{}] {} {}: {} -> {}",
                    change_label(e.change_type),
                    e.hts_code,
                    e.field_changed.map(|f| f.as_str()).unwrap_or("?"),
                    e.old_value.as_deref().unwrap_or(""),
                    e.new_value.as_deref().unwrap_or("")
                ),
                ChangeType::Added | ChangeType::Removed => {
                    format!("  - [{}] {}", change_label(e.change_type), e.hts_code)
                }
            };
            lines.push(line);
        }
    }

    lines.extend([
        String::new(),
        format!("Report (MD):   {}", md_path),
        format!("Report (JSON): {}", json_path),
        String::new(),
        "For reference only. Verify with official rulings.".to_string(),
    ]);
    lines.truncate(MAX_SUMMARY_LINES);
    lines.join("\n")
}
