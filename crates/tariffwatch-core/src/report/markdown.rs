//! Markdown report rendering.

use crate::diff::{ChangeEvent, ChangeType};
use crate::report::{change_label, top_changes, ReportContext, DISCLAIMER, HIGHLIGHT_COUNT};
use crate::snapshot::TrackingMode;

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn highlight_line(event: &ChangeEvent) -> String {
    let label = change_label(event.change_type);
    match event.change_type {
        ChangeType::RateChanged => format!(
            "- {}: `{}` {}: `{}` → `{}`",
            label,
            event.hts_code,
            event.field_changed.map(|f| f.as_str()).unwrap_or("?"),
            event.old_value.as_deref().unwrap_or(""),
            event.new_value.as_deref().unwrap_or("")
        ),
        ChangeType::Added | ChangeType::Removed => {
            format!("- {}: `{}` {}", label, event.hts_code, event.description)
        }
    }
}

fn table(events: &[ChangeEvent]) -> String {
    if events.is_empty() {
        return "_No changes detected._\n".to_string();
    }
    let mut out = String::from(
        "| HTS Code | Change Type | Field | Old Value | New Value | Description |\n\
         |---|---|---|---|---|---|\n",
    );
    for e in events {
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {} |\n",
            e.hts_code,
            change_label(e.change_type),
            e.field_changed.map(|f| f.as_str()).unwrap_or("-"),
            e.old_value.as_deref().map(cell).unwrap_or_else(|| "-".to_string()),
            e.new_value.as_deref().map(cell).unwrap_or_else(|| "-".to_string()),
            cell(&e.description)
        ));
    }
    out
}

/// Render the full Markdown report
pub fn render_markdown(events: &[ChangeEvent], ctx: &ReportContext) -> String {
    let highlights: Vec<String> = top_changes(events, HIGHLIGHT_COUNT)
        .into_iter()
        .map(highlight_line)
        .collect();
    let highlights = if highlights.is_empty() {
        "- No changes this period.".to_string()
    } else {
        highlights.join("\n")
    };

    let tracked = match ctx.mode {
        TrackingMode::TrackedOnly => ctx.tracked_hts.len().to_string(),
        TrackingMode::FullTable => "all".to_string(),
    };

    let mut out = String::new();
    out.push_str("# Tariff Watch: Weekly Update\n\n");
    out.push_str(&format!("**Date:** {}  \n", ctx.run_date.format("%Y-%m-%d")));
    out.push_str(&format!("**Mode:** {}  \n", ctx.mode));
    out.push_str(&format!("**Tracked HTS codes:** {}  \n", tracked));
    out.push_str(&format!("**Total changes:** {}\n\n", events.len()));
    out.push_str(&format!("---\n\n## Highlights\n\n{}\n\n", highlights));
    out.push_str(&format!("---\n\n## Detailed Changes\n\n{}\n", table(events)));
    out.push_str(&format!("---\n\n## Disclaimer\n\n> {}\n\n", DISCLAIMER));
    out.push_str(&format!(
        "---\n\n**Source:** {}\n",
        ctx.source.as_deref().unwrap_or("_not configured_")
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RateField;
    use chrono::NaiveDate;

    #[test]
    fn test_pipes_in_values_are_escaped() {
        let events = vec![ChangeEvent::rate_changed(
            "0101",
            RateField::AdditionalDuties,
            "",
            "a | b",
            "Horses",
        )];
        let ctx = ReportContext::new(
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            TrackingMode::FullTable,
        );
        let md = render_markdown(&events, &ctx);
        assert!(md.contains("a \\| b"));
        assert!(md.contains("**Tracked HTS codes:** all"));
    }
}
