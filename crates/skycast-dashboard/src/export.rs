//! Journal export: a single self-contained HTML document.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use skycast_core::units::format_temperature;
use skycast_core::{TemperatureUnit, Theme};
use skycast_store::JournalEntry;

use crate::render::format_date;

/// Render the journal as an HTML document: title, generation timestamp, one
/// block per entry (city, date, temperature + description, notes).
pub fn render_journal_html(
    entries: &[JournalEntry],
    unit: TemperatureUnit,
    theme: Theme,
) -> String {
    let (background, foreground, border) = if theme.is_dark() {
        ("#111827", "#f9fafb", "#374151")
    } else {
        ("#ffffff", "#111827", "#e5e7eb")
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Weather Journal</title>\n<style>\n");
    html.push_str(&format!(
        "body {{ font-family: sans-serif; max-width: 800px; margin: auto; padding: 20px; \
         background: {background}; color: {foreground}; }}\n\
         h1 {{ text-align: center; color: #1e3a8a; }}\n\
         .generated {{ text-align: center; color: #6b7280; margin-bottom: 20px; }}\n\
         .entry {{ border: 1px solid {border}; border-radius: 8px; padding: 15px; \
         margin-bottom: 20px; }}\n\
         .header {{ display: flex; justify-content: space-between; margin-bottom: 10px; }}\n"
    ));
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<h1>Weather Journal</h1>\n");
    html.push_str(&format!(
        "<p class=\"generated\">Generated on: {}</p>\n",
        Utc::now().format("%-d %B %Y")
    ));

    for entry in entries {
        html.push_str("<div class=\"entry\">\n<div class=\"header\">\n");
        html.push_str(&format!(
            "<div><strong>{}</strong> - {}</div>\n",
            escape(&entry.city),
            format_date(entry.date),
        ));
        html.push_str(&format!(
            "<div>{}, {}</div>\n</div>\n",
            format_temperature(entry.temperature, unit),
            escape(&entry.description),
        ));
        html.push_str(&format!("<p>{}</p>\n</div>\n", escape(&entry.notes)));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Write the journal document to `path`. Rejects an empty journal: there is
/// nothing to export.
pub fn export_journal(
    path: &Path,
    entries: &[JournalEntry],
    unit: TemperatureUnit,
    theme: Theme,
) -> Result<()> {
    if entries.is_empty() {
        anyhow::bail!("No journal entries to export");
    }

    let html = render_journal_html(entries, unit, theme);
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write journal export to {}", path.display()))?;

    tracing::info!("Exported {} journal entries to {}", entries.len(), path.display());
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(city: &str, notes: &str) -> JournalEntry {
        JournalEntry {
            id: "id-1".into(),
            date: 1_700_000_000,
            city: city.into(),
            temperature: 18.5,
            description: "Partly cloudy".into(),
            notes: notes.into(),
            icon: "//icon".into(),
        }
    }

    #[test]
    fn test_document_contains_every_entry() {
        let entries = vec![entry("Paris", "evening walk"), entry("Tokyo", "clear skies")];
        let html = render_journal_html(&entries, TemperatureUnit::Celsius, Theme::Light);

        assert!(html.contains("Weather Journal"));
        assert!(html.contains("Generated on:"));
        assert!(html.contains("Paris"));
        assert!(html.contains("evening walk"));
        assert!(html.contains("Tokyo"));
        assert!(html.contains("clear skies"));
        assert!(html.contains("19°C"));
    }

    #[test]
    fn test_theme_selects_palette() {
        let entries = vec![entry("Paris", "notes")];
        let dark = render_journal_html(&entries, TemperatureUnit::Celsius, Theme::Dark);
        let light = render_journal_html(&entries, TemperatureUnit::Celsius, Theme::Light);

        assert!(dark.contains("#111827; color: #f9fafb"));
        assert!(light.contains("#ffffff; color: #111827"));
    }

    #[test]
    fn test_notes_are_escaped() {
        let entries = vec![entry("Paris", "<script>alert(1)</script>")];
        let html = render_journal_html(&entries, TemperatureUnit::Celsius, Theme::Light);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_export_rejects_empty_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.html");
        let result = export_journal(&path, &[], TemperatureUnit::Celsius, Theme::Light);
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.html");
        let entries = vec![entry("Paris", "first entry")];

        export_journal(&path, &entries, TemperatureUnit::Fahrenheit, Theme::Dark).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("first entry"));
        assert!(written.contains("65°F"));
    }
}
