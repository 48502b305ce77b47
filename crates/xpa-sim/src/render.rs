//! Display helpers for assignment tables. Purely presentational.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::simulate::AssignmentTable;

/// Label to display colour mapping handed to the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap {
    entries: BTreeMap<String, String>,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::from_pairs([
            ("red", "red"),
            ("blue", "blue"),
            ("big", "orange"),
            ("small", "black"),
        ])
    }
}

impl ColorMap {
    /// A map with no entries; every cell renders unstyled.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builds a map from `(label, colour)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(label, color)| (label.to_string(), color.to_string()))
                .collect(),
        }
    }

    /// Adds or replaces a mapping.
    pub fn with(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.entries.insert(label.into(), color.into());
        self
    }

    /// Colour for `label`, if mapped.
    pub fn color(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// CSS declaration painting both text and background, or empty.
    pub fn style(&self, label: &str) -> String {
        self.color(label)
            .map(|color| format!("color: {color}; background-color: {color}"))
            .unwrap_or_default()
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders the table as HTML without row headings; mapped label cells are
/// painted in their colour.
pub fn render_html(table: &AssignmentTable, colors: &ColorMap) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"assignments\">\n");
    let _ = writeln!(
        html,
        "  <thead><tr><th>identifier</th><th>{}</th></tr></thead>",
        escape_html(&table.key)
    );
    html.push_str("  <tbody>\n");
    for row in &table.rows {
        let style = colors.style(&row.label);
        let label = escape_html(&row.label);
        let identifier = escape_html(row.identifier.as_str());
        if style.is_empty() {
            let _ = writeln!(html, "    <tr><td>{identifier}</td><td>{label}</td></tr>");
        } else {
            let _ = writeln!(
                html,
                "    <tr><td>{identifier}</td><td style=\"{style}\">{label}</td></tr>"
            );
        }
    }
    html.push_str("  </tbody>\n</table>\n");
    html
}

/// Renders the table as aligned plain text with a colour column.
///
/// Widths are measured in characters, matching how `format!` pads.
pub fn render_text(table: &AssignmentTable, colors: &ColorMap) -> String {
    let id_width = table
        .rows
        .iter()
        .map(|row| row.identifier.as_str().chars().count())
        .chain(std::iter::once("identifier".chars().count()))
        .max()
        .unwrap_or(0);
    let label_width = table
        .rows
        .iter()
        .map(|row| row.label.chars().count())
        .chain(std::iter::once(table.key.chars().count()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<label_width$}  color",
        "identifier", table.key
    );
    for row in &table.rows {
        let color = colors.color(&row.label).unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<label_width$}  {color}",
            row.identifier.as_str(),
            row.label
        );
    }
    out
}
