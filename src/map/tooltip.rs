use serde::Serialize;

/// One `label: value` row of a tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipEntry {
    pub label: String,
    pub value: String,
}

/// Structured hover content of a feature. Markup is produced separately by `to_html`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tooltip {
    pub entries: Vec<TooltipEntry>,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, label: &str, value: impl Into<String>) -> Self {
        self.entries.push(TooltipEntry {
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }

    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} : {}", escape_html(&entry.label), escape_html(&entry.value)))
            .collect::<Vec<String>>()
            .join("<br>")
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
