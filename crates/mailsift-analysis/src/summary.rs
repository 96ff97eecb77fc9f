//! Theme summaries arrive in one of three shapes: a structured object, a
//! list, or a delimited string. All three normalize into a bullet list; a
//! single undelimited string falls back to a one-line paragraph.

use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    Bullets(Vec<String>),
    Paragraph(String),
}

pub fn normalize_summary(value: &Value) -> SummaryView {
    match value {
        Value::Array(items) => SummaryView::Bullets(
            items.iter().map(render_item).filter(|s| !s.is_empty()).collect(),
        ),
        Value::Object(map) => {
            // Structured summaries carry their bullet list under a known key;
            // anything else flattens to "key: value" lines.
            for key in ["points", "key_points", "bullets", "items"] {
                if let Some(Value::Array(items)) = map.get(key) {
                    return SummaryView::Bullets(
                        items.iter().map(render_item).filter(|s| !s.is_empty()).collect(),
                    );
                }
            }
            debug!(keys = ?map.keys().collect::<Vec<_>>(), "summary object has no point list, flattening");
            SummaryView::Bullets(
                map.iter()
                    .map(|(key, item)| format!("{key}: {}", render_item(item)))
                    .collect(),
            )
        }
        Value::String(text) => normalize_text(text),
        Value::Null => SummaryView::Paragraph(String::new()),
        other => {
            debug!(%other, "unexpected summary payload shape");
            SummaryView::Paragraph(other.to_string())
        }
    }
}

fn normalize_text(text: &str) -> SummaryView {
    let pieces: Vec<String> = text
        .split(['\n', '•', ';'])
        .map(|piece| piece.trim().trim_start_matches('-').trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect();
    match pieces.len() {
        0 => SummaryView::Paragraph(String::new()),
        1 => SummaryView::Paragraph(pieces.into_iter().next().unwrap_or_default()),
        _ => SummaryView::Bullets(pieces),
    }
}

fn render_item(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}
