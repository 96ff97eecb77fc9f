use crate::text::terms_key;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel the backend sends when a result has no usable display index.
pub const INDEX_SENTINEL: &str = "N/A";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterAction {
    Add,
    Remove,
}

/// A client-held add/remove term rule narrowing a search, applied server-side.
///
/// Never mutated in place: filters are created whole by the prompt parser and
/// removed whole from the store. Duplicates are allowed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Filter {
    pub action: FilterAction,
    pub terms: Vec<String>,
}

impl Filter {
    pub fn new(action: FilterAction, terms: Vec<String>) -> Self {
        Self { action, terms }
    }

    /// The key the server uses in `filter_counts`: terms joined by `,`,
    /// then lowercased. No accent folding.
    pub fn terms_key(&self) -> String {
        terms_key(&self.terms)
    }
}

/// Per-filter match counts returned with every search response, keyed by
/// [`Filter::terms_key`]. Missing keys read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCounts {
    #[serde(default)]
    pub remove: BTreeMap<String, u64>,
    #[serde(default)]
    pub add: BTreeMap<String, u64>,
}

impl FilterCounts {
    pub fn for_action(&self, action: FilterAction) -> &BTreeMap<String, u64> {
        match action {
            FilterAction::Add => &self.add,
            FilterAction::Remove => &self.remove,
        }
    }
}

/// Identifier used to fetch a single email: the opaque display index when the
/// backend provided one, otherwise the message id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailIdent {
    Index(String),
    MessageId(String),
}

impl EmailIdent {
    pub fn from_parts(index: Option<&str>, message_id: &str) -> Self {
        match index {
            Some(idx) if !idx.is_empty() && idx != INDEX_SENTINEL => {
                Self::Index(idx.to_string())
            }
            _ => Self::MessageId(message_id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Index(value) | Self::MessageId(value) => value,
        }
    }
}

/// One row of a search response. Ephemeral: superseded entirely by the next
/// response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub relevant_terms: Vec<String>,
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub explanation: String,
}

impl SearchHit {
    pub fn ident(&self) -> EmailIdent {
        EmailIdent::from_parts(self.index.as_deref(), &self.message_id)
    }
}

/// Body of `POST /api/search`. Field names follow the backend's wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub min_relevance: u8,
    pub page: u64,
    pub results_per_page: u64,
    pub clear_cache: bool,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default, rename = "totalResults")]
    pub total_results: u64,
    #[serde(default)]
    pub filter_counts: FilterCounts,
}

/// Identifier fields mirrored into theme and deep-analysis payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRef {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub date: String,
}

impl EmailRef {
    pub fn ident(&self) -> EmailIdent {
        EmailIdent::from_parts(self.index.as_deref(), &self.message_id)
    }
}

/// A backend-computed cluster of emails around a topic. The summary arrives
/// in one of three shapes (string, list, structured object); normalization
/// happens at render time.
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub theme_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub summary: serde_json::Value,
    #[serde(default)]
    pub emails: Vec<EmailRef>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
}

/// Stateful multi-turn Q&A context scoped to a chosen set of themes.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepAnalysisSession {
    pub session_id: String,
    #[serde(default, alias = "email_data")]
    pub emails: Vec<EmailRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptAnswer {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

/// Full single-email record, fetched on demand and never cached.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailDetail {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub attachments_content: String,
}

impl EmailDetail {
    pub fn ident(&self) -> EmailIdent {
        EmailIdent::from_parts(self.index.as_deref(), &self.message_id)
    }
}

/// From/to/date-ranged conversation selection.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationQuery {
    pub email1: String,
    pub email2: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkFeedbackOutcome {
    #[serde(default)]
    pub affected_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub total_emails: u64,
    #[serde(default)]
    pub total_mailboxes: u64,
    #[serde(default)]
    pub todos_pending: u64,
    #[serde(default)]
    pub todos_done: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mailbox {
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub active: bool,
}
