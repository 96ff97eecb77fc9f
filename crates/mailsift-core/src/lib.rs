mod debounce;
mod model;
mod page;
mod state;
pub mod text;

pub use debounce::Debouncer;
pub use model::{
    BulkFeedbackOutcome, ConversationQuery, DashboardMetrics, DeepAnalysisSession, EmailDetail,
    EmailIdent, EmailRef, Filter, FilterAction, FilterCounts, Mailbox, PromptAnswer, SearchHit,
    SearchRequest, SearchResponse, Theme, TodoItem,
};
pub use page::{clamp_relevance, total_pages, PageInfo};
pub use state::SharedSelection;
