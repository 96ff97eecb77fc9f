use crate::ApiError;
use async_trait::async_trait;
use mailsift_core::{
    BulkFeedbackOutcome, ConversationQuery, DashboardMetrics, DeepAnalysisSession, EmailDetail,
    EmailIdent, Filter, Mailbox, PromptAnswer, SearchHit, SearchRequest, SearchResponse, Theme,
    TodoItem,
};

/// Everything the controllers need from the backend, one method per
/// endpoint. Controllers take a `Backend` so tests can substitute stubs.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError>;

    async fn email_detail(&self, ident: &EmailIdent) -> Result<EmailDetail, ApiError>;

    async fn feedback(
        &self,
        query: &str,
        message_id: &str,
        is_relevant: bool,
    ) -> Result<(), ApiError>;

    async fn bulk_feedback(
        &self,
        query: &str,
        filter: &Filter,
    ) -> Result<BulkFeedbackOutcome, ApiError>;

    async fn filter_emails(
        &self,
        query: &str,
        filter: &Filter,
        page: u64,
        results_per_page: u64,
    ) -> Result<Vec<SearchHit>, ApiError>;

    async fn analyze_themes(&self, email_ids: &[String]) -> Result<Vec<Theme>, ApiError>;

    async fn conversation_emails(
        &self,
        query: &ConversationQuery,
    ) -> Result<SearchResponse, ApiError>;

    async fn deep_analysis_init(
        &self,
        theme_ids: &[String],
    ) -> Result<DeepAnalysisSession, ApiError>;

    async fn deep_analysis_prompt(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<PromptAnswer, ApiError>;

    async fn deep_analysis_reset(&self, session_id: &str) -> Result<(), ApiError>;

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError>;

    async fn list_todos(&self) -> Result<Vec<TodoItem>, ApiError>;

    async fn create_todo(
        &self,
        title: &str,
        message_id: Option<&str>,
    ) -> Result<TodoItem, ApiError>;

    async fn update_todo(&self, todo: &TodoItem) -> Result<TodoItem, ApiError>;

    async fn delete_todo(&self, id: &str) -> Result<(), ApiError>;

    async fn list_mailboxes(&self) -> Result<Vec<Mailbox>, ApiError>;

    async fn create_mailbox(&self, address: &str, provider: &str) -> Result<Mailbox, ApiError>;

    async fn delete_mailbox(&self, id: &str) -> Result<(), ApiError>;

    async fn change_password(&self, current: &str, new: &str) -> Result<(), ApiError>;
}
