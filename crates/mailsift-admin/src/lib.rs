//! Administration panels: metrics dashboard, pending-action todos,
//! connected mailboxes, and account settings.

mod account;
mod dashboard;
mod error;
mod mailboxes;
mod todos;

pub use account::AccountController;
pub use dashboard::DashboardController;
pub use error::AdminError;
pub use mailboxes::MailboxController;
pub use todos::TodoController;

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;
    use mailsift_api::{ApiError, Backend};
    use mailsift_core::{
        BulkFeedbackOutcome, ConversationQuery, DashboardMetrics, DeepAnalysisSession, EmailDetail,
        EmailIdent, Filter, Mailbox, PromptAnswer, SearchHit, SearchRequest, SearchResponse, Theme,
        TodoItem,
    };
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    /// In-memory backend covering the admin endpoints; the search and
    /// analysis methods return empty defaults.
    #[derive(Default)]
    pub struct StubBackend {
        pub todos: Mutex<Vec<TodoItem>>,
        pub mailboxes: Mutex<Vec<Mailbox>>,
        pub metrics_calls: Mutex<u64>,
        pub password_calls: Mutex<Vec<(String, String)>>,
        next_id: AtomicU64,
    }

    impl StubBackend {
        fn fresh_id(&self, prefix: &str) -> String {
            format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
        }
    }

    #[async_trait]
    impl Backend for StubBackend {
        async fn search(&self, _request: &SearchRequest) -> Result<SearchResponse, ApiError> {
            Ok(SearchResponse::default())
        }

        async fn email_detail(&self, _ident: &EmailIdent) -> Result<EmailDetail, ApiError> {
            Ok(EmailDetail::default())
        }

        async fn feedback(
            &self,
            _query: &str,
            _message_id: &str,
            _is_relevant: bool,
        ) -> Result<(), ApiError> {
            Ok(())
        }

        async fn bulk_feedback(
            &self,
            _query: &str,
            _filter: &Filter,
        ) -> Result<BulkFeedbackOutcome, ApiError> {
            Ok(BulkFeedbackOutcome::default())
        }

        async fn filter_emails(
            &self,
            _query: &str,
            _filter: &Filter,
            _page: u64,
            _results_per_page: u64,
        ) -> Result<Vec<SearchHit>, ApiError> {
            Ok(vec![])
        }

        async fn analyze_themes(&self, _email_ids: &[String]) -> Result<Vec<Theme>, ApiError> {
            Ok(vec![])
        }

        async fn conversation_emails(
            &self,
            _query: &ConversationQuery,
        ) -> Result<SearchResponse, ApiError> {
            Ok(SearchResponse::default())
        }

        async fn deep_analysis_init(
            &self,
            _theme_ids: &[String],
        ) -> Result<DeepAnalysisSession, ApiError> {
            Ok(DeepAnalysisSession {
                session_id: String::new(),
                emails: vec![],
            })
        }

        async fn deep_analysis_prompt(
            &self,
            _session_id: &str,
            _prompt: &str,
        ) -> Result<PromptAnswer, ApiError> {
            Ok(PromptAnswer::default())
        }

        async fn deep_analysis_reset(&self, _session_id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
            *self.metrics_calls.lock().unwrap() += 1;
            Ok(DashboardMetrics {
                total_emails: 120,
                total_mailboxes: 2,
                todos_pending: 3,
                todos_done: 5,
            })
        }

        async fn list_todos(&self) -> Result<Vec<TodoItem>, ApiError> {
            Ok(self.todos.lock().unwrap().clone())
        }

        async fn create_todo(
            &self,
            title: &str,
            message_id: Option<&str>,
        ) -> Result<TodoItem, ApiError> {
            let item = TodoItem {
                id: self.fresh_id("todo"),
                title: title.to_string(),
                done: false,
                message_id: message_id.map(str::to_string),
            };
            self.todos.lock().unwrap().push(item.clone());
            Ok(item)
        }

        async fn update_todo(&self, todo: &TodoItem) -> Result<TodoItem, ApiError> {
            let mut todos = self.todos.lock().unwrap();
            match todos.iter_mut().find(|item| item.id == todo.id) {
                Some(item) => {
                    *item = todo.clone();
                    Ok(todo.clone())
                }
                None => Err(ApiError::Backend("todo not found".to_string())),
            }
        }

        async fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
            self.todos.lock().unwrap().retain(|item| item.id != id);
            Ok(())
        }

        async fn list_mailboxes(&self) -> Result<Vec<Mailbox>, ApiError> {
            Ok(self.mailboxes.lock().unwrap().clone())
        }

        async fn create_mailbox(&self, address: &str, provider: &str) -> Result<Mailbox, ApiError> {
            let mailbox = Mailbox {
                id: self.fresh_id("mb"),
                address: address.to_string(),
                provider: provider.to_string(),
                active: true,
            };
            self.mailboxes.lock().unwrap().push(mailbox.clone());
            Ok(mailbox)
        }

        async fn delete_mailbox(&self, id: &str) -> Result<(), ApiError> {
            self.mailboxes
                .lock()
                .unwrap()
                .retain(|mailbox| mailbox.id != id);
            Ok(())
        }

        async fn change_password(&self, current: &str, new: &str) -> Result<(), ApiError> {
            self.password_calls
                .lock()
                .unwrap()
                .push((current.to_string(), new.to_string()));
            Ok(())
        }
    }
}
