use crate::AnalysisError;
use mailsift_api::Backend;
use mailsift_core::{ConversationQuery, SearchHit};
use std::sync::Arc;

pub struct ConversationController<B> {
    backend: Arc<B>,
}

impl<B: Backend> ConversationController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Fetch the mail exchanged between two addresses in a date range.
    /// Validation failures stay local; no request is made.
    pub async fn fetch(
        &mut self,
        query: &ConversationQuery,
    ) -> Result<(Vec<SearchHit>, u64), AnalysisError> {
        if query.email1.trim().is_empty() || query.email2.trim().is_empty() {
            return Err(AnalysisError::Validation(
                "Introduce las dos direcciones de correo.".to_string(),
            ));
        }
        if query.end_date < query.start_date {
            return Err(AnalysisError::Validation(
                "La fecha final no puede ser anterior a la inicial.".to_string(),
            ));
        }
        let response = self.backend.conversation_emails(query).await?;
        Ok((response.results, response.total_results))
    }
}
