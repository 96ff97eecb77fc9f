use crate::{find_references, AnalysisError};
use mailsift_api::Backend;
use mailsift_core::{EmailRef, PromptAnswer};
use std::sync::Arc;

/// A deep-analysis answer with the reasoning's embedded message ids already
/// extracted for linking.
#[derive(Debug, Clone)]
pub struct AnswerView {
    pub answer: PromptAnswer,
    pub linked_ids: Vec<String>,
}

/// Multi-turn Q&A over a chosen set of themes. Holds at most one live
/// backend session; `reset` always forgets the local session id, even when
/// the backend call fails.
pub struct DeepAnalysisController<B> {
    backend: Arc<B>,
    session_id: Option<String>,
    emails: Vec<EmailRef>,
}

impl<B: Backend> DeepAnalysisController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            session_id: None,
            emails: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Emails in scope for the active session.
    pub fn emails(&self) -> &[EmailRef] {
        &self.emails
    }

    pub async fn init(&mut self, theme_ids: &[String]) -> Result<&[EmailRef], AnalysisError> {
        if theme_ids.is_empty() {
            return Err(AnalysisError::Validation(
                "Selecciona al menos un tema.".to_string(),
            ));
        }
        let session = self.backend.deep_analysis_init(theme_ids).await?;
        self.session_id = Some(session.session_id);
        self.emails = session.emails;
        Ok(&self.emails)
    }

    pub async fn prompt(&mut self, text: &str) -> Result<AnswerView, AnalysisError> {
        let session_id = self.session_id.as_deref().ok_or(AnalysisError::NoSession)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::Validation(
                "Escribe una pregunta.".to_string(),
            ));
        }
        let answer = self.backend.deep_analysis_prompt(session_id, trimmed).await?;
        let linked_ids = find_references(&answer.reasoning);
        Ok(AnswerView { answer, linked_ids })
    }

    pub async fn reset(&mut self) -> Result<(), AnalysisError> {
        let Some(session_id) = self.session_id.take() else {
            return Err(AnalysisError::NoSession);
        };
        self.emails.clear();
        self.backend.deep_analysis_reset(&session_id).await?;
        Ok(())
    }
}
