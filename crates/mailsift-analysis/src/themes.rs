use crate::{normalize_summary, AnalysisError, SummaryView};
use mailsift_api::Backend;
use mailsift_core::{EmailRef, SharedSelection, Theme};
use std::sync::Arc;

/// One theme ready for rendering: normalized summary plus the email table.
#[derive(Debug, Clone)]
pub struct ThemeCard {
    pub theme_id: String,
    pub title: String,
    pub status: String,
    pub summary: SummaryView,
    pub emails: Vec<EmailRef>,
    pub similarity_score: Option<f64>,
}

impl ThemeCard {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            theme_id: theme.theme_id.clone(),
            title: theme.title.clone(),
            status: theme.status.clone(),
            summary: normalize_summary(&theme.summary),
            emails: theme.emails.clone(),
            similarity_score: theme.similarity_score,
        }
    }
}

pub struct ThemesController<B> {
    backend: Arc<B>,
    selection: Arc<SharedSelection>,
}

impl<B: Backend> ThemesController<B> {
    pub fn new(backend: Arc<B>, selection: Arc<SharedSelection>) -> Self {
        Self { backend, selection }
    }

    /// Run theme analysis over the given identifiers. On success the themes
    /// replace the shared selection for the deep-analysis checkbox list; on
    /// failure any previously shown theme state is cleared.
    pub async fn analyze(&mut self, email_ids: &[String]) -> Result<Vec<ThemeCard>, AnalysisError> {
        if email_ids.is_empty() {
            return Err(AnalysisError::Validation(
                "No hay correos seleccionados para el análisis temático.".to_string(),
            ));
        }
        match self.backend.analyze_themes(email_ids).await {
            Ok(themes) => {
                let cards = themes.iter().map(ThemeCard::from_theme).collect();
                self.selection.set_themes(themes);
                Ok(cards)
            }
            Err(err) => {
                self.selection.clear_themes();
                Err(err.into())
            }
        }
    }

    /// Themes currently selectable for a deep-analysis session.
    pub fn current(&self) -> Vec<ThemeCard> {
        self.selection
            .themes()
            .iter()
            .map(ThemeCard::from_theme)
            .collect()
    }
}
