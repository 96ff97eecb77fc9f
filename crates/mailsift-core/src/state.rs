use crate::model::{EmailRef, Theme};
use std::sync::RwLock;

/// Typed shared state between sibling controllers: the emails of the latest
/// search and the themes of the latest analysis. Replaces ad hoc setter
/// callbacks with explicit read/write methods.
///
/// Locks are only held for the duration of a copy, never across an await.
#[derive(Debug, Default)]
pub struct SharedSelection {
    current_emails: RwLock<Vec<EmailRef>>,
    current_themes: RwLock<Vec<Theme>>,
}

impl SharedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_emails(&self, emails: Vec<EmailRef>) {
        if let Ok(mut guard) = self.current_emails.write() {
            *guard = emails;
        }
    }

    pub fn emails(&self) -> Vec<EmailRef> {
        self.current_emails
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn set_themes(&self, themes: Vec<Theme>) {
        if let Ok(mut guard) = self.current_themes.write() {
            *guard = themes;
        }
    }

    pub fn clear_themes(&self) {
        self.set_themes(Vec::new());
    }

    pub fn themes(&self) -> Vec<Theme> {
        self.current_themes
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_round_trips_emails() {
        let selection = SharedSelection::new();
        assert!(selection.emails().is_empty());
        selection.set_emails(vec![EmailRef {
            message_id: "m1".to_string(),
            ..Default::default()
        }]);
        assert_eq!(selection.emails().len(), 1);
    }

    #[test]
    fn clearing_themes_empties_the_list() {
        let selection = SharedSelection::new();
        selection.set_themes(vec![Theme {
            theme_id: "t1".to_string(),
            title: String::new(),
            status: String::new(),
            summary: serde_json::Value::Null,
            emails: vec![],
            similarity_score: None,
        }]);
        assert_eq!(selection.themes().len(), 1);
        selection.clear_themes();
        assert!(selection.themes().is_empty());
    }
}
