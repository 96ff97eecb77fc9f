use mailsift_core::{FilterAction, PageInfo, SearchHit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Results,
    Empty,
    Failed,
}

/// One rendered filter list item: action label, term text, and the server's
/// match count for its drill-down link.
#[derive(Debug, Clone)]
pub struct FilterView {
    pub action: FilterAction,
    pub terms: Vec<String>,
    pub count: u64,
}

impl FilterView {
    pub fn action_label(&self) -> &'static str {
        match self.action {
            FilterAction::Add => "Añadir",
            FilterAction::Remove => "Eliminar",
        }
    }
}

/// Snapshot the shell renders after every controller call.
#[derive(Debug, Clone)]
pub struct SearchView {
    pub phase: SearchPhase,
    pub banner: Option<String>,
    pub rows: Vec<SearchHit>,
    pub page: PageInfo,
    pub filters: Vec<FilterView>,
    pub theme_button_visible: bool,
}
