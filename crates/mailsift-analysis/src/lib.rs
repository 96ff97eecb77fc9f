mod conversation;
mod deep;
mod error;
mod references;
mod summary;
mod themes;

pub use conversation::ConversationController;
pub use deep::{AnswerView, DeepAnalysisController};
pub use error::AnalysisError;
pub use references::find_references;
pub use summary::{normalize_summary, SummaryView};
pub use themes::{ThemeCard, ThemesController};
