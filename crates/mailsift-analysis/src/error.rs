use mailsift_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Prompt or reset issued before `init` created a session.
    #[error("no hay una sesión de análisis activa")]
    NoSession,
    #[error("{0}")]
    Validation(String),
}
