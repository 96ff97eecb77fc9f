use mailsift_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Validation(String),
}
