mod backend;
mod client;
mod error;

pub use backend::Backend;
pub use client::HttpBackend;
pub use error::ApiError;
