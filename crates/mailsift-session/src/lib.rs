mod error;
mod store;

pub use error::SessionError;
pub use store::{
    get_json, set_json, FileStore, MemoryStore, SessionStore, FILTERS_KEY, ORIGINAL_QUERY_KEY,
};
