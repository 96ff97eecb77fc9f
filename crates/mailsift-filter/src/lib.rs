mod parser;
mod store;

pub use parser::{parse_filter_prompt, PROMPT_HELP};
pub use store::FilterStore;
