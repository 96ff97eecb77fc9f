//! HTML fragment rendering for an embedding shell.
//!
//! Every fragment is built from escaped text; server-supplied HTML bodies
//! pass through `ammonia` first. The sanitization is a vetted-library pass,
//! not a trust boundary: fragments are meant for the dashboard's own
//! overlay, not for re-serving to third parties.

mod body;
mod fragments;

pub use body::{looks_like_html, render_body};
pub use fragments::{
    render_email_detail, render_filter_list, render_reasoning, render_result_table,
    render_theme_cards,
};
