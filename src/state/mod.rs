//! State module for tracking harvest progress
//!
//! - `UrlState`: where a single URL is in its `Unvisited → Visiting → terminal` lifecycle

mod url_state;

pub use url_state::UrlState;
