//! The client application: a single page that talks to the JSON API.
//!
//! The page skeleton, the form's closed category and spender lists and the
//! chart template are rendered here; `static/app.js` fetches the expenses and
//! summary and keeps the page up to date.

mod catalogue;
mod chart;
mod page;

pub use catalogue::{Catalogue, DEFAULT_SPENDERS};
pub use page::get_client_page;

#[cfg(test)]
pub use page::ClientState;
