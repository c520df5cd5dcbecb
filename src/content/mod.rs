//! Site content: records, loading and querying.
//!
//! ```text
//! data/*.json ──► store::load ──► ContentStores ──► query::select_view ──► View
//! ```

pub mod query;
pub mod store;
pub mod types;

pub use query::{Filter, PageMode, View, ViewState, select_view};
pub use store::ContentStores;
pub use types::{Doc, Post, Project, Record};
