//! HTML rendering.
//!
//! - [`fragment`]: per-record template runs with entrance stamping
//! - [`templates`]: cards, sidebars, articles
//! - [`layout`]: the page shell

pub mod fragment;
pub mod html;
pub mod layout;
pub mod templates;

pub use fragment::{Fragment, Markup, Mode, Stamp, render, render_view};
pub use layout::{NavItem, Page, shell};
