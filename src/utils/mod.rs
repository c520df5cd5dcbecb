//! Utility modules for the site builder.

pub mod category;
pub mod date;
pub mod minify;
