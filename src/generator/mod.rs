//! Feeds generated alongside the pages.

pub mod rss;
pub mod sitemap;
