//! Crawler module for same-site page discovery
//!
//! This module contains the frontier crawler:
//! - Anchor extraction and resolution
//! - Breadth-first discovery with a page cap and an optional stop flag

mod frontier;
mod links;

pub use frontier::{discover, CrawlState};
pub use links::extract_links;
