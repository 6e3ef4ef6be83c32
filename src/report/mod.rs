//! Report module - summarizing preparation results

pub mod summary;

pub use summary::*;
