//! Report module - summarizing discretization results

pub mod summary;

pub use summary::*;
