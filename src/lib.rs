//! binlab: Discretization Library
//!
//! A library for turning continuous attributes into labelled bins using
//! composable pipelines of steps: equal-width, equal-frequency and
//! information density (supervised and unsupervised) binning.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
