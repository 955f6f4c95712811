//! Pipeline module - the discretization engine, its steps and strategies

pub mod algorithm;
pub mod binning;
pub mod context;
pub mod dataset;
pub mod discretizer;
pub mod error;
pub mod iterative;
pub mod loader;
pub mod params;
pub mod recursive;
pub mod stats;
pub mod steps;
pub mod strategies;
pub mod value;

pub use algorithm::*;
pub use binning::*;
pub use context::*;
pub use dataset::*;
pub use discretizer::*;
pub use error::*;
pub use iterative::*;
pub use loader::*;
pub use params::{ParamValue, Parameters, DEFAULT_MAX_DEPTH, DEFAULT_NUM_BINS};
pub use recursive::*;
pub use steps::*;
pub use strategies::*;
pub use value::*;
