//! Concrete binning strategies
//!
//! Equal-width and equal-frequency plug into the iterative driver; the
//! information density criteria plug into the recursive driver.

mod equal_frequency;
mod equal_width;
mod information_density;

pub use equal_frequency::{equal_frequency_cut_points, EqualFrequency};
pub use equal_width::{equal_width_cut_points, EqualWidth};
pub use information_density::{conditional_information_density, DensityMeasure, InformationDensity};
