//! `mscurve` is a small toolkit for loading, transforming, and plotting
//! mass spectrometry (and general xy-curve) data.
//!
//! The [`crate::text`] module parses delimited two-column text files into
//! [`ArrayPair`] coordinate sequences, [`crate::transform`] crops,
//! thresholds, normalizes and scales them, [`crate::shapes`] and
//! [`crate::stats`] provide curve primitives and descriptive statistics,
//! and [`crate::plot`] renders a labeled spectrum chart with peak
//! annotations through [`SpectrumPlotter`].
//!
//! # Usage
//! ```no_run
//! use mscurve::{SpectrumPlot, SpectrumPlotter};
//!
//! # fn main() -> Result<(), mscurve::PlotError> {
//! let mut plotter = SpectrumPlotter::new();
//! let config = SpectrumPlot::builder()
//!     .window(100.0, 1500.0)
//!     .title("sample A")
//!     .integrate(421.0, 423.5)
//!     .save_as("sample_a.png")
//!     .build();
//! let data = plotter.plot_file("sample_a.txt", &config)?;
//! println!("area under 421-423.5: {:?}", data.integral);
//! # Ok(())
//! # }
//! ```
pub mod arrayops;
pub mod plot;
pub mod shapes;
pub mod stats;
pub mod text;
pub mod transform;

#[cfg(test)]
mod test_data;

pub use crate::arrayops::ArrayPair;
pub use crate::plot::{
    find_annotation_peaks, PlotData, PlotError, SpectrumPlot, SpectrumPlotBuilder, SpectrumPlotter,
};
pub use crate::shapes::GaussianShape;
