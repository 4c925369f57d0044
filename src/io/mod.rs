//! I/O stages around the estimator.
//!
//! - [`PromptSource`] — interactive point entry
//! - [`ExampleSource`], [`JsonFileSource`] — built-in and file-backed datasets
//! - [`TextReport`] — convergence message and fitted coefficients
//! - [`SvgPlot`] — scatter of the samples with the fitted line

mod dataset;
mod plot;
mod prompt;
mod report;

pub use dataset::{example_samples, ExampleSource, JsonFileSource};
pub use plot::{render_svg, SvgPlot};
pub use prompt::PromptSource;
pub use report::{format_report, TextReport};
