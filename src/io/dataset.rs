//! Built-in example dataset and JSON sample files.

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::error::YorkResult;
use crate::pipeline::{SampleSource, Samples};

/// Ten-point test dataset from Mahon (1996), unit weights.
pub fn example_samples() -> Samples {
    Samples::new(
        vec![0.0, 0.9, 1.8, 2.6, 3.3, 4.4, 5.2, 6.1, 6.5, 7.4],
        vec![5.9, 5.4, 4.4, 4.6, 3.5, 3.7, 2.8, 2.8, 2.4, 1.5],
    )
}

/// Yields [`example_samples`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleSource;

impl SampleSource for ExampleSource {
    fn samples(&mut self) -> YorkResult<Samples> {
        Ok(example_samples())
    }
}

/// Reads [`Samples`] from a JSON file:
///
/// ```text
/// {"x": [..], "y": [..], "weights_x": [..], "weights_y": [..]}
/// ```
///
/// The weight arrays are optional.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SampleSource for JsonFileSource {
    fn samples(&mut self) -> YorkResult<Samples> {
        debug!("reading samples from {}", self.path.display());
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
