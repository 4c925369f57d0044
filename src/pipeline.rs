//! Read → fit → report → plot pipeline.
//!
//! The estimator in [`crate::york`] knows nothing about where samples come
//! from or where results go. Input stages implement [`SampleSource`], output
//! stages implement [`FitSink`], and [`Pipeline`] wires them around a
//! [`YorkRegression`].
//!
//! # Examples
//!
//! ```
//! use u_york::pipeline::{Pipeline, Samples};
//! use u_york::york::YorkRegression;
//!
//! let samples = Samples::new(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]);
//! let mut pipeline = Pipeline::new(samples, YorkRegression::default());
//! let (_, fit) = pipeline.run().unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-10);
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::YorkResult;
use crate::york::{YorkFit, YorkRegression};

/// Paired measurements with optional per-point inverse-variance weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Samples {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights_x: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights_y: Option<Vec<f64>>,
}

impl Samples {
    /// Unweighted samples.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            weights_x: None,
            weights_y: None,
        }
    }

    /// Attaches per-point X and Y weights.
    pub fn with_weights(mut self, weights_x: Vec<f64>, weights_y: Vec<f64>) -> Self {
        self.weights_x = Some(weights_x);
        self.weights_y = Some(weights_y);
        self
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` when there are no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Runs `estimator` on these samples.
    pub fn fit(&self, estimator: &YorkRegression) -> YorkResult<YorkFit> {
        estimator.fit_weighted(
            &self.x,
            &self.y,
            self.weights_x.as_deref(),
            self.weights_y.as_deref(),
        )
    }
}

/// Produces the samples to fit.
pub trait SampleSource {
    fn samples(&mut self) -> YorkResult<Samples>;
}

impl SampleSource for Samples {
    fn samples(&mut self) -> YorkResult<Samples> {
        Ok(self.clone())
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn samples(&mut self) -> YorkResult<Samples> {
        (**self).samples()
    }
}

/// Consumes a finished fit together with the samples it came from.
pub trait FitSink {
    fn consume(&mut self, samples: &Samples, fit: &YorkFit) -> YorkResult<()>;
}

/// Source, estimator and an ordered list of sinks.
pub struct Pipeline<S> {
    source: S,
    estimator: YorkRegression,
    sinks: Vec<Box<dyn FitSink>>,
}

impl<S: SampleSource> Pipeline<S> {
    /// Pipeline with no sinks.
    pub fn new(source: S, estimator: YorkRegression) -> Self {
        Self {
            source,
            estimator,
            sinks: Vec::new(),
        }
    }

    /// Appends a sink; sinks run in insertion order.
    pub fn with_sink(mut self, sink: impl FitSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Reads the samples, fits them and hands the result to every sink.
    ///
    /// The first failing stage aborts the run; later sinks are not called.
    pub fn run(&mut self) -> YorkResult<(Samples, YorkFit)> {
        let samples = self.source.samples()?;
        info!("fitting {} points", samples.len());
        let fit = samples.fit(&self.estimator)?;
        for sink in &mut self.sinks {
            sink.consume(&samples, &fit)?;
        }
        Ok((samples, fit))
    }
}
