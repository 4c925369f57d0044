use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use u_york::io::{ExampleSource, JsonFileSource, PromptSource, SvgPlot, TextReport};
use u_york::pipeline::{Pipeline, SampleSource};
use u_york::york::{FitOptions, InitialSlope, YorkRegression};
use u_york::YorkResult;

/// Fit Y = B*x + A with the "New" York regression.
#[derive(Debug, Parser)]
#[command(name = "u-york", version)]
struct Cli {
    /// Use the built-in ten-point example instead of prompting.
    #[arg(long, conflicts_with = "data")]
    demo: bool,
    /// JSON file with `x`, `y` and optional `weights_x`, `weights_y`.
    #[arg(long)]
    data: Option<PathBuf>,
    /// JSON file with fit options; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Correlation between X and Y errors, in [-1, 1].
    #[arg(long, allow_hyphen_values = true)]
    correlation: Option<f64>,
    #[arg(long)]
    max_iterations: Option<usize>,
    #[arg(long)]
    tolerance: Option<f64>,
    /// `zero`, `ols` or a number.
    #[arg(long, allow_hyphen_values = true)]
    initial_slope: Option<InitialSlope>,
    /// Where to write the plot.
    #[arg(long, default_value = "grafica.svg")]
    output: PathBuf,
    #[arg(long)]
    no_plot: bool,
}

impl Cli {
    fn fit_options(&self) -> YorkResult<FitOptions> {
        let mut options = match &self.options {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => FitOptions::default(),
        };
        if let Some(r) = self.correlation {
            options = options.with_correlation(r);
        }
        if let Some(n) = self.max_iterations {
            options = options.with_max_iterations(n);
        }
        if let Some(t) = self.tolerance {
            options = options.with_tolerance(t);
        }
        if let Some(b) = self.initial_slope {
            options = options.with_initial_slope(b);
        }
        Ok(options)
    }

    fn source(&self) -> Box<dyn SampleSource> {
        if self.demo {
            Box::new(ExampleSource)
        } else if let Some(path) = &self.data {
            Box::new(JsonFileSource::new(path))
        } else {
            Box::new(PromptSource::new(io::stdin().lock(), io::stdout()))
        }
    }
}

fn run(cli: &Cli) -> YorkResult<()> {
    let estimator = YorkRegression::new(cli.fit_options()?)?;
    let mut pipeline =
        Pipeline::new(cli.source(), estimator).with_sink(TextReport::new(io::stdout()));
    if !cli.no_plot {
        pipeline = pipeline.with_sink(SvgPlot::new(&cli.output));
    }
    pipeline.run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
