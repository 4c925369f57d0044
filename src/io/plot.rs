//! SVG scatter plot of the samples with the fitted line overlaid.
//!
//! The axes span the data extent plus a 5% margin. The line is drawn across
//! the full x range and clipped to the plotting area, so a steep fit never
//! stretches the y axis.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::error::{YorkError, YorkResult};
use crate::pipeline::{FitSink, Samples};
use crate::york::YorkFit;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 40.0;
const BOTTOM: f64 = 55.0;
const TICKS: usize = 5;
const MARGIN: f64 = 0.05;

/// Closed interval with a margin on both sides.
#[derive(Debug, Clone, Copy)]
struct Range {
    lo: f64,
    hi: f64,
}

impl Range {
    fn of(values: &[f64]) -> Self {
        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let pad = if hi > lo { (hi - lo) * MARGIN } else { 0.5 };
        Self {
            lo: lo - pad,
            hi: hi + pad,
        }
    }

    fn fraction(&self, v: f64) -> f64 {
        (v - self.lo) / (self.hi - self.lo)
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..TICKS).map(move |k| self.lo + (self.hi - self.lo) * k as f64 / (TICKS - 1) as f64)
    }
}

struct Frame {
    x: Range,
    y: Range,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        LEFT + self.x.fraction(x) * (WIDTH - LEFT - RIGHT)
    }

    fn py(&self, y: f64) -> f64 {
        HEIGHT - BOTTOM - self.y.fraction(y) * (HEIGHT - TOP - BOTTOM)
    }
}

/// Renders the samples and the line `fit.slope · x + fit.intercept` as SVG.
///
/// Fails with [`YorkError::InvalidInput`] when there is nothing to draw.
pub fn render_svg(samples: &Samples, fit: &YorkFit) -> YorkResult<String> {
    if samples.is_empty() || samples.x.len() != samples.y.len() {
        return Err(YorkError::invalid("no paired samples to plot"));
    }
    let frame = Frame {
        x: Range::of(&samples.x),
        y: Range::of(&samples.y),
    };
    let (x0, x1) = (LEFT, WIDTH - RIGHT);
    let (y0, y1) = (TOP, HEIGHT - BOTTOM);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\" font-size=\"12\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n\
         <defs><clipPath id=\"plot-area\"><rect x=\"{x0}\" y=\"{y0}\" width=\"{}\" height=\"{}\"/></clipPath></defs>\n",
        x1 - x0,
        y1 - y0
    );

    svg.push_str(&format!(
        "<text x=\"{}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\">\"New\" York linear regression</text>\n",
        (x0 + x1) / 2.0
    ));
    svg.push_str(&format!(
        "<rect x=\"{x0}\" y=\"{y0}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"black\"/>\n",
        x1 - x0,
        y1 - y0
    ));

    for t in frame.x.ticks() {
        let px = frame.px(t);
        svg.push_str(&format!(
            "<line x1=\"{px:.2}\" y1=\"{y1}\" x2=\"{px:.2}\" y2=\"{}\" stroke=\"black\"/>\
             <text x=\"{px:.2}\" y=\"{}\" text-anchor=\"middle\">{t:.2}</text>\n",
            y1 + 5.0,
            y1 + 20.0
        ));
    }
    for t in frame.y.ticks() {
        let py = frame.py(t);
        svg.push_str(&format!(
            "<line x1=\"{}\" y1=\"{py:.2}\" x2=\"{x0}\" y2=\"{py:.2}\" stroke=\"black\"/>\
             <text x=\"{}\" y=\"{:.2}\" text-anchor=\"end\">{t:.2}</text>\n",
            x0 - 5.0,
            x0 - 8.0,
            py + 4.0
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\">Independent variable</text>\n",
        (x0 + x1) / 2.0,
        HEIGHT - 12.0
    ));
    svg.push_str(&format!(
        "<text x=\"16\" y=\"{0}\" text-anchor=\"middle\" transform=\"rotate(-90 16 {0})\">Dependent variable</text>\n",
        (y0 + y1) / 2.0
    ));

    for (&x, &y) in samples.x.iter().zip(&samples.y) {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"steelblue\"/>\n",
            frame.px(x),
            frame.py(y)
        ));
    }

    let (lx0, lx1) = (frame.x.lo, frame.x.hi);
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"red\" stroke-width=\"2\" clip-path=\"url(#plot-area)\"/>\n",
        frame.px(lx0),
        frame.py(fit.slope * lx0 + fit.intercept),
        frame.px(lx1),
        frame.py(fit.slope * lx1 + fit.intercept)
    ));

    // Legend, lower right.
    let (gx, gy) = (x1 - 160.0, y1 - 48.0);
    svg.push_str(&format!(
        "<rect x=\"{gx}\" y=\"{gy}\" width=\"150\" height=\"40\" fill=\"white\" stroke=\"gray\"/>\n\
         <circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"steelblue\"/><text x=\"{}\" y=\"{}\">Input data</text>\n\
         <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"red\" stroke-width=\"2\"/><text x=\"{}\" y=\"{}\">Regression result</text>\n",
        gx + 15.0,
        gy + 13.0,
        gx + 30.0,
        gy + 17.0,
        gx + 6.0,
        gy + 29.0,
        gx + 24.0,
        gy + 29.0,
        gx + 30.0,
        gy + 33.0
    ));
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Writes [`render_svg`] output to a file.
#[derive(Debug, Clone)]
pub struct SvgPlot {
    path: PathBuf,
}

impl SvgPlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FitSink for SvgPlot {
    fn consume(&mut self, samples: &Samples, fit: &YorkFit) -> YorkResult<()> {
        fs::write(&self.path, render_svg(samples, fit)?)?;
        info!("plot written to {}", self.path.display());
        Ok(())
    }
}
