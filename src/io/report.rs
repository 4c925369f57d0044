//! Text summary of a fit.

use std::io::Write;

use crate::error::YorkResult;
use crate::pipeline::{FitSink, Samples};
use crate::york::YorkFit;

/// Convergence message followed by `A = <intercept> | B = <slope>`.
///
/// # Examples
///
/// ```
/// use u_york::io::format_report;
/// use u_york::york::york_regression;
///
/// let fit = york_regression(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// let text = format_report(&fit);
/// assert!(text.starts_with("The algorithm converged"));
/// ```
pub fn format_report(fit: &YorkFit) -> String {
    let status = if fit.converged {
        "The algorithm converged for the model Y = B*x + A."
    } else {
        "The algorithm did not converge."
    };
    format!("{status}\nA = {} | B = {}\n", fit.intercept, fit.slope)
}

/// Writes [`format_report`] to any writer.
pub struct TextReport<W> {
    writer: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FitSink for TextReport<W> {
    fn consume(&mut self, _samples: &Samples, fit: &YorkFit) -> YorkResult<()> {
        self.writer.write_all(format_report(fit).as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(converged: bool) -> YorkFit {
        YorkFit {
            slope: -0.5,
            intercept: 5.25,
            converged,
            iterations: 9,
            x_bar: 1.0,
            y_bar: 4.75,
        }
    }

    #[test]
    fn converged_message() {
        assert_eq!(
            format_report(&fit(true)),
            "The algorithm converged for the model Y = B*x + A.\nA = 5.25 | B = -0.5\n"
        );
    }

    #[test]
    fn non_converged_message() {
        let text = format_report(&fit(false));
        assert!(text.starts_with("The algorithm did not converge.\n"));
        assert!(text.ends_with("A = 5.25 | B = -0.5\n"));
    }

    #[test]
    fn sink_writes_report() {
        let mut sink = TextReport::new(Vec::new());
        sink.consume(&Samples::new(vec![], vec![]), &fit(true)).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, format_report(&fit(true)));
    }
}
