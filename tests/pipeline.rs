use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

use u_york::io::{
    example_samples, ExampleSource, JsonFileSource, PromptSource, SvgPlot, TextReport,
};
use u_york::pipeline::{Pipeline, Samples};
use u_york::york::{FitOptions, YorkRegression};
use u_york::YorkError;

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

#[test]
fn example_dataset_end_to_end() {
    let out = SharedBuf::default();
    let plot = std::env::temp_dir().join(format!("u_york_it_{}.svg", std::process::id()));
    let mut pipeline = Pipeline::new(ExampleSource, YorkRegression::default())
        .with_sink(TextReport::new(out.clone()))
        .with_sink(SvgPlot::new(&plot));
    let (samples, fit) = pipeline.run().expect("should run");

    assert_eq!(samples, example_samples());
    assert!(fit.converged);
    assert!((fit.slope + 0.545561).abs() < 1e-5, "b = {}", fit.slope);
    assert!((fit.intercept - 5.784044).abs() < 1e-5, "a = {}", fit.intercept);

    let text = out.text();
    assert!(text.starts_with("The algorithm converged for the model Y = B*x + A.\n"));
    assert!(text.contains(&format!("A = {} | B = {}", fit.intercept, fit.slope)));

    let svg = fs::read_to_string(&plot).expect("plot written");
    fs::remove_file(&plot).ok();
    assert_eq!(svg.matches("<circle").count(), samples.len() + 1);
}

#[test]
fn budget_exhaustion_is_reported_not_failed() {
    let out = SharedBuf::default();
    let estimator = YorkRegression::new(FitOptions::default().with_max_iterations(1)).unwrap();
    let mut pipeline =
        Pipeline::new(ExampleSource, estimator).with_sink(TextReport::new(out.clone()));
    let (_, fit) = pipeline.run().expect("should run");
    assert!(!fit.converged);
    assert!(out.text().starts_with("The algorithm did not converge.\n"));
}

#[test]
fn prompted_points_are_fitted() {
    let input = "3\n0\n1\n1\n3\n2\n5\n";
    let mut prompts = Vec::new();
    let source = PromptSource::new(input.as_bytes(), &mut prompts);
    let (samples, fit) = Pipeline::new(source, YorkRegression::default())
        .run()
        .expect("should run");
    assert_eq!(samples.x, vec![0.0, 1.0, 2.0]);
    assert!((fit.slope - 2.0).abs() < 1e-10);
    assert!((fit.intercept - 1.0).abs() < 1e-10);
}

#[test]
fn weighted_json_dataset() {
    let path = std::env::temp_dir().join(format!("u_york_it_{}.json", std::process::id()));
    let samples = Samples::new(vec![1.0, 3.0], vec![2.0, 8.0])
        .with_weights(vec![5.0, 1.0], vec![1.0, 9.0]);
    fs::write(&path, serde_json::to_string(&samples).unwrap()).unwrap();
    let result = Pipeline::new(JsonFileSource::new(&path), YorkRegression::default()).run();
    fs::remove_file(&path).ok();
    let (_, fit) = result.expect("should run");
    assert!((fit.slope - 3.0).abs() < 1e-12);
    assert!((fit.intercept + 1.0).abs() < 1e-12);
}

#[test]
fn single_prompted_point_is_invalid() {
    let source = PromptSource::new("1\n4\n2\n".as_bytes(), Vec::new());
    let err = Pipeline::new(source, YorkRegression::default())
        .run()
        .unwrap_err();
    assert!(matches!(err, YorkError::InvalidInput(_)), "{err:?}");
}
