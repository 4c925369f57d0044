//! Interactive point entry.

use std::io::{BufRead, Write};

use crate::error::{YorkError, YorkResult};
use crate::pipeline::{SampleSource, Samples};

/// Prompts for a point count and then each `x`/`y` value in turn.
pub struct PromptSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, prompt: &str) -> YorkResult<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(YorkError::parse(format!(
                "unexpected end of input at {prompt:?}"
            )));
        }
        Ok(line.trim().to_string())
    }

    fn ask_value(&mut self, prompt: &str) -> YorkResult<f64> {
        let answer = self.ask(prompt)?;
        let value: f64 = answer
            .parse()
            .map_err(|e| YorkError::parse(format!("{prompt}{answer:?}: {e}")))?;
        if !value.is_finite() {
            return Err(YorkError::parse(format!("{prompt}{answer:?} is not finite")));
        }
        Ok(value)
    }
}

impl<R: BufRead, W: Write> SampleSource for PromptSource<R, W> {
    fn samples(&mut self) -> YorkResult<Samples> {
        let answer = self.ask("How many points will you enter? ")?;
        let n: usize = answer
            .parse()
            .map_err(|e| YorkError::parse(format!("point count {answer:?}: {e}")))?;

        // The count is untrusted; grow as values actually arrive.
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 1..=n {
            x.push(self.ask_value(&format!("x{i}: "))?);
            y.push(self.ask_value(&format!("y{i}: "))?);
        }
        Ok(Samples::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> (YorkResult<Samples>, String) {
        let mut out = Vec::new();
        let result = PromptSource::new(input.as_bytes(), &mut out).samples();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn reads_pairs_in_order() {
        let (s, prompts) = read("2\n1.5\n2\n-3\n4e1\n");
        let s = s.unwrap();
        assert_eq!(s.x, vec![1.5, -3.0]);
        assert_eq!(s.y, vec![2.0, 40.0]);
        assert_eq!(prompts, "How many points will you enter? x1: y1: x2: y2: ");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let (s, _) = read(" 1 \n  0.5\t\n 7 \n");
        let s = s.unwrap();
        assert_eq!(s.x, vec![0.5]);
        assert_eq!(s.y, vec![7.0]);
    }

    #[test]
    fn rejects_bad_count_and_values() {
        assert!(matches!(read("two\n").0, Err(YorkError::Parse(_))));
        assert!(matches!(read("1\nabc\n").0, Err(YorkError::Parse(_))));
        assert!(matches!(read("1\ninf\n2\n").0, Err(YorkError::Parse(_))));
    }

    #[test]
    fn huge_count_fails_on_eof_without_allocating() {
        let (result, prompts) = read("18446744073709551615\n1\n2\n");
        assert!(matches!(result, Err(YorkError::Parse(_))), "{result:?}");
        assert!(prompts.ends_with("x2: "), "{prompts}");
    }

    #[test]
    fn early_eof_is_reported() {
        let err = read("3\n1\n2\n").0.unwrap_err();
        assert!(err.to_string().contains("x2"), "{err}");
    }
}
