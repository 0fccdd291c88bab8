use std::io::{BufRead, Write};

use crate::error::{RegressionError, Result};

/// Prints `question` and reads one trimmed line back.
pub fn ask(question: &str, mut input: impl BufRead, mut output: impl Write) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(RegressionError::input("no answer given"));
    }

    Ok(line.trim().to_string())
}

pub fn parse_iterations(input: &str) -> Result<usize> {
    let iterations: i64 = input
        .trim()
        .parse()
        .map_err(|e| RegressionError::input(format!("invalid integer {input:?}: {e}")))?;

    usize::try_from(iterations).map_err(|_| {
        RegressionError::input(format!(
            "invalid integer {iterations}: must be greater or equal to 0"
        ))
    })
}

pub fn parse_mileage(input: &str) -> Result<f64> {
    let mileage: f64 = input
        .trim()
        .parse()
        .map_err(|e| RegressionError::input(format!("invalid mileage {input:?}: {e}")))?;

    if !mileage.is_finite() {
        return Err(RegressionError::input(format!(
            "invalid mileage {input:?}: not a finite number"
        )));
    }

    Ok(mileage)
}
