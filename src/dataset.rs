use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{RegressionError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub mileage: f64,
    pub price: f64,
}

impl Sample {
    pub fn new(mileage: f64, price: f64) -> Self {
        Self { mileage, price }
    }
}

pub fn mileages(samples: &[Sample]) -> impl Iterator<Item = f64> + Clone + '_ {
    samples.iter().map(|s| s.mileage)
}

pub fn prices(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| s.price).collect()
}

fn parse_field(field: Option<&str>, column: &str, row: usize) -> Result<f64> {
    let field = field.ok_or_else(|| {
        RegressionError::input(format!("row {row}: missing {column} column"))
    })?;

    let value = field.parse::<f64>().map_err(|e| {
        RegressionError::input(format!("row {row}: invalid {column} {field:?}: {e}"))
    })?;

    if !value.is_finite() {
        return Err(RegressionError::input(format!(
            "row {row}: invalid {column} {field:?}: not a finite number"
        )));
    }

    Ok(value)
}

/// Reads `(mileage, price)` pairs from a headed, comma separated table.
///
/// Columns are positional, the header row is skipped but not validated.
/// Fields past the second are ignored.
pub fn read_samples(reader: impl Read) -> Result<Vec<Sample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let mileage = parse_field(record.get(0), "mileage", row)?;
        let price = parse_field(record.get(1), "price", row)?;

        samples.push(Sample::new(mileage, price));
    }

    if samples.is_empty() {
        return Err(RegressionError::input("no data"));
    }

    Ok(samples)
}

pub fn read_samples_from_path(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let file = File::open(path)?;

    read_samples(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_after_header() {
        let data = "km,price\n240000,3650\n139800, 3800\n";

        let samples = read_samples(data.as_bytes()).unwrap();

        assert_eq!(
            samples,
            vec![Sample::new(240000., 3650.), Sample::new(139800., 3800.)]
        );
    }

    #[test]
    fn header_only_is_rejected() {
        let err = read_samples("km,price\n".as_bytes()).unwrap_err();

        assert!(matches!(err, RegressionError::Input(ref msg) if msg == "no data"));
    }

    #[test]
    fn malformed_number_names_the_row() {
        let err = read_samples("km,price\n1,2\nabc,4\n".as_bytes()).unwrap_err();

        match err {
            RegressionError::Input(msg) => assert!(msg.starts_with("row 2"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let rows = [
            "km,price\n0,NaN\n10,25\n",
            "km,price\n0,5\n20,inf\n",
            "km,price\nNaN,5\n",
            "km,price\n10,5\n-inf,7\n",
        ];

        for data in rows {
            let err = read_samples(data.as_bytes()).unwrap_err();

            match err {
                RegressionError::Input(msg) => assert!(msg.contains("not a finite number"), "{msg}"),
                other => panic!("{data:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let samples = read_samples("km,price,color\n10,20,red\n30,40\n".as_bytes()).unwrap();

        assert_eq!(samples, vec![Sample::new(10., 20.), Sample::new(30., 40.)]);
    }

    #[test]
    fn short_row_is_rejected() {
        let err = read_samples("km,price\n10\n".as_bytes()).unwrap_err();

        assert!(matches!(err, RegressionError::Input(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_samples_from_path("definitely/not/here.csv").unwrap_err();

        assert!(matches!(err, RegressionError::Io(_)));
    }
}
