//! Persistence of trained models.
//!
//! Two encodings exist side by side: plain `key=value` lines (the default, and
//! what older tools wrote with only `theta0`/`theta1`) and a JSON object with
//! the same keys. Reading sniffs the encoding from the content, writing picks it
//! from the file extension.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, Result};
use crate::model::{Coefficients, Model};
use crate::normalization::NormalizationRange;

const THETA0: &str = "theta0";
const THETA1: &str = "theta1";
const MIN_MILEAGE: &str = "min_mileage";
const MAX_MILEAGE: &str = "max_mileage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    KeyValue,
    Json,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::KeyValue,
        }
    }

    fn sniff(contents: &str) -> Self {
        if contents.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::KeyValue
        }
    }
}

/// Flat record of the persisted scalars, every field optional on the way in.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ModelRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theta0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theta1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_mileage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_mileage: Option<f64>,
}

impl From<&Model> for ModelRecord {
    fn from(model: &Model) -> Self {
        Self {
            theta0: Some(model.theta0()),
            theta1: Some(model.theta1()),
            min_mileage: model.mileage_range.map(|r| r.min()),
            max_mileage: model.mileage_range.map(|r| r.max()),
        }
    }
}

impl TryFrom<ModelRecord> for Model {
    type Error = String;

    fn try_from(record: ModelRecord) -> std::result::Result<Self, Self::Error> {
        let coefficients = Coefficients::new(
            record.theta0.unwrap_or(0.),
            record.theta1.unwrap_or(0.),
        );

        let mileage_range = match (record.min_mileage, record.max_mileage) {
            (None, None) => None,
            (Some(min), Some(max)) => {
                Some(NormalizationRange::new(min, max).map_err(|e| e.to_string())?)
            }
            _ => return Err(format!("{MIN_MILEAGE} and {MAX_MILEAGE} must be given together")),
        };

        Ok(Model::new(coefficients, mileage_range))
    }
}

fn encode_key_value(record: &ModelRecord) -> String {
    [
        (THETA0, record.theta0),
        (THETA1, record.theta1),
        (MIN_MILEAGE, record.min_mileage),
        (MAX_MILEAGE, record.max_mileage),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| format!("{key}={v}\n")))
    .collect()
}

fn decode_key_value(contents: &str) -> std::result::Result<ModelRecord, String> {
    let mut record = ModelRecord::default();

    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| format!("line {}: expected key=value, got {line:?}", i + 1))?;

        let slot = match key.trim() {
            THETA0 => &mut record.theta0,
            THETA1 => &mut record.theta1,
            MIN_MILEAGE => &mut record.min_mileage,
            MAX_MILEAGE => &mut record.max_mileage,
            _ => continue,
        };

        let value = value.trim();
        let parsed = value
            .parse::<f64>()
            .map_err(|e| format!("line {}: invalid value {value:?}: {e}", i + 1))?;

        *slot = Some(parsed);
    }

    Ok(record)
}

pub fn encode(model: &Model, format: ArtifactFormat) -> Result<String> {
    let record = ModelRecord::from(model);

    match format {
        ArtifactFormat::KeyValue => Ok(encode_key_value(&record)),
        ArtifactFormat::Json => {
            // serde_json writes non-finite floats as null, which would read back as 0.
            if !model.theta0().is_finite() || !model.theta1().is_finite() {
                return Err(RegressionError::input(format!(
                    "coefficients ({}, {}) cannot be stored as JSON, lower the learning rate",
                    model.theta0(),
                    model.theta1()
                )));
            }

            let mut json = serde_json::to_string_pretty(&record)
                .map_err(|e| RegressionError::input(e.to_string()))?;
            json.push('\n');

            Ok(json)
        }
    }
}

/// Parses an artifact in either encoding. `path` is only used for error reporting.
pub fn decode(contents: &str, path: &Path) -> Result<Model> {
    let record = match ArtifactFormat::sniff(contents) {
        ArtifactFormat::Json => serde_json::from_str::<ModelRecord>(contents)
            .map_err(|e| RegressionError::model_parse(path, e.to_string()))?,
        ArtifactFormat::KeyValue => decode_key_value(contents)
            .map_err(|reason| RegressionError::model_parse(path, reason))?,
    };

    Model::try_from(record).map_err(|reason| RegressionError::model_parse(path, reason))
}

/// A model artifact on disk.
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
    format: ArtifactFormat,
}

impl ModelStore {
    /// The write encoding follows the extension: `.json` for JSON, anything else for `key=value`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = ArtifactFormat::from_path(&path);

        Self { path, format }
    }

    pub fn format(&self) -> ArtifactFormat {
        self.format
    }

    /// Writes the model, replacing any previous artifact.
    pub fn save(&self, model: &Model) -> Result<()> {
        let contents = encode(model, self.format)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;

        info!("model saved to {}", self.path.display());

        Ok(())
    }

    pub fn load(&self) -> Result<Model> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RegressionError::ModelNotFound(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        let contents = String::from_utf8(bytes)
            .map_err(|e| RegressionError::model_parse(&self.path, e.to_string()))?;

        decode(&contents, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    fn trained_model() -> Model {
        Model::new(
            Coefficients::new(8499.599649933216, -0.0214489635917867),
            Some(NormalizationRange::new(22899., 240000.).unwrap()),
        )
    }

    fn assert_close(a: &Model, b: &Model) {
        assert!((a.theta0() - b.theta0()).abs() < 1e-9);
        assert!((a.theta1() - b.theta1()).abs() < 1e-9);

        match (a.mileage_range, b.mileage_range) {
            (Some(ra), Some(rb)) => {
                assert!((ra.min() - rb.min()).abs() < 1e-9);
                assert!((ra.max() - rb.max()).abs() < 1e-9);
            }
            (None, None) => {}
            other => panic!("range mismatch: {other:?}"),
        }
    }

    #[test]
    fn key_value_round_trip() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.txt"));
        let model = trained_model();

        store.save(&model).unwrap();

        assert_eq!(store.format(), ArtifactFormat::KeyValue);
        assert_close(&store.load().unwrap(), &model);
    }

    #[test]
    fn json_round_trip() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.json"));
        let model = trained_model();

        store.save(&model).unwrap();

        assert_eq!(store.format(), ArtifactFormat::Json);
        assert_close(&store.load().unwrap(), &model);
    }

    #[test]
    fn save_overwrites_previous_model() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("nested").join("model.txt"));

        store.save(&trained_model()).unwrap();
        store.save(&Model::untrained()).unwrap();

        assert_eq!(store.load().unwrap(), Model::untrained());
    }

    #[test]
    fn legacy_two_field_artifact_has_no_range() {
        let contents = "theta0=8499.5996490000\ntheta1=-0.0214489815\n";

        let model = decode(contents, Path::new("model.txt")).unwrap();

        assert_eq!(model.coefficients, Coefficients::new(8499.599649, -0.0214489815));
        assert_eq!(model.mileage_range, None);
    }

    #[test]
    fn missing_thetas_default_to_zero() {
        let model = decode("{}", Path::new("model.json")).unwrap();
        assert_eq!(model, Model::untrained());

        let model = decode("# nothing yet\n\n", Path::new("model.txt")).unwrap();
        assert_eq!(model, Model::untrained());
    }

    #[test]
    fn json_content_is_read_regardless_of_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.txt");
        fs::write(&path, r#"{"theta0": 1.5, "theta1": -2.0}"#).unwrap();

        let model = ModelStore::new(&path).load().unwrap();

        assert_eq!(model.coefficients, Coefficients::new(1.5, -2.));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let model = decode("theta0=1\nversion=3\ntheta1=2\n", Path::new("m")).unwrap();

        assert_eq!(model.coefficients, Coefficients::new(1., 2.));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.txt"));

        let err = store.load().unwrap_err();

        assert!(matches!(err, RegressionError::ModelNotFound(_)));
    }

    #[test]
    fn binary_garbage_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.txt");
        fs::write(&path, b"theta0=\xff\xfe\n").unwrap();

        let err = ModelStore::new(&path).load().unwrap_err();

        assert!(matches!(err, RegressionError::ModelParse { .. }), "{err:?}");
    }

    #[test]
    fn malformed_artifacts_are_parse_errors() {
        let malformed = [
            "theta0=abc\n",
            "theta0 1.0\n",
            "theta0=1\nmin_mileage=10\n",
            "theta0=1\nmin_mileage=10\nmax_mileage=10\n",
            r#"{"theta0": "one"}"#,
            "{ not json",
        ];

        for contents in malformed {
            let err = decode(contents, Path::new("model.txt")).unwrap_err();
            assert!(
                matches!(err, RegressionError::ModelParse { .. }),
                "{contents:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn json_refuses_non_finite_coefficients() {
        let model = Model::new(Coefficients::new(f64::INFINITY, 0.), None);

        assert!(encode(&model, ArtifactFormat::Json).is_err());
        assert!(encode(&model, ArtifactFormat::KeyValue).is_ok());
    }

    #[test]
    fn key_value_encoding_lists_all_four_fields() {
        let encoded = encode(&trained_model(), ArtifactFormat::KeyValue).unwrap();

        let keys: Vec<&str> = encoded
            .lines()
            .filter_map(|l| l.split_once('=').map(|(k, _)| k))
            .collect();

        assert_eq!(keys, vec![THETA0, THETA1, MIN_MILEAGE, MAX_MILEAGE]);
    }
}
