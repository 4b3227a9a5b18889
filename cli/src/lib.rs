use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vectorize::{ConversionOptions, ConversionReport, Converter, VectorizeError, default_output_path};


#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Conversion failed: {0}")]
    Conversion(#[from] VectorizeError),
    #[error("Input bitmap not found: {0}")]
    MissingInput(PathBuf),
    #[error("{0} already exists; pass --force or set overwrite = true to replace it")]
    OutputExists(PathBuf),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}


/// One bitmap-to-DXF conversion, as stored in a job file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConversionJob {
    /// Source bitmap
    pub input: PathBuf,
    /// Target drawing; defaults to `<input stem>.dxf` beside the input
    pub output: Option<PathBuf>,
    /// Replace an existing target
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub options: ConversionOptions,
}

impl ConversionJob {
    pub fn new(input: impl Into<PathBuf>, options: ConversionOptions) -> Self {
        Self {
            input: input.into(),
            output: None,
            overwrite: false,
            options,
        }
    }

    /// Load a job from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a job from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    /// Save the job, picking the format from the extension
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let path_ref = path.as_ref();
        let content = match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml()?,
            Some("json") => self.to_json()?,
            _ => return Err(CliError::UnsupportedFileFormat),
        };
        fs::write(path_ref, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }

    /// Caller-side checks done before any work: input exists, parameters are
    /// in range and the target may be written
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.input.is_file() {
            return Err(CliError::MissingInput(self.input.clone()));
        }
        self.options.validate()?;
        check_overwrite(&self.output_path(), self.overwrite)
    }

    pub fn run(&self) -> Result<ConversionReport, CliError> {
        self.validate()?;
        let converter = Converter::new(self.options.clone())?;
        Ok(converter.convert(&self.input, &self.output_path())?)
    }
}

/// Refuse to replace an existing file unless explicitly allowed
pub fn check_overwrite(path: &Path, overwrite: bool) -> Result<(), CliError> {
    if path.exists() && !overwrite {
        return Err(CliError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

/// Parse a DPI argument: a finite number greater than zero
pub fn parse_dpi(value: &str) -> Result<f64, String> {
    let dpi: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(format!("DPI must be greater than 0, got {value}"));
    }
    Ok(dpi)
}

/// Parse a simplify factor argument: a finite number, zero or above
pub fn parse_simplify_factor(value: &str) -> Result<f64, String> {
    let factor: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !factor.is_finite() || factor < 0.0 {
        return Err(format!("simplify factor must be 0 or greater, got {value}"));
    }
    Ok(factor)
}
