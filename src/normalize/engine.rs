//! Batch orchestration: validate once, then load and normalize file by file.
//!
//! Request-level problems abort before any input is read. Per-file problems
//! are recorded as diagnostics and the batch moves on.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::loader::{load_column, load_signal, LoadError, LoadOptions};
use crate::data::model::Signal;

use super::error::{ParameterError, TransformError};
use super::method::{MethodKind, MethodParams, NormalizationMethod};
use super::transforms;
use super::NormalizationResult;

/// Everything the engine needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationRequest {
    pub method: MethodKind,
    pub params: MethodParams,
    /// Processed in order; a path listed twice is processed once.
    pub inputs: Vec<PathBuf>,
    /// 0-based.
    pub x_column: usize,
    /// 0-based.
    pub y_column: usize,
}

/// Why one input produced no result.
#[derive(Error, Debug)]
pub enum FileFailure {
    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    #[error("normalization failed: {0}")]
    Transform(#[from] TransformError),
}

#[derive(Debug)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub failure: FileFailure,
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.failure)
    }
}

/// Result of a batch: the normalized signals plus one diagnostic per skipped file.
#[derive(Debug)]
pub struct NormalizationOutcome {
    pub method: MethodKind,
    pub result: NormalizationResult,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl NormalizationOutcome {
    pub fn empty(method: MethodKind) -> Self {
        Self {
            method,
            result: NormalizationResult::new(),
            diagnostics: Vec::new(),
        }
    }
}

/// Run a normalization request.
///
/// Fails only when the request itself is unusable; see [`ParameterError`].
pub fn apply(
    request: &NormalizationRequest,
    options: &LoadOptions,
) -> Result<NormalizationOutcome, ParameterError> {
    let prepared = PreparedMethod::prepare(request, options)?;

    log::info!(
        "Applying {} ({:?}) to {} file(s)",
        request.method,
        request.method.signature(),
        request.inputs.len()
    );

    let mut outcome = NormalizationOutcome::empty(request.method);
    let mut seen = BTreeSet::new();

    for path in &request.inputs {
        if !seen.insert(path.as_path()) {
            log::debug!("Skipping duplicate input {}", path.display());
            continue;
        }
        match normalize_file(path, request, &prepared, options) {
            Ok(signal) => {
                outcome.result.insert(path.clone(), signal);
            }
            Err(failure) => {
                log::warn!("Skipping {}: {failure}", path.display());
                outcome.diagnostics.push(FileDiagnostic {
                    path: path.clone(),
                    failure,
                });
            }
        }
    }

    log::info!(
        "{}: {} file(s) normalized, {} skipped",
        request.method,
        outcome.result.len(),
        outcome.diagnostics.len()
    );
    Ok(outcome)
}

fn normalize_file(
    path: &std::path::Path,
    request: &NormalizationRequest,
    prepared: &PreparedMethod,
    options: &LoadOptions,
) -> Result<Signal, FileFailure> {
    let signal = load_signal(path, request.x_column, request.y_column, options)?;
    let y = prepared.run(&signal)?;
    debug_assert_eq!(y.len(), signal.len());
    if y.iter().all(|&v| v == 0.0) {
        log::debug!("{}: all-zero output", path.display());
    }
    Ok(Signal::new(signal.x, y))
}

// ---------------------------------------------------------------------------
// Validated method with its shared auxiliary series
// ---------------------------------------------------------------------------

struct PreparedMethod {
    method: NormalizationMethod,
    /// y column of the reference/baseline file, loaded once per batch.
    auxiliary: Option<Vec<f64>>,
}

impl PreparedMethod {
    fn prepare(request: &NormalizationRequest, options: &LoadOptions) -> Result<Self, ParameterError> {
        if request.inputs.is_empty() {
            return Err(ParameterError::NoInputs);
        }
        let method = NormalizationMethod::from_params(request.method, &request.params)?;

        let auxiliary = match method.auxiliary_file() {
            Some((name, path)) => {
                let series = load_column(path, request.y_column, options).map_err(|source| {
                    ParameterError::Auxiliary {
                        name,
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                log::debug!("Loaded {name} series ({} points) from {}", series.len(), path.display());
                Some(series)
            }
            None => None,
        };

        Ok(Self { method, auxiliary })
    }

    fn run(&self, signal: &Signal) -> Result<Vec<f64>, TransformError> {
        let x = &signal.x;
        let y = &signal.y;
        let auxiliary = self.auxiliary.as_deref().unwrap_or(&[]);

        match &self.method {
            NormalizationMethod::MinMax => Ok(transforms::min_max(y)),
            NormalizationMethod::Max => Ok(transforms::max(y)),
            NormalizationMethod::Auc => Ok(transforms::auc(x, y)),
            NormalizationMethod::AucInterval { start, end } => {
                Ok(transforms::auc_interval(x, y, *start, *end))
            }
            NormalizationMethod::Vector => Ok(transforms::vector(y)),
            NormalizationMethod::ZScore => Ok(transforms::z_score(y)),
            NormalizationMethod::TotalIntensity => Ok(transforms::total_intensity(y)),
            NormalizationMethod::ReferencePeak { index } => transforms::reference_peak(y, *index),
            NormalizationMethod::Msc { .. } => transforms::msc(y, auxiliary),
            NormalizationMethod::BaselineCorrection { .. } => {
                transforms::baseline_correction(y, auxiliary)
            }
            NormalizationMethod::MovingWindow { window_size } => {
                transforms::moving_window(y, *window_size)
            }
        }
    }
}
