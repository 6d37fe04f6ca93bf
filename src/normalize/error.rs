//! Error types for normalization requests and transforms.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::loader::LoadError;

/// A request that cannot be run at all. Raised before any input is read.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("no input files selected")]
    NoInputs,

    #[error("{method}: missing required parameter '{name}'")]
    Missing { method: &'static str, name: &'static str },

    #[error("{method}: parameter '{name}' must be {expected}")]
    WrongType {
        method: &'static str,
        name: &'static str,
        expected: &'static str,
    },

    #[error("{method}: parameter '{name}' {reason}")]
    OutOfRange {
        method: &'static str,
        name: &'static str,
        reason: String,
    },

    #[error("{method}: {name} file not found: {}", path.display())]
    AuxiliaryMissing {
        method: &'static str,
        name: &'static str,
        path: PathBuf,
    },

    #[error("could not load {name} file {}: {source}", path.display())]
    Auxiliary {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

/// A transform that could not produce output for one signal.
///
/// Zero denominators are not errors; those produce an all-zero signal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("reference peak index {index} out of range for a signal of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("signal has {signal} points but the {series} has {auxiliary}")]
    LengthMismatch {
        series: &'static str,
        signal: usize,
        auxiliary: usize,
    },

    #[error("linear fit against the reference is singular")]
    SingularFit,

    #[error("window size must be at least 1, got {0}")]
    InvalidWindow(usize),
}
