//! Batch normalization of one-dimensional spectral signals.
//!
//! The library holds everything the viewer needs that is not UI:
//! - [`data`]: reading tabular files into [`Signal`]s and exporting results
//! - [`normalize`]: the method registry, the transforms and the batch engine
//! - [`config`]: viewer defaults loaded from JSON

pub mod config;
pub mod data;
pub mod normalize;

pub use config::AppConfig;
pub use data::model::{NumericTable, Signal};
pub use normalize::{
    MethodKind, MethodParams, NormalizationMethod, NormalizationOutcome, NormalizationRequest,
    ParamValue, ResultStore,
};
