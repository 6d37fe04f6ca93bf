//! Normalization of loaded signals.
//!
//! ```text
//!   MethodKind + MethodParams        (what the caller picked)
//!        │  NormalizationMethod::from_params
//!        ▼
//!   NormalizationMethod              (typed, validated)
//!        │  engine::apply, per input file
//!        ▼
//!   transforms::*                    (pure numeric functions)
//!        │
//!        ▼
//!   NormalizationOutcome → ResultStore
//! ```

pub mod engine;
pub mod error;
pub mod method;
pub mod result;
pub mod store;
pub mod transforms;

pub use engine::{apply, FileDiagnostic, FileFailure, NormalizationOutcome, NormalizationRequest};
pub use error::{ParameterError, TransformError};
pub use method::{MethodKind, MethodParams, NormalizationMethod, ParamKind, ParamSpec, ParamValue, Signature};
pub use result::NormalizationResult;
pub use store::ResultStore;
