//! The fixed catalog of normalization methods and their parameters.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ParameterError;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One entry of the method catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MethodKind {
    MinMax,
    Max,
    Auc,
    AucInterval,
    Vector,
    ZScore,
    TotalIntensity,
    ReferencePeak,
    MultiplicativeScatterCorrection,
    BaselineCorrection,
    MovingWindow,
}

/// What a method's transform consumes besides its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    YOnly,
    XAndY,
    /// y plus a second series read from an auxiliary file shared by the batch.
    YAndAuxiliary,
}

/// The type a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `(start, end)` on the x axis.
    Interval,
    /// Integer with a lower bound.
    Integer { min: i64 },
    /// Path to an existing tabular file.
    File,
}

/// Schema entry for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
}

const INTERVAL: ParamSpec = ParamSpec {
    name: "interval",
    label: "Interval (start, end)",
    kind: ParamKind::Interval,
};
const REFERENCE_PEAK_INDEX: ParamSpec = ParamSpec {
    name: "reference_peak_index",
    label: "Reference peak index",
    kind: ParamKind::Integer { min: 0 },
};
const REFERENCE: ParamSpec = ParamSpec {
    name: "reference",
    label: "Reference spectrum file",
    kind: ParamKind::File,
};
const BASELINE: ParamSpec = ParamSpec {
    name: "baseline",
    label: "Baseline file",
    kind: ParamKind::File,
};
const WINDOW_SIZE: ParamSpec = ParamSpec {
    name: "window_size",
    label: "Window size",
    kind: ParamKind::Integer { min: 1 },
};

impl MethodKind {
    /// Catalog order, as presented to the user.
    pub const ALL: [MethodKind; 11] = [
        MethodKind::MinMax,
        MethodKind::Max,
        MethodKind::Auc,
        MethodKind::AucInterval,
        MethodKind::Vector,
        MethodKind::ZScore,
        MethodKind::TotalIntensity,
        MethodKind::ReferencePeak,
        MethodKind::MultiplicativeScatterCorrection,
        MethodKind::BaselineCorrection,
        MethodKind::MovingWindow,
    ];

    /// Display name, unique across the catalog.
    pub fn name(self) -> &'static str {
        match self {
            MethodKind::MinMax => "Min-Max Normalization",
            MethodKind::Max => "Max Normalization",
            MethodKind::Auc => "Area Under Curve (AUC) Normalization",
            MethodKind::AucInterval => "Area Within a Specific Interval",
            MethodKind::Vector => "Vector (Euclidean) Normalization",
            MethodKind::ZScore => "Standard Score (Z-score) Normalization",
            MethodKind::TotalIntensity => "Total Intensity Normalization",
            MethodKind::ReferencePeak => "Normalization to a Reference Peak",
            MethodKind::MultiplicativeScatterCorrection => "Multiplicative Scatter Correction (MSC)",
            MethodKind::BaselineCorrection => "Baseline Correction Normalization",
            MethodKind::MovingWindow => "Normalization Within a Moving Window",
        }
    }

    pub fn from_name(name: &str) -> Option<MethodKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn signature(self) -> Signature {
        match self {
            MethodKind::Auc | MethodKind::AucInterval => Signature::XAndY,
            MethodKind::MultiplicativeScatterCorrection | MethodKind::BaselineCorrection => {
                Signature::YAndAuxiliary
            }
            _ => Signature::YOnly,
        }
    }

    /// Extra parameters the method requires.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            MethodKind::AucInterval => &[INTERVAL],
            MethodKind::ReferencePeak => &[REFERENCE_PEAK_INDEX],
            MethodKind::MultiplicativeScatterCorrection => &[REFERENCE],
            MethodKind::BaselineCorrection => &[BASELINE],
            MethodKind::MovingWindow => &[WINDOW_SIZE],
            _ => &[],
        }
    }

    /// The display name with every non-alphanumeric character replaced by `_`.
    pub fn file_tag(self) -> String {
        self.name()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Raw parameters, as supplied by the caller
// ---------------------------------------------------------------------------

/// A single parameter value before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Interval(f64, f64),
    Path(PathBuf),
}

/// Parameter name → value.
pub type MethodParams = BTreeMap<String, ParamValue>;

// ---------------------------------------------------------------------------
// Typed, validated method
// ---------------------------------------------------------------------------

/// A method together with its validated parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizationMethod {
    MinMax,
    Max,
    Auc,
    AucInterval { start: f64, end: f64 },
    Vector,
    ZScore,
    TotalIntensity,
    ReferencePeak { index: usize },
    Msc { reference: PathBuf },
    BaselineCorrection { baseline: PathBuf },
    MovingWindow { window_size: usize },
}

impl NormalizationMethod {
    /// Validate `params` against the schema of `kind`.
    ///
    /// Auxiliary files must exist on disk; their contents are not read here.
    pub fn from_params(kind: MethodKind, params: &MethodParams) -> Result<Self, ParameterError> {
        let method = kind.name();
        let checked = match kind {
            MethodKind::MinMax => Self::MinMax,
            MethodKind::Max => Self::Max,
            MethodKind::Auc => Self::Auc,
            MethodKind::AucInterval => {
                let (start, end) = interval_param(params, method, &INTERVAL)?;
                Self::AucInterval { start, end }
            }
            MethodKind::Vector => Self::Vector,
            MethodKind::ZScore => Self::ZScore,
            MethodKind::TotalIntensity => Self::TotalIntensity,
            MethodKind::ReferencePeak => Self::ReferencePeak {
                index: integer_param(params, method, &REFERENCE_PEAK_INDEX)?,
            },
            MethodKind::MultiplicativeScatterCorrection => Self::Msc {
                reference: file_param(params, method, &REFERENCE)?,
            },
            MethodKind::BaselineCorrection => Self::BaselineCorrection {
                baseline: file_param(params, method, &BASELINE)?,
            },
            MethodKind::MovingWindow => Self::MovingWindow {
                window_size: integer_param(params, method, &WINDOW_SIZE)?,
            },
        };
        Ok(checked)
    }

    pub fn kind(&self) -> MethodKind {
        match self {
            Self::MinMax => MethodKind::MinMax,
            Self::Max => MethodKind::Max,
            Self::Auc => MethodKind::Auc,
            Self::AucInterval { .. } => MethodKind::AucInterval,
            Self::Vector => MethodKind::Vector,
            Self::ZScore => MethodKind::ZScore,
            Self::TotalIntensity => MethodKind::TotalIntensity,
            Self::ReferencePeak { .. } => MethodKind::ReferencePeak,
            Self::Msc { .. } => MethodKind::MultiplicativeScatterCorrection,
            Self::BaselineCorrection { .. } => MethodKind::BaselineCorrection,
            Self::MovingWindow { .. } => MethodKind::MovingWindow,
        }
    }

    /// The auxiliary file this method reads, with its parameter name.
    pub fn auxiliary_file(&self) -> Option<(&'static str, &Path)> {
        match self {
            Self::Msc { reference } => Some((REFERENCE.name, reference.as_path())),
            Self::BaselineCorrection { baseline } => Some((BASELINE.name, baseline.as_path())),
            _ => None,
        }
    }
}

fn required<'a>(
    params: &'a MethodParams,
    method: &'static str,
    spec: &ParamSpec,
) -> Result<&'a ParamValue, ParameterError> {
    params.get(spec.name).ok_or(ParameterError::Missing {
        method,
        name: spec.name,
    })
}

fn interval_param(
    params: &MethodParams,
    method: &'static str,
    spec: &ParamSpec,
) -> Result<(f64, f64), ParameterError> {
    match required(params, method, spec)? {
        ParamValue::Interval(start, end) if start.is_finite() && end.is_finite() => {
            Ok((*start, *end))
        }
        ParamValue::Interval(..) => Err(ParameterError::OutOfRange {
            method,
            name: spec.name,
            reason: "must have finite bounds".to_string(),
        }),
        _ => Err(ParameterError::WrongType {
            method,
            name: spec.name,
            expected: "a (start, end) pair",
        }),
    }
}

fn integer_param(
    params: &MethodParams,
    method: &'static str,
    spec: &ParamSpec,
) -> Result<usize, ParameterError> {
    let min = match spec.kind {
        ParamKind::Integer { min } => min,
        _ => 0,
    };
    let ParamValue::Integer(value) = *required(params, method, spec)? else {
        return Err(ParameterError::WrongType {
            method,
            name: spec.name,
            expected: "an integer",
        });
    };
    if value < min {
        return Err(ParameterError::OutOfRange {
            method,
            name: spec.name,
            reason: format!("must be at least {min}, got {value}"),
        });
    }
    usize::try_from(value).map_err(|_| ParameterError::OutOfRange {
        method,
        name: spec.name,
        reason: format!("{value} does not fit in an index"),
    })
}

fn file_param(
    params: &MethodParams,
    method: &'static str,
    spec: &ParamSpec,
) -> Result<PathBuf, ParameterError> {
    let ParamValue::Path(path) = required(params, method, spec)? else {
        return Err(ParameterError::WrongType {
            method,
            name: spec.name,
            expected: "a file path",
        });
    };
    if !path.is_file() {
        return Err(ParameterError::AuxiliaryMissing {
            method,
            name: spec.name,
            path: path.clone(),
        });
    }
    Ok(path.clone())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use tempfile::NamedTempFile;

    use super::*;

    fn params(entries: &[(&str, ParamValue)]) -> MethodParams {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn catalog_names_are_unique_and_resolvable() {
        let names: BTreeSet<&str> = MethodKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), MethodKind::ALL.len());
        for kind in MethodKind::ALL {
            assert_eq!(MethodKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(MethodKind::from_name("Median Normalization"), None);
    }

    #[test]
    fn catalog_order_is_stable() {
        assert_eq!(MethodKind::ALL[0], MethodKind::MinMax);
        assert_eq!(MethodKind::ALL[7], MethodKind::ReferencePeak);
        assert_eq!(MethodKind::ALL[10], MethodKind::MovingWindow);
    }

    #[test]
    fn signatures_follow_inputs() {
        assert_eq!(MethodKind::MinMax.signature(), Signature::YOnly);
        assert_eq!(MethodKind::AucInterval.signature(), Signature::XAndY);
        assert_eq!(MethodKind::BaselineCorrection.signature(), Signature::YAndAuxiliary);
        assert_eq!(MethodKind::MovingWindow.signature(), Signature::YOnly);
    }

    #[test]
    fn only_parameterized_methods_declare_params() {
        let with_params: Vec<MethodKind> = MethodKind::ALL
            .into_iter()
            .filter(|k| !k.params().is_empty())
            .collect();
        assert_eq!(
            with_params,
            vec![
                MethodKind::AucInterval,
                MethodKind::ReferencePeak,
                MethodKind::MultiplicativeScatterCorrection,
                MethodKind::BaselineCorrection,
                MethodKind::MovingWindow,
            ]
        );
    }

    #[test]
    fn file_tag_replaces_non_alphanumerics() {
        assert_eq!(
            MethodKind::ZScore.file_tag(),
            "Standard_Score__Z_score__Normalization"
        );
    }

    #[test]
    fn parameterless_methods_ignore_params() {
        let method = NormalizationMethod::from_params(MethodKind::Vector, &MethodParams::new()).unwrap();
        assert_eq!(method, NormalizationMethod::Vector);
        assert_eq!(method.kind(), MethodKind::Vector);
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let err = NormalizationMethod::from_params(MethodKind::AucInterval, &MethodParams::new())
            .unwrap_err();
        assert!(matches!(err, ParameterError::Missing { name: "interval", .. }));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let p = params(&[("window_size", ParamValue::Float(2.5))]);
        let err = NormalizationMethod::from_params(MethodKind::MovingWindow, &p).unwrap_err();
        assert!(matches!(err, ParameterError::WrongType { name: "window_size", .. }));
    }

    #[test]
    fn window_below_one_is_rejected() {
        let p = params(&[("window_size", ParamValue::Integer(0))]);
        let err = NormalizationMethod::from_params(MethodKind::MovingWindow, &p).unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { name: "window_size", .. }));
    }

    #[test]
    fn negative_peak_index_is_rejected() {
        let p = params(&[("reference_peak_index", ParamValue::Integer(-1))]);
        let err = NormalizationMethod::from_params(MethodKind::ReferencePeak, &p).unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { .. }));
    }

    #[test]
    fn non_finite_interval_is_rejected() {
        let p = params(&[("interval", ParamValue::Interval(0.0, f64::NAN))]);
        let err = NormalizationMethod::from_params(MethodKind::AucInterval, &p).unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { name: "interval", .. }));
    }

    #[test]
    fn typed_parameters_are_extracted() {
        let p = params(&[
            ("interval", ParamValue::Interval(400.0, 500.0)),
            ("reference_peak_index", ParamValue::Integer(3)),
            ("window_size", ParamValue::Integer(5)),
        ]);
        assert_eq!(
            NormalizationMethod::from_params(MethodKind::AucInterval, &p).unwrap(),
            NormalizationMethod::AucInterval {
                start: 400.0,
                end: 500.0
            }
        );
        assert_eq!(
            NormalizationMethod::from_params(MethodKind::ReferencePeak, &p).unwrap(),
            NormalizationMethod::ReferencePeak { index: 3 }
        );
        assert_eq!(
            NormalizationMethod::from_params(MethodKind::MovingWindow, &p).unwrap(),
            NormalizationMethod::MovingWindow { window_size: 5 }
        );
    }

    #[test]
    fn auxiliary_file_must_exist() {
        let p = params(&[("reference", ParamValue::Path("/no/such/reference.csv".into()))]);
        let err = NormalizationMethod::from_params(MethodKind::MultiplicativeScatterCorrection, &p)
            .unwrap_err();
        assert!(matches!(err, ParameterError::AuxiliaryMissing { name: "reference", .. }));
    }

    #[test]
    fn existing_auxiliary_file_is_accepted() {
        let file = NamedTempFile::new().unwrap();
        let p = params(&[("baseline", ParamValue::Path(file.path().to_path_buf()))]);
        let method = NormalizationMethod::from_params(MethodKind::BaselineCorrection, &p).unwrap();
        assert_eq!(method.auxiliary_file(), Some(("baseline", file.path())));
    }

    #[test]
    fn params_deserialize_from_json() {
        let p: MethodParams = serde_json::from_str(
            r#"{"window_size": 3, "interval": [1.5, 2.5], "reference": "ref.csv", "scale": 0.5}"#,
        )
        .unwrap();
        assert_eq!(p["window_size"], ParamValue::Integer(3));
        assert_eq!(p["interval"], ParamValue::Interval(1.5, 2.5));
        assert_eq!(p["reference"], ParamValue::Path("ref.csv".into()));
        assert_eq!(p["scale"], ParamValue::Float(0.5));
    }
}
