use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use rusty_norm::data::export::export_results;
use rusty_norm::data::loader::{load_signal, LoadOptions};
use rusty_norm::normalize::{self, FileFailure, ParameterError};
use rusty_norm::{MethodKind, MethodParams, NormalizationRequest, ParamValue};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn request(method: MethodKind, params: MethodParams, inputs: Vec<PathBuf>) -> NormalizationRequest {
    NormalizationRequest {
        method,
        params,
        inputs,
        x_column: 0,
        y_column: 1,
    }
}

#[test]
fn batch_continues_past_a_broken_file() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.csv", "x,y\n1,2\n2,4\n3,6\n");
    let b = write(dir.path(), "b.csv", "only words here\nnothing numeric\n");
    let c = write(dir.path(), "c.csv", "x,y\n1,1\n2,1\n3,3\n");

    let outcome = normalize::apply(
        &request(MethodKind::MinMax, MethodParams::new(), vec![a.clone(), b.clone(), c.clone()]),
        &LoadOptions::default(),
    )
    .unwrap();

    assert_eq!(outcome.result.len(), 2);
    assert_eq!(outcome.result[&a].y, vec![0.0, 0.5, 1.0]);
    assert_eq!(outcome.result[&c].y, vec![0.0, 0.0, 1.0]);

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].path, b);
    assert!(matches!(outcome.diagnostics[0].failure, FileFailure::Load(_)));
}

#[test]
fn preamble_and_header_do_not_change_the_signal() {
    let dir = TempDir::new().unwrap();
    let plain = write(dir.path(), "plain.csv", "10,1\n20,3\n30,2\n");
    let decorated = write(
        dir.path(),
        "decorated.csv",
        "Instrument: synthetic\nOperator: someone\n\nWavenumber,Intensity\n10,1\n20,3\n30,2\n",
    );

    let options = LoadOptions::default();
    let a = load_signal(&plain, 0, 1, &options).unwrap();
    let b = load_signal(&decorated, 0, 1, &options).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.x, vec![10.0, 20.0, 30.0]);
}

#[test]
fn msc_against_a_shared_reference() {
    let dir = TempDir::new().unwrap();
    let reference = write(dir.path(), "reference.csv", "x,y\n0,1\n1,2\n2,3\n3,4\n");
    // 2 * reference + 1
    let sample = write(dir.path(), "sample.csv", "x,y\n0,3\n1,5\n2,7\n3,9\n");

    let mut params = MethodParams::new();
    params.insert("reference".to_string(), ParamValue::Path(reference));
    let outcome = normalize::apply(
        &request(MethodKind::MultiplicativeScatterCorrection, params, vec![sample.clone()]),
        &LoadOptions::default(),
    )
    .unwrap();

    assert!(outcome.diagnostics.is_empty());
    let y = &outcome.result[&sample].y;
    // fit gives beta = 2, alpha = 1, applied to the sample itself
    for (got, expected) in y.iter().zip([7.0, 11.0, 15.0, 19.0]) {
        assert_abs_diff_eq!(*got, expected, epsilon = 1e-12);
    }
}

#[test]
fn invalid_request_reads_nothing() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.csv", "1,2\n2,3\n");

    let mut params = MethodParams::new();
    params.insert("window_size".to_string(), ParamValue::Integer(0));
    let err = normalize::apply(
        &request(MethodKind::MovingWindow, params, vec![a]),
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParameterError::OutOfRange { .. }));
}

#[test]
fn apply_then_export_round_trips() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let a = write(dir.path(), "sample_a.csv", "x,y\n0,0\n1,2\n2,0\n");

    let mut params = MethodParams::new();
    params.insert("interval".to_string(), ParamValue::Interval(0.0, 2.0));
    let outcome = normalize::apply(
        &request(MethodKind::AucInterval, params, vec![a.clone()]),
        &LoadOptions::default(),
    )
    .unwrap();

    let summary = export_results(&outcome.result, outcome.method, out.path(), "Wavenumber", "Intensity");
    assert!(summary.failed.is_empty());
    assert_eq!(summary.written.len(), 1);

    let exported = out.path().join("sample_a_Area_Within_a_Specific_Interval.csv");
    assert_eq!(summary.written[0], exported);

    let text = fs::read_to_string(&exported).unwrap();
    assert!(text.starts_with("Wavenumber,Intensity"));

    let reloaded = load_signal(&exported, 0, 1, &LoadOptions::default()).unwrap();
    assert_eq!(reloaded.x, vec![0.0, 1.0, 2.0]);
    // area over [0, 2] is 2
    for (got, expected) in reloaded.y.iter().zip([0.0, 1.0, 0.0]) {
        assert_abs_diff_eq!(*got, expected, epsilon = 1e-12);
    }
}
