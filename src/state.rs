use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusty_norm::config::AppConfig;
use rusty_norm::data::export::export_results;
use rusty_norm::normalize::{
    self, MethodKind, MethodParams, NormalizationRequest, ParamKind, ParamValue, ResultStore,
};

// ---------------------------------------------------------------------------
// Input file list
// ---------------------------------------------------------------------------

/// One entry of the input list; only checked files are normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFile {
    pub path: PathBuf,
    pub checked: bool,
}

impl InputFile {
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// Parameter widgets' backing values
// ---------------------------------------------------------------------------

/// Values behind the parameter widgets, keyed by parameter name.  Kept across
/// method switches so a user can flip between methods without retyping.
#[derive(Debug, Clone, Default)]
pub struct ParamInputs {
    pub intervals: BTreeMap<&'static str, (f64, f64)>,
    pub integers: BTreeMap<&'static str, i64>,
    pub files: BTreeMap<&'static str, PathBuf>,
}

impl ParamInputs {
    /// Collect the values the given method's schema asks for.  Unset files are
    /// left out so the engine reports them as missing.
    pub fn to_params(&self, method: MethodKind) -> MethodParams {
        let mut params = MethodParams::new();
        for spec in method.params() {
            let value = match spec.kind {
                ParamKind::Interval => self
                    .intervals
                    .get(spec.name)
                    .map(|&(start, end)| ParamValue::Interval(start, end)),
                ParamKind::Integer { min } => Some(ParamValue::Integer(
                    self.integers.get(spec.name).copied().unwrap_or(min),
                )),
                ParamKind::File => self.files.get(spec.name).cloned().map(ParamValue::Path),
            };
            if let Some(value) = value {
                params.insert(spec.name.to_string(), value);
            }
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Files offered for normalization.
    pub files: Vec<InputFile>,

    /// 1-based column numbers, as shown in the UI.
    pub x_column: usize,
    pub y_column: usize,

    /// Axis labels; also the column names of exported files.
    pub x_label: String,
    pub y_label: String,

    /// Selected normalization method.
    pub method: MethodKind,
    pub params: ParamInputs,

    /// Outcome of the latest run.
    pub store: ResultStore,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    /// Whether `status_message` reports an error.
    pub status_is_error: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            x_column: config.columns.x,
            y_column: config.columns.y,
            x_label: config.labels.x.clone(),
            y_label: config.labels.y.clone(),
            config,
            files: Vec::new(),
            method: MethodKind::MinMax,
            params: ParamInputs::default(),
            store: ResultStore::new(),
            status_message: None,
            status_is_error: false,
        }
    }

    /// Append files, skipping ones already in the list.  New files start checked.
    pub fn add_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            if self.files.iter().any(|f| f.path == path) {
                continue;
            }
            log::debug!("Added input {}", path.display());
            self.files.push(InputFile {
                path,
                checked: true,
            });
        }
    }

    pub fn checked_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|f| f.checked)
            .map(|f| f.path.clone())
            .collect()
    }

    pub fn set_all_checked(&mut self, checked: bool) {
        for file in &mut self.files {
            file.checked = checked;
        }
    }

    pub fn remove_unchecked(&mut self) {
        self.files.retain(|f| f.checked);
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
        self.store.clear();
    }

    /// Snapshot of the panel as an engine request.
    pub fn build_request(&self) -> NormalizationRequest {
        NormalizationRequest {
            method: self.method,
            params: self.params.to_params(self.method),
            inputs: self.checked_files(),
            x_column: self.x_column.saturating_sub(1),
            y_column: self.y_column.saturating_sub(1),
        }
    }

    /// Run the selected method over the checked files and replace the stored
    /// outcome.  A rejected request leaves the previous outcome in place.
    pub fn apply_normalization(&mut self) {
        let request = self.build_request();
        match normalize::apply(&request, &self.config.load_options()) {
            Ok(outcome) => {
                let summary = format!(
                    "{}: {} file(s) normalized, {} skipped",
                    outcome.method,
                    outcome.result.len(),
                    outcome.diagnostics.len()
                );
                self.set_status(summary, !outcome.diagnostics.is_empty());
                self.store.replace(outcome);
            }
            Err(e) => {
                log::error!("Normalization request rejected: {e}");
                self.set_status(format!("Error: {e}"), true);
            }
        }
    }

    /// Write the current outcome into `directory`.
    pub fn export_to(&mut self, directory: &Path) {
        let Some(outcome) = self.store.snapshot() else {
            self.set_status("Please apply normalization first.".to_string(), true);
            return;
        };
        if outcome.result.is_empty() {
            self.set_status("No normalized data to export.".to_string(), true);
            return;
        }

        let summary = export_results(
            &outcome.result,
            outcome.method,
            directory,
            &self.x_label,
            &self.y_label,
        );
        if summary.failed.is_empty() {
            self.set_status(
                format!(
                    "Saved {} file(s) to {}",
                    summary.written.len(),
                    directory.display()
                ),
                false,
            );
        } else {
            let (path, reason) = &summary.failed[0];
            self.set_status(
                format!(
                    "Saved {} file(s); {} failed (first: {}: {reason})",
                    summary.written.len(),
                    summary.failed.len(),
                    path.display()
                ),
                true,
            );
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = Some(message);
        self.status_is_error = is_error;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn state_with(dir: &Path, files: &[(&str, &str)]) -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.add_files(files.iter().map(|(name, contents)| {
            let path = dir.join(name);
            fs::write(&path, contents).unwrap();
            path
        }));
        state
    }

    #[test]
    fn columns_are_converted_to_zero_based() {
        let mut state = AppState::new(AppConfig::default());
        state.x_column = 1;
        state.y_column = 3;
        let request = state.build_request();
        assert_eq!(request.x_column, 0);
        assert_eq!(request.y_column, 2);
    }

    #[test]
    fn duplicates_are_not_added_and_unchecked_files_are_excluded() {
        let mut state = AppState::new(AppConfig::default());
        state.add_files([PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        state.add_files([PathBuf::from("a.csv")]);
        assert_eq!(state.files.len(), 2);

        state.files[0].checked = false;
        assert_eq!(state.checked_files(), vec![PathBuf::from("b.csv")]);

        state.remove_unchecked();
        assert_eq!(state.files.len(), 1);
    }

    #[test]
    fn params_follow_the_selected_method_schema() {
        let mut inputs = ParamInputs::default();
        inputs.intervals.insert("interval", (1.0, 2.0));
        inputs.integers.insert("window_size", 4);

        let params = inputs.to_params(MethodKind::MovingWindow);
        assert_eq!(params.len(), 1);
        assert_eq!(params["window_size"], ParamValue::Integer(4));

        // unset integers fall back to their lower bound, unset files stay missing
        let params = inputs.to_params(MethodKind::ReferencePeak);
        assert_eq!(params["reference_peak_index"], ParamValue::Integer(0));
        assert!(inputs.to_params(MethodKind::BaselineCorrection).is_empty());
    }

    #[test]
    fn apply_replaces_the_stored_outcome() {
        let dir = TempDir::new().unwrap();
        let mut state = state_with(dir.path(), &[("a.csv", "1,2\n2,4\n"), ("b.csv", "1,1\n2,3\n")]);

        state.apply_normalization();
        assert_eq!(state.store.snapshot().unwrap().result.len(), 2);

        state.files[1].checked = false;
        state.method = MethodKind::Max;
        state.apply_normalization();
        let outcome = state.store.snapshot().unwrap();
        assert_eq!(outcome.method, MethodKind::Max);
        assert_eq!(outcome.result.len(), 1);
        assert!(!state.status_is_error);
    }

    #[test]
    fn rejected_request_keeps_previous_outcome() {
        let dir = TempDir::new().unwrap();
        let mut state = state_with(dir.path(), &[("a.csv", "1,2\n2,4\n")]);
        state.apply_normalization();

        state.method = MethodKind::MultiplicativeScatterCorrection;
        state.apply_normalization();

        assert!(state.status_is_error);
        assert_eq!(state.store.snapshot().unwrap().method, MethodKind::MinMax);
    }

    #[test]
    fn export_writes_one_file_per_result() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let mut state = state_with(dir.path(), &[("a.csv", "1,2\n2,4\n"), ("b.csv", "1,1\n2,3\n")]);
        state.apply_normalization();
        state.export_to(out.path());

        assert!(!state.status_is_error);
        assert!(out.path().join("a_Min_Max_Normalization.csv").is_file());
        assert!(out.path().join("b_Min_Max_Normalization.csv").is_file());
    }
}
