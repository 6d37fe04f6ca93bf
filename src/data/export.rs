use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::normalize::method::MethodKind;
use crate::normalize::NormalizationResult;

use super::model::Signal;

/// What an export run wrote, and what it could not write.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    /// `(source file, error)` for every entry that failed.
    pub failed: Vec<(PathBuf, String)>,
}

/// Output file name for one normalized input: `{stem}_{method tag}.csv`.
pub fn export_file_name(source: &Path, method: MethodKind) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "signal".to_string());
    format!("{stem}_{}.csv", method.file_tag())
}

/// Write every entry of `result` into `directory`, one CSV per input.
///
/// A failing entry does not stop the others; it is reported in the summary.
pub fn export_results(
    result: &NormalizationResult,
    method: MethodKind,
    directory: &Path,
    x_label: &str,
    y_label: &str,
) -> ExportSummary {
    let mut summary = ExportSummary::default();
    let mut seen = BTreeSet::new();

    for (source, signal) in result {
        let target = directory.join(export_file_name(source, method));
        if !seen.insert(target.clone()) {
            log::warn!(
                "{} overwrites an export with the same name",
                source.display()
            );
        }
        match write_signal_csv(&target, signal, x_label, y_label) {
            Ok(()) => {
                log::info!("Exported {} -> {}", source.display(), target.display());
                summary.written.push(target);
            }
            Err(e) => {
                log::error!("Failed to export {}: {e:#}", source.display());
                summary.failed.push((source.clone(), format!("{e:#}")));
            }
        }
    }

    summary
}

/// Write a signal as a two-column CSV with the given header, no index column.
pub fn write_signal_csv(path: &Path, signal: &Signal, x_label: &str, y_label: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer
        .write_record([x_label, y_label])
        .context("writing CSV header")?;
    for (row, [x, y]) in signal.points().enumerate() {
        writer
            .write_record([x.to_string(), y.to_string()])
            .with_context(|| format!("writing CSV row {row}"))?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}
