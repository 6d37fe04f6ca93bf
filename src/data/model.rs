use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Signal – one (x, y) series
// ---------------------------------------------------------------------------

/// A single data series selected from a tabular source.
///
/// `x` and `y` always have the same length. Signals produced by the loader
/// are non-empty and contain only finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Position axis (wavenumber, wavelength, time, ...).
    pub x: Vec<f64>,
    /// Intensity axis – same length as `x`.
    pub y: Vec<f64>,
}

impl Signal {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len(), "x and y must have the same length");
        Self { x, y }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// `[x, y]` pairs, the shape plotting code wants.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&xi, &yi)| [xi, yi])
    }
}

// ---------------------------------------------------------------------------
// NumericTable – the cleaned table a signal is selected from
// ---------------------------------------------------------------------------

/// A fully numeric table: every row has exactly `columns.len()` finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    /// Column names from the header row, or `Column 1..n` when there was none.
    pub columns: Vec<String>,
    /// Row-major values.
    pub rows: Vec<Vec<f64>>,
}

impl NumericTable {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy one column out of the table. `None` when the index is out of range.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.width() {
            return None;
        }
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Select the `(x, y)` pair by 0-based column indices.
    pub fn select(&self, x_column: usize, y_column: usize) -> Result<Signal, LoadError> {
        let available = self.width();
        let x = self.column(x_column).ok_or(LoadError::InsufficientColumns {
            requested: x_column,
            available,
        })?;
        let y = self.column(y_column).ok_or(LoadError::InsufficientColumns {
            requested: y_column,
            available,
        })?;
        if y.is_empty() {
            return Err(LoadError::NoNumericRows);
        }
        Ok(Signal::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> NumericTable {
        NumericTable {
            columns: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![vec![1.0, 10.0, 100.0], vec![2.0, 20.0, 200.0]],
        }
    }

    #[test]
    fn select_picks_requested_columns() {
        let signal = table().select(0, 2).unwrap();
        assert_eq!(signal.x, vec![1.0, 2.0]);
        assert_eq!(signal.y, vec![100.0, 200.0]);
    }

    #[test]
    fn select_out_of_range_reports_available_width() {
        let err = table().select(0, 3).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InsufficientColumns {
                requested: 3,
                available: 3
            }
        ));
    }

    #[test]
    fn points_pairs_x_with_y() {
        let signal = Signal::new(vec![0.0, 1.0], vec![5.0, 6.0]);
        let pts: Vec<[f64; 2]> = signal.points().collect();
        assert_eq!(pts, vec![[0.0, 5.0], [1.0, 6.0]]);
    }
}
