//! Averaging
//!
//! Turns the outcome of a column read into an [`Average`], keeping a missing
//! file distinct from a file without any valid value.

use crate::reader::ColumnRead;

/// Result of averaging one file's column
#[derive(Debug, Clone, PartialEq)]
pub enum Average {
    /// The file does not exist
    NoFile,
    /// The file exists but could not be opened or its header read
    Unreadable(String),
    /// The file exists but no row produced a number
    NoValidValues,
    /// Arithmetic mean of the valid values
    Value(f64),
}

impl Average {
    /// Average the values of a column read
    pub fn from_read(read: &ColumnRead) -> Self {
        match read {
            ColumnRead::Missing => Average::NoFile,
            ColumnRead::Values(column) => match mean(&column.values) {
                Some(avg) => Average::Value(avg),
                None => Average::NoValidValues,
            },
        }
    }
}

/// Arithmetic mean, `None` for an empty slice.
///
/// NaN and infinite inputs are not filtered and propagate into the result.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ColumnValues;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[0.0, 0.0]), Some(0.0));
        assert_eq!(mean(&[]), None);
        assert!((mean(&[0.1, 0.2, 0.3]).unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_values_propagate() {
        assert!(mean(&[1.0, f64::NAN]).unwrap().is_nan());
        assert_eq!(mean(&[1.0, f64::INFINITY]), Some(f64::INFINITY));
    }

    #[test]
    fn test_outcomes_are_distinct() {
        assert_eq!(Average::from_read(&ColumnRead::Missing), Average::NoFile);

        let empty = ColumnRead::Values(ColumnValues::default());
        assert_eq!(Average::from_read(&empty), Average::NoValidValues);

        let zero = ColumnRead::Values(ColumnValues {
            values: vec![-1.0, 1.0],
            rejected: vec![],
        });
        assert_eq!(Average::from_read(&zero), Average::Value(0.0));
    }
}
