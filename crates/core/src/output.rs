use ndarray::{Array1, Array2};
use thiserror::Error;

/// The raw value returned by one objective function call.
///
/// The variant records the value's rank, and rank is the only thing the
/// evaluation engine inspects when deciding how many fitness columns a
/// result contributes. Lengths are never used to guess orientation, so an
/// [`Output::Matrix`] whose two extents happen to be equal is still read
/// along the axis its calling convention prescribes.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A single value (rank 0).
    Scalar(f64),

    /// A flat sequence of values (rank 1).
    Vector(Array1<f64>),

    /// Stacked sequences of values (rank 2).
    Matrix(Array2<f64>),
}

/// Error returned when nested rows do not form a rectangular matrix.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("row {row} has {found} values, expected {expected}")]
pub struct RaggedRowsError {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl Output {
    /// Returns the number of dimensions of this value.
    #[must_use]
    pub fn rank(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Vector(_) => 1,
            Self::Matrix(_) => 2,
        }
    }
}

impl From<f64> for Output {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for Output {
    fn from(values: Vec<f64>) -> Self {
        Self::Vector(Array1::from(values))
    }
}

impl<const K: usize> From<[f64; K]> for Output {
    fn from(values: [f64; K]) -> Self {
        Self::Vector(Array1::from(values.to_vec()))
    }
}

impl From<Array1<f64>> for Output {
    fn from(values: Array1<f64>) -> Self {
        Self::Vector(values)
    }
}

impl From<Array2<f64>> for Output {
    fn from(values: Array2<f64>) -> Self {
        Self::Matrix(values)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Output {
    type Error = RaggedRowsError;

    /// Stacks `rows` into a matrix with one row per inner vector.
    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let ncols = rows.first().map_or(0, Vec::len);
        let nrows = rows.len();

        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(RaggedRowsError {
                row,
                expected: ncols,
                found: values.len(),
            });
        }

        let matrix = Array2::from_shape_fn((nrows, ncols), |(i, j)| rows[i][j]);
        Ok(Self::Matrix(matrix))
    }
}
