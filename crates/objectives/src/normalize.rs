//! Arranges raw function outputs into a signed fitness matrix.
//!
//! Every evaluator reduces each function's raw outputs to a list of fitness
//! columns, concatenates the lists in declaration order, and hands them to
//! [`into_fitness`] along with the set's signs. That is the only place
//! directions are applied.
//!
//! A result's rank alone decides how many columns it contributes:
//!
//! - Population calls: a vector is one column; a matrix is one column per
//!   row, so `(k, n)` yields `k` columns.
//! - Per-item calls: scalars stack into one column; vectors stack into an
//!   `(n, k)` matrix whose columns become the `k` fitness columns.
//!
//! Lengths are never used to guess orientation. A population call that
//! returns an `(n, n)` matrix is read row-wise like any other matrix.

use ndarray::{Array1, Array2};

use swarmfit_core::Output;

use crate::{Layout, ShapeError};

/// Splits the output of one population-level call into columns.
pub(crate) fn population_columns(
    function: usize,
    output: Output,
) -> Result<Vec<Array1<f64>>, ShapeError> {
    match output {
        Output::Vector(column) => Ok(vec![column]),
        Output::Matrix(rows) => Ok(rows.outer_iter().map(|row| row.to_owned()).collect()),
        Output::Scalar(_) => Err(ShapeError::Rank {
            function,
            rank: 0,
            layout: Layout::Population,
        }),
    }
}

/// Stacks per-item outputs (one per candidate, in order) into columns.
pub(crate) fn item_columns(
    function: usize,
    outputs: Vec<Output>,
) -> Result<Vec<Array1<f64>>, ShapeError> {
    let Some(first) = outputs.first() else {
        return Ok(Vec::new());
    };

    match first {
        Output::Scalar(_) => {
            let column = outputs
                .into_iter()
                .enumerate()
                .map(|(item, output)| match output {
                    Output::Scalar(value) => Ok(value),
                    _ => Err(ShapeError::Inconsistent { function, item }),
                })
                .collect::<Result<Array1<f64>, _>>()?;
            Ok(vec![column])
        }
        Output::Vector(values) => {
            let width = values.len();
            let mut stacked = Array2::zeros((outputs.len(), width));
            for (item, output) in outputs.into_iter().enumerate() {
                match output {
                    Output::Vector(values) if values.len() == width => {
                        stacked.row_mut(item).assign(&values);
                    }
                    _ => return Err(ShapeError::Inconsistent { function, item }),
                }
            }
            // Candidates are rows; each column is one objective.
            Ok(stacked.columns().into_iter().map(|c| c.to_owned()).collect())
        }
        Output::Matrix(_) => Err(ShapeError::Rank {
            function,
            rank: 2,
            layout: Layout::PerItem,
        }),
    }
}

/// Splits batch outputs into columns and joins them in batch order.
///
/// `lens` holds the number of candidates in each batch. Every batch must
/// contribute the same number of columns, each as long as its batch.
pub(crate) fn batch_columns(
    function: usize,
    outputs: Vec<Output>,
    lens: &[usize],
) -> Result<Vec<Array1<f64>>, ShapeError> {
    let total = lens.iter().sum();
    let mut joined: Vec<Vec<f64>> = Vec::new();

    for (batch, (output, &len)) in outputs.into_iter().zip(lens).enumerate() {
        let columns = population_columns(function, output)?;

        if batch == 0 {
            joined = vec![Vec::with_capacity(total); columns.len()];
        } else if columns.len() != joined.len() {
            return Err(ShapeError::BatchColumns {
                function,
                batch,
                expected: joined.len(),
                found: columns.len(),
            });
        }

        for (dst, column) in joined.iter_mut().zip(columns) {
            if column.len() != len {
                return Err(ShapeError::BatchLength {
                    function,
                    batch,
                    expected: len,
                    found: column.len(),
                });
            }
            dst.extend(column.iter().copied());
        }
    }

    Ok(joined.into_iter().map(Array1::from).collect())
}

/// Stacks columns into an `(n, k)` matrix and multiplies column `j` by
/// `signs[j]`.
pub(crate) fn into_fitness(
    columns: Vec<Array1<f64>>,
    rows: usize,
    signs: &Array1<f64>,
) -> Result<Array2<f64>, ShapeError> {
    if columns.len() != signs.len() {
        return Err(ShapeError::ColumnCount {
            expected: signs.len(),
            found: columns.len(),
        });
    }

    let mut fitness = Array2::zeros((rows, signs.len()));
    for (j, column) in columns.iter().enumerate() {
        if column.len() != rows {
            return Err(ShapeError::ColumnLength {
                column: j,
                expected: rows,
                found: column.len(),
            });
        }
        fitness.column_mut(j).assign(column);
    }

    fitness *= signs;
    Ok(fitness)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn population_vector_is_one_column() {
        let columns = population_columns(0, Output::from(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(columns, vec![array![1.0, 2.0, 3.0]]);
    }

    #[test]
    fn population_matrix_rows_become_columns() {
        let output = Output::from(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let columns = population_columns(0, output).unwrap();
        assert_eq!(columns, vec![array![1.0, 2.0, 3.0], array![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn square_matrix_is_read_by_rank_not_length() {
        // Two candidates, two rows: still one column per row.
        let output = Output::from(array![[1.0, 2.0], [3.0, 4.0]]);
        let columns = population_columns(0, output).unwrap();
        assert_eq!(columns, vec![array![1.0, 2.0], array![3.0, 4.0]]);
    }

    #[test]
    fn population_scalar_is_rejected() {
        let err = population_columns(3, Output::from(1.0)).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Rank {
                function: 3,
                rank: 0,
                layout: Layout::Population
            }
        );
    }

    #[test]
    fn item_scalars_stack_into_one_column() {
        let outputs = vec![Output::from(1.0), Output::from(2.0)];
        let columns = item_columns(0, outputs).unwrap();
        assert_eq!(columns, vec![array![1.0, 2.0]]);
    }

    #[test]
    fn item_vectors_are_transposed() {
        let outputs = vec![
            Output::from([1.0, 10.0]),
            Output::from([2.0, 20.0]),
            Output::from([3.0, 30.0]),
        ];
        let columns = item_columns(0, outputs).unwrap();
        assert_eq!(columns, vec![array![1.0, 2.0, 3.0], array![10.0, 20.0, 30.0]]);
    }

    #[test]
    fn item_shapes_must_agree() {
        let outputs = vec![Output::from([1.0, 2.0]), Output::from([3.0])];
        assert_eq!(
            item_columns(1, outputs).unwrap_err(),
            ShapeError::Inconsistent {
                function: 1,
                item: 1
            }
        );

        let outputs = vec![Output::from(1.0), Output::from([3.0])];
        assert_eq!(
            item_columns(0, outputs).unwrap_err(),
            ShapeError::Inconsistent {
                function: 0,
                item: 1
            }
        );
    }

    #[test]
    fn item_matrix_is_rejected() {
        let outputs = vec![Output::from(array![[1.0]])];
        assert!(matches!(
            item_columns(0, outputs),
            Err(ShapeError::Rank { rank: 2, layout: Layout::PerItem, .. })
        ));
    }

    #[test]
    fn batches_join_in_order() {
        let outputs = vec![
            Output::from(array![[1.0, 2.0], [10.0, 20.0]]),
            Output::from(array![[3.0], [30.0]]),
        ];
        let columns = batch_columns(0, outputs, &[2, 1]).unwrap();
        assert_eq!(columns, vec![array![1.0, 2.0, 3.0], array![10.0, 20.0, 30.0]]);
    }

    #[test]
    fn batch_length_must_match_batch() {
        let outputs = vec![Output::from(vec![1.0, 2.0]), Output::from(vec![3.0, 4.0])];
        assert_eq!(
            batch_columns(2, outputs, &[2, 1]).unwrap_err(),
            ShapeError::BatchLength {
                function: 2,
                batch: 1,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn batch_column_counts_must_agree() {
        let outputs = vec![
            Output::from(vec![1.0]),
            Output::from(array![[2.0], [20.0]]),
        ];
        assert_eq!(
            batch_columns(0, outputs, &[1, 1]).unwrap_err(),
            ShapeError::BatchColumns {
                function: 0,
                batch: 1,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn maximized_columns_are_negated() {
        let columns = vec![array![1.0, 2.0], array![3.0, -4.0], array![5.0, 6.0]];
        let fitness = into_fitness(columns, 2, &array![1.0, -1.0, 1.0]).unwrap();

        let expected = array![[1.0, -3.0, 5.0], [2.0, 4.0, 6.0]];
        assert_relative_eq!(fitness, expected);
    }

    #[test]
    fn column_count_must_match_directions() {
        let err = into_fitness(vec![array![1.0]], 1, &array![1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::ColumnCount {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn column_length_must_match_population() {
        let err = into_fitness(vec![array![1.0, 2.0], array![3.0]], 2, &array![1.0, 1.0])
            .unwrap_err();
        assert_eq!(
            err,
            ShapeError::ColumnLength {
                column: 1,
                expected: 2,
                found: 1
            }
        );
    }
}
