use ndarray::{Array1, Array2};
use thiserror::Error;

use swarmfit_core::Direction;

/// The validated configuration shared by every evaluator.
///
/// An `ObjectiveSet` holds the objective functions together with one
/// direction and one name per fitness column. It is immutable once built;
/// [`ObjectiveSet::builder`] is the only way to create one, and it rejects
/// inconsistent configurations before any evaluation can happen.
///
/// `F` is the function type, which differs between calling conventions.
#[derive(Debug, Clone)]
pub struct ObjectiveSet<F> {
    functions: Vec<F>,
    directions: Vec<Direction>,
    names: Vec<String>,
    reference_front: Option<Array2<f64>>,
}

/// Errors that can occur when validating an objective configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one objective function is required")]
    NoFunctions,

    #[error("num_objectives must be at least 1")]
    ZeroObjectives,

    #[error("direction must be either 'minimize' or 'maximize', got '{0}'")]
    InvalidDirection(String),

    #[error("number of directions ({found}) does not match number of objectives ({expected})")]
    DirectionCount { expected: usize, found: usize },

    #[error("number of objective names ({found}) does not match number of objectives ({expected})")]
    NameCount { expected: usize, found: usize },

    #[error("batch_size must be at least 1")]
    BatchSize,
}

impl<F> ObjectiveSet<F> {
    /// Starts building a set from one or more objective functions.
    ///
    /// A single function can be passed as `[f]`.
    pub fn builder(functions: impl IntoIterator<Item = F>) -> ObjectiveSetBuilder<F> {
        ObjectiveSetBuilder {
            functions: functions.into_iter().collect(),
            num_objectives: None,
            directions: None,
            names: None,
            reference_front: None,
        }
    }

    /// Creates a set with one minimized objective per function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoFunctions`] if `functions` is empty.
    pub fn new(functions: impl IntoIterator<Item = F>) -> Result<Self, ConfigError> {
        Self::builder(functions).build()
    }

    /// Returns the objective functions in declaration order.
    #[must_use]
    pub fn functions(&self) -> &[F] {
        &self.functions
    }

    /// Returns the number of fitness columns.
    #[must_use]
    pub fn num_objectives(&self) -> usize {
        self.directions.len()
    }

    /// Returns the direction of each fitness column.
    #[must_use]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Returns the name of each fitness column.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the known Pareto front, if one was supplied.
    ///
    /// The front is passed through untouched for benchmarking by callers.
    #[must_use]
    pub fn reference_front(&self) -> Option<&Array2<f64>> {
        self.reference_front.as_ref()
    }

    /// Returns the per-column multipliers (`+1` minimize, `-1` maximize).
    #[must_use]
    pub fn signs(&self) -> Array1<f64> {
        self.directions.iter().map(|d| d.sign()).collect()
    }
}

/// Builder for [`ObjectiveSet`].
///
/// Every setting is optional. `num_objectives` defaults to the number of
/// functions, directions default to [`Direction::Minimize`], and names
/// default to `objective_<i>`.
#[derive(Debug)]
pub struct ObjectiveSetBuilder<F> {
    functions: Vec<F>,
    num_objectives: Option<usize>,
    directions: Option<Vec<Result<Direction, ConfigError>>>,
    names: Option<Vec<String>>,
    reference_front: Option<Array2<f64>>,
}

impl<F> ObjectiveSetBuilder<F> {
    /// Sets the number of fitness columns.
    ///
    /// Required when a single function yields more than one column.
    #[must_use]
    pub fn num_objectives(mut self, num_objectives: usize) -> Self {
        self.num_objectives = Some(num_objectives);
        self
    }

    /// Sets one direction per fitness column.
    #[must_use]
    pub fn directions(mut self, directions: impl IntoIterator<Item = Direction>) -> Self {
        self.directions = Some(directions.into_iter().map(Ok).collect());
        self
    }

    /// Sets one direction per fitness column from `"minimize"` / `"maximize"`.
    ///
    /// Unknown tokens are reported by [`build`](Self::build), after the
    /// number of directions has been checked.
    #[must_use]
    pub fn directions_from_tokens<S: AsRef<str>>(
        mut self,
        tokens: impl IntoIterator<Item = S>,
    ) -> Self {
        let parsed = tokens
            .into_iter()
            .map(|token| {
                token
                    .as_ref()
                    .parse::<Direction>()
                    .map_err(|err| ConfigError::InvalidDirection(err.0))
            })
            .collect();
        self.directions = Some(parsed);
        self
    }

    /// Sets one name per fitness column.
    #[must_use]
    pub fn names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches a known Pareto front.
    ///
    /// The front is stored as given and never validated or read here.
    #[must_use]
    pub fn reference_front(mut self, front: Array2<f64>) -> Self {
        self.reference_front = Some(front);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the function list is empty, a direction
    /// token is invalid, or the directions or names disagree with the
    /// number of objectives.
    pub fn build(self) -> Result<ObjectiveSet<F>, ConfigError> {
        if self.functions.is_empty() {
            return Err(ConfigError::NoFunctions);
        }

        let expected = self.num_objectives.unwrap_or(self.functions.len());
        if expected == 0 {
            return Err(ConfigError::ZeroObjectives);
        }

        let directions = match self.directions {
            None => vec![Direction::Minimize; expected],
            Some(directions) if directions.len() != expected => {
                return Err(ConfigError::DirectionCount {
                    expected,
                    found: directions.len(),
                });
            }
            Some(directions) => directions.into_iter().collect::<Result<Vec<_>, _>>()?,
        };

        let names = match self.names {
            None => (0..expected).map(|i| format!("objective_{i}")).collect(),
            Some(names) if names.len() != expected => {
                return Err(ConfigError::NameCount {
                    expected,
                    found: names.len(),
                });
            }
            Some(names) => names,
        };

        Ok(ObjectiveSet {
            functions: self.functions,
            directions,
            names,
            reference_front: self.reference_front,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    fn set_of(n: usize) -> ObjectiveSetBuilder<usize> {
        ObjectiveSet::builder(0..n)
    }

    #[test]
    fn defaults_follow_function_count() {
        let set = ObjectiveSet::new([10, 20]).unwrap();

        assert_eq!(set.functions(), &[10, 20]);
        assert_eq!(set.num_objectives(), 2);
        assert_eq!(set.directions(), &[Direction::Minimize; 2]);
        assert_eq!(set.names(), &["objective_0", "objective_1"]);
        assert!(set.reference_front().is_none());
    }

    #[test]
    fn explicit_count_covers_multi_column_function() {
        let set = set_of(1)
            .num_objectives(3)
            .directions_from_tokens(["minimize", "maximize", "minimize"])
            .names(["cost", "yield", "mass"])
            .build()
            .unwrap();

        assert_eq!(set.num_objectives(), 3);
        assert_eq!(set.signs(), array![1.0, -1.0, 1.0]);
        assert_eq!(set.names()[1], "yield");
    }

    #[test]
    fn rejects_direction_count_mismatch() {
        let err = set_of(2)
            .directions([Direction::Minimize, Direction::Maximize, Direction::Minimize])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::DirectionCount {
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "number of directions (3) does not match number of objectives (2)"
        );
    }

    #[test]
    fn rejects_invalid_direction_token() {
        let err = set_of(2)
            .directions_from_tokens(["minimize", "largest"])
            .build()
            .unwrap_err();

        assert_eq!(err, ConfigError::InvalidDirection("largest".into()));
    }

    #[test]
    fn rejects_name_count_mismatch() {
        let err = set_of(2).names(["only"]).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::NameCount {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_empty_and_zero() {
        assert_eq!(set_of(0).build().unwrap_err(), ConfigError::NoFunctions);
        assert_eq!(
            set_of(1).num_objectives(0).build().unwrap_err(),
            ConfigError::ZeroObjectives
        );
    }

    #[test]
    fn reference_front_is_passed_through_unchanged() {
        let front = array![[0.0, 1.0, 2.0], [2.0, 1.0, 0.0]];
        let set = set_of(2).reference_front(front.clone()).build().unwrap();
        assert_eq!(set.reference_front(), Some(&front));

        let placeholder = Array2::<f64>::zeros((0, 0));
        let set = set_of(2).reference_front(placeholder.clone()).build().unwrap();
        assert_eq!(set.reference_front(), Some(&placeholder));
    }

    #[test]
    fn direction_count_is_checked_before_tokens() {
        let err = set_of(2)
            .directions_from_tokens(["minimize", "largest", "maximize"])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::DirectionCount {
                expected: 2,
                found: 3
            }
        );
    }
}
