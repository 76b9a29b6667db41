use std::{convert::Infallible, fmt};

use ndarray::Array2;

use swarmfit_core::Observer;

use crate::{Error, Event, ObjectiveSet};

/// The concrete evaluation strategy behind an [`Evaluate`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Objective,
    ElementWise,
    Batch,
    AsyncElementWise,
}

impl Variant {
    /// Returns the strategy name used to tag reported fitness records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Objective => "Objective",
            Self::ElementWise => "ElementWiseObjective",
            Self::Batch => "BatchObjective",
            Self::AsyncElementWise => "AsyncElementWiseObjective",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a population of candidates into a signed fitness matrix.
///
/// Row `i` of the returned `(n, k)` matrix belongs to `items[i]` and column
/// `j` to objective `j`, already multiplied by that objective's direction
/// sign. Implementations differ only in how they call the user functions.
pub trait Evaluate<C> {
    /// The objective function type this strategy calls.
    type Function;

    /// Returns which strategy this is.
    fn variant(&self) -> Variant;

    /// Returns the validated configuration.
    fn objectives(&self) -> &ObjectiveSet<Self::Function>;

    /// Evaluates `items`, reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a function has the wrong calling convention,
    /// a function fails, or the outputs cannot be shaped into the matrix.
    /// No partial matrix is ever returned.
    fn evaluate_observed<Obs>(&self, items: &[C], observer: Obs) -> Result<Array2<f64>, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Infallible>;

    /// Evaluates `items` without observer support.
    ///
    /// # Errors
    ///
    /// See [`evaluate_observed`](Self::evaluate_observed).
    fn evaluate(&self, items: &[C]) -> Result<Array2<f64>, Error> {
        self.evaluate_observed(items, ())
    }
}
