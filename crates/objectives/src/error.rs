use std::fmt;

use thiserror::Error;

use swarmfit_core::{BoxError, Convention};

/// Errors that can occur while evaluating a population.
#[derive(Debug, Error)]
pub enum Error {
    /// A function does not use the calling convention the evaluator requires.
    ///
    /// Detected before any function is called.
    #[error("objective function {function} is {found}, but this evaluator requires {expected} functions")]
    CallingConvention {
        function: usize,
        expected: Convention,
        found: Convention,
    },

    /// A user-supplied function returned an error.
    ///
    /// The user's error is kept, unchanged, as the source.
    #[error("objective function {function} failed")]
    Function {
        function: usize,
        #[source]
        source: BoxError,
    },

    /// Raw function outputs could not be arranged into a fitness matrix.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The async runtime driving concurrent calls could not be started.
    #[error("failed to start async runtime")]
    Runtime(#[source] std::io::Error),

    /// A blocking evaluation was requested from inside an async runtime.
    #[error("blocking evaluation called inside an async runtime; use evaluate_async")]
    NestedRuntime,
}

/// How a function call relates to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One call receives many candidates (whole population or a batch).
    Population,

    /// One call receives a single candidate.
    PerItem,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Population => "population",
            Self::PerItem => "per-item",
        })
    }
}

/// Errors that occur when raw outputs do not fit the fitness matrix.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    #[error("objective function {function} returned a rank-{rank} value, which {layout} calls do not accept")]
    Rank {
        function: usize,
        rank: usize,
        layout: Layout,
    },

    #[error("objective function {function} returned a differently shaped value for item {item}")]
    Inconsistent { function: usize, item: usize },

    #[error("objective function {function} returned {found} columns for batch {batch}, expected {expected}")]
    BatchColumns {
        function: usize,
        batch: usize,
        expected: usize,
        found: usize,
    },

    #[error("objective function {function} returned {found} values for batch {batch}, expected {expected}")]
    BatchLength {
        function: usize,
        batch: usize,
        expected: usize,
        found: usize,
    },

    #[error("objective functions produced {found} columns, expected {expected}")]
    ColumnCount { expected: usize, found: usize },

    #[error("fitness column {column} has {found} values, expected {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        found: usize,
    },
}
