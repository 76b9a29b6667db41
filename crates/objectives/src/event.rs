use std::convert::Infallible;

use ndarray::Array1;
use tracing::warn;

use swarmfit_core::Observer;

use crate::Error;

/// Events emitted while an evaluator works through its functions.
///
/// Each declared function produces a `Dispatched` event followed by exactly
/// one of `Completed` or `Failed`. Events are informational: evaluation
/// cannot be steered or cancelled by an observer.
#[derive(Debug)]
pub enum Event<'a> {
    /// Calls for a function are about to start.
    Dispatched {
        /// Index of the function in declaration order.
        function: usize,

        /// Number of calls in the group (1, one per batch, or one per item).
        tasks: usize,
    },

    /// All calls for a function succeeded and their outputs were shaped.
    Completed {
        /// Index of the function in declaration order.
        function: usize,

        /// Number of fitness columns the function contributed.
        columns: usize,
    },

    /// A function's group failed; evaluation stops with `error`.
    Failed {
        /// Index of the function in declaration order.
        function: usize,

        /// The error about to be returned.
        error: &'a Error,
    },
}

pub(crate) fn emit<Obs>(observer: &mut Obs, event: &Event<'_>)
where
    Obs: for<'a> Observer<Event<'a>, Infallible>,
{
    if let Some(action) = observer.observe(event) {
        match action {}
    }
}

/// Reports how a function's group ended and passes the result through.
pub(crate) fn settle<Obs>(
    observer: &mut Obs,
    function: usize,
    result: Result<Vec<Array1<f64>>, Error>,
) -> Result<Vec<Array1<f64>>, Error>
where
    Obs: for<'a> Observer<Event<'a>, Infallible>,
{
    match result {
        Ok(columns) => {
            emit(
                observer,
                &Event::Completed {
                    function,
                    columns: columns.len(),
                },
            );
            Ok(columns)
        }
        Err(error) => {
            warn!(function, %error, "objective function group failed");
            emit(observer, &Event::Failed { function, error: &error });
            Err(error)
        }
    }
}
