//! Calling-convention checks and joint waits shared by the evaluators.

use futures::{TryFutureExt, future::try_join_all};

use swarmfit_core::{BoxError, Convention, ObjectiveFn, Output};

use crate::Error;

/// Checks every function's convention before anything is called.
pub(crate) fn require<In: ?Sized>(
    functions: &[ObjectiveFn<In>],
    expected: Convention,
) -> Result<(), Error> {
    match functions
        .iter()
        .position(|f| f.convention() != expected)
    {
        None => Ok(()),
        Some(function) => Err(mismatch(function, expected)),
    }
}

fn mismatch(function: usize, expected: Convention) -> Error {
    let found = match expected {
        Convention::Sync => Convention::Async,
        Convention::Async => Convention::Sync,
    };
    Error::CallingConvention {
        function,
        expected,
        found,
    }
}

/// Calls a synchronous function and tags any failure with its index.
pub(crate) fn call_sync<In: ?Sized>(
    function: usize,
    f: &ObjectiveFn<In>,
    input: &In,
) -> Result<Output, Error> {
    f.call_sync(input)
        .ok_or_else(|| mismatch(function, Convention::Sync))?
        .map_err(|source| Error::Function { function, source })
}

/// Starts one asynchronous call per input and waits for all of them.
///
/// Outputs come back in input order. The first failure resolves the wait
/// and drops every call still in flight, so a failed group yields nothing.
pub(crate) async fn join_group<'a, In, I>(
    function: usize,
    f: &ObjectiveFn<In>,
    inputs: I,
) -> Result<Vec<Output>, Error>
where
    In: ?Sized + 'a,
    I: IntoIterator<Item = &'a In>,
{
    let calls = inputs
        .into_iter()
        .map(|input| {
            f.call_async(input)
                .ok_or_else(|| mismatch(function, Convention::Async))
                .map(|call| {
                    call.map_err(move |source: BoxError| Error::Function { function, source })
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    try_join_all(calls).await
}
