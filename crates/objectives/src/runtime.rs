use std::future::Future;

use tokio::runtime::{Builder, Handle};

use crate::Error;

/// Drives `future` to completion on a fresh single-threaded runtime.
///
/// Every task of a group interleaves on the calling thread. Returns
/// [`Error::NestedRuntime`] when called from inside another tokio runtime,
/// where blocking would panic; async callers use the evaluators'
/// `evaluate_async` methods instead.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, Error> {
    if Handle::try_current().is_ok() {
        return Err(Error::NestedRuntime);
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;
    Ok(runtime.block_on(future))
}
