use std::{fmt, future::Future, sync::Arc};

use futures::future::BoxFuture;

use crate::Output;

/// A boxed error raised by user code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type SyncCall<In> = dyn Fn(&In) -> Result<Output, BoxError> + Send + Sync;
type AsyncCall<In> = dyn Fn(&In) -> BoxFuture<'static, Result<Output, BoxError>> + Send + Sync;

/// Whether a function completes on the calling thread or returns a future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    Sync,
    Async,
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sync => "synchronous",
            Self::Async => "asynchronous",
        })
    }
}

/// A user-supplied objective function.
///
/// `In` is what a single call receives: a slice of candidates for
/// population-level conventions, or one candidate for per-item conventions.
/// Asynchronous functions receive a borrowed input and must return a
/// `'static` future, so they clone whatever they need before suspending.
///
/// Cloning is cheap; the underlying callable is shared.
pub struct ObjectiveFn<In: ?Sized> {
    call: Call<In>,
}

enum Call<In: ?Sized> {
    Sync(Arc<SyncCall<In>>),
    Async(Arc<AsyncCall<In>>),
}

impl<In: ?Sized + 'static> ObjectiveFn<In> {
    /// Wraps a fallible synchronous function.
    pub fn from_fn<F, O, E>(f: F) -> Self
    where
        F: Fn(&In) -> Result<O, E> + Send + Sync + 'static,
        O: Into<Output>,
        E: Into<BoxError>,
    {
        let call = move |input: &In| -> Result<Output, BoxError> {
            f(input).map(Into::into).map_err(Into::into)
        };
        Self {
            call: Call::Sync(Arc::new(call)),
        }
    }

    /// Wraps a synchronous function that cannot fail.
    pub fn infallible<F, O>(f: F) -> Self
    where
        F: Fn(&In) -> O + Send + Sync + 'static,
        O: Into<Output>,
    {
        let call = move |input: &In| -> Result<Output, BoxError> { Ok(f(input).into()) };
        Self {
            call: Call::Sync(Arc::new(call)),
        }
    }

    /// Wraps an asynchronous function.
    pub fn from_async<F, Fut, O, E>(f: F) -> Self
    where
        F: Fn(&In) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
        O: Into<Output> + 'static,
        E: Into<BoxError> + 'static,
    {
        let call = move |input: &In| -> BoxFuture<'static, Result<Output, BoxError>> {
            let fut = f(input);
            Box::pin(async move {
                let result: Result<Output, BoxError> =
                    fut.await.map(Into::into).map_err(Into::into);
                result
            })
        };
        Self {
            call: Call::Async(Arc::new(call)),
        }
    }
}

impl<In: ?Sized> ObjectiveFn<In> {
    /// Returns the calling convention of this function.
    #[must_use]
    pub fn convention(&self) -> Convention {
        match self.call {
            Call::Sync(_) => Convention::Sync,
            Call::Async(_) => Convention::Async,
        }
    }

    /// Calls a synchronous function.
    ///
    /// Returns `None` without calling anything if the function is asynchronous.
    pub fn call_sync(&self, input: &In) -> Option<Result<Output, BoxError>> {
        match &self.call {
            Call::Sync(f) => Some(f(input)),
            Call::Async(_) => None,
        }
    }

    /// Starts an asynchronous call.
    ///
    /// Returns `None` without calling anything if the function is synchronous.
    /// The returned future does nothing until polled.
    pub fn call_async(&self, input: &In) -> Option<BoxFuture<'static, Result<Output, BoxError>>> {
        match &self.call {
            Call::Async(f) => Some(f(input)),
            Call::Sync(_) => None,
        }
    }
}

impl<In: ?Sized> Clone for ObjectiveFn<In> {
    fn clone(&self) -> Self {
        let call = match &self.call {
            Call::Sync(f) => Call::Sync(Arc::clone(f)),
            Call::Async(f) => Call::Async(Arc::clone(f)),
        };
        Self { call }
    }
}

impl<In: ?Sized> fmt::Debug for ObjectiveFn<In> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectiveFn")
            .field("convention", &self.convention())
            .finish_non_exhaustive()
    }
}
