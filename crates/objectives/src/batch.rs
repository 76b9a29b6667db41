use std::{convert::Infallible, num::NonZeroUsize};

use ndarray::{Array1, Array2};
use tracing::{debug, trace};

use swarmfit_core::{Convention, ObjectiveFn, Observer};

use crate::{
    ConfigError, Error, Evaluate, Event, ObjectiveSet, Variant, calls,
    event::{emit, settle},
    normalize, partition, runtime,
};

/// Calls asynchronous functions concurrently on fixed-size batches.
///
/// The population is split with [`partition`]. For each function in turn,
/// one call per batch is started and all of them are awaited together; the
/// next function starts only after the previous group has finished, so at
/// most one function's batches are in flight at a time.
///
/// Each call returns values for its batch the same way an [`Objective`]
/// function does for the whole population. Batch results are joined back in
/// candidate order.
///
/// [`Objective`]: crate::Objective
#[derive(Debug, Clone)]
pub struct BatchObjective<C> {
    set: ObjectiveSet<ObjectiveFn<[C]>>,
    batch_size: NonZeroUsize,
}

impl<C> BatchObjective<C> {
    /// Creates a batched evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BatchSize`] if `batch_size` is zero.
    pub fn new(set: ObjectiveSet<ObjectiveFn<[C]>>, batch_size: usize) -> Result<Self, ConfigError> {
        let batch_size = NonZeroUsize::new(batch_size).ok_or(ConfigError::BatchSize)?;
        Ok(Self { set, batch_size })
    }

    /// Returns the configured batch size.
    #[must_use]
    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Evaluates `items` on the caller's async runtime.
    ///
    /// # Errors
    ///
    /// See [`Evaluate::evaluate_observed`].
    pub async fn evaluate_async<Obs>(
        &self,
        items: &[C],
        mut observer: Obs,
    ) -> Result<Array2<f64>, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Infallible>,
    {
        calls::require(self.set.functions(), Convention::Async)?;

        let num_objectives = self.set.num_objectives();
        debug!(
            variant = %self.variant(),
            candidates = items.len(),
            objectives = num_objectives,
            batch_size = self.batch_size.get(),
            "evaluating population"
        );
        if items.is_empty() {
            return Ok(Array2::zeros((0, num_objectives)));
        }

        let batches = partition(items, self.batch_size);
        let lens: Vec<usize> = batches.iter().map(|batch| batch.len()).collect();

        let mut columns = Vec::with_capacity(num_objectives);
        for (function, f) in self.set.functions().iter().enumerate() {
            trace!(function, tasks = batches.len(), "dispatching batch group");
            emit(
                &mut observer,
                &Event::Dispatched {
                    function,
                    tasks: batches.len(),
                },
            );

            let result = run_group(function, f, &batches, &lens).await;
            columns.extend(settle(&mut observer, function, result)?);
        }

        Ok(normalize::into_fitness(columns, items.len(), &self.set.signs())?)
    }
}

async fn run_group<C>(
    function: usize,
    f: &ObjectiveFn<[C]>,
    batches: &[&[C]],
    lens: &[usize],
) -> Result<Vec<Array1<f64>>, Error> {
    let outputs = calls::join_group(function, f, batches.iter().copied()).await?;
    Ok(normalize::batch_columns(function, outputs, lens)?)
}

impl<C> Evaluate<C> for BatchObjective<C> {
    type Function = ObjectiveFn<[C]>;

    fn variant(&self) -> Variant {
        Variant::Batch
    }

    fn objectives(&self) -> &ObjectiveSet<ObjectiveFn<[C]>> {
        &self.set
    }

    fn evaluate_observed<Obs>(&self, items: &[C], observer: Obs) -> Result<Array2<f64>, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Infallible>,
    {
        runtime::block_on(self.evaluate_async(items, observer))?
    }
}
