use std::convert::Infallible;

use ndarray::{Array1, Array2};
use tracing::{debug, trace};

use swarmfit_core::{Convention, ObjectiveFn, Observer};

use crate::{
    Error, Evaluate, Event, ObjectiveSet, Variant, calls,
    event::{emit, settle},
    normalize, runtime,
};

/// Calls asynchronous functions concurrently, one call per candidate.
///
/// For each function in turn, every candidate's call is started and all are
/// awaited together; functions never overlap each other. Results are shaped
/// as in [`ElementWiseObjective`].
///
/// [`ElementWiseObjective`]: crate::ElementWiseObjective
#[derive(Debug, Clone)]
pub struct AsyncElementWiseObjective<C> {
    set: ObjectiveSet<ObjectiveFn<C>>,
}

impl<C> AsyncElementWiseObjective<C> {
    /// Creates a concurrent per-item evaluator.
    #[must_use]
    pub fn new(set: ObjectiveSet<ObjectiveFn<C>>) -> Self {
        Self { set }
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
            "evaluating population"
        );
        if items.is_empty() {
            return Ok(Array2::zeros((0, num_objectives)));
        }

        let mut columns = Vec::with_capacity(num_objectives);
        for (function, f) in self.set.functions().iter().enumerate() {
            trace!(function, tasks = items.len(), "dispatching per-item group");
            emit(
                &mut observer,
                &Event::Dispatched {
                    function,
                    tasks: items.len(),
                },
            );

            let result = run_group(function, f, items).await;
            columns.extend(settle(&mut observer, function, result)?);
        }

        Ok(normalize::into_fitness(columns, items.len(), &self.set.signs())?)
    }
}

async fn run_group<C>(
    function: usize,
    f: &ObjectiveFn<C>,
    items: &[C],
) -> Result<Vec<Array1<f64>>, Error> {
    let outputs = calls::join_group(function, f, items).await?;
    Ok(normalize::item_columns(function, outputs)?)
}

impl<C> Evaluate<C> for AsyncElementWiseObjective<C> {
    type Function = ObjectiveFn<C>;

    fn variant(&self) -> Variant {
        Variant::AsyncElementWise
    }

    fn objectives(&self) -> &ObjectiveSet<ObjectiveFn<C>> {
        &self.set
    }

    fn evaluate_observed<Obs>(&self, items: &[C], observer: Obs) -> Result<Array2<f64>, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Infallible>,
    {
        runtime::block_on(self.evaluate_async(items, observer))?
    }
}
