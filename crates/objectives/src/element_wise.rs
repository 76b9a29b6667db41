use std::convert::Infallible;

use ndarray::Array2;
use tracing::{debug, trace};

use swarmfit_core::{Convention, ObjectiveFn, Observer};

use crate::{
    Error, Evaluate, Event, ObjectiveSet, Variant, calls,
    event::{emit, settle},
    normalize,
};

/// Calls each function once per candidate, sequentially.
///
/// A function returning a scalar contributes one column. A function
/// returning `k` values per candidate contributes `k` columns, in the order
/// of its values. Functions must be synchronous.
#[derive(Debug, Clone)]
pub struct ElementWiseObjective<C> {
    set: ObjectiveSet<ObjectiveFn<C>>,
}

impl<C> ElementWiseObjective<C> {
    /// Creates a per-item evaluator.
    #[must_use]
    pub fn new(set: ObjectiveSet<ObjectiveFn<C>>) -> Self {
        Self { set }
    }
}

impl<C> Evaluate<C> for ElementWiseObjective<C> {
    type Function = ObjectiveFn<C>;

    fn variant(&self) -> Variant {
        Variant::ElementWise
    }

    fn objectives(&self) -> &ObjectiveSet<ObjectiveFn<C>> {
        &self.set
    }

    fn evaluate_observed<Obs>(&self, items: &[C], mut observer: Obs) -> Result<Array2<f64>, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Infallible>,
    {
        calls::require(self.set.functions(), Convention::Sync)?;

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
            trace!(function, tasks = items.len(), "calling objective function per item");
            emit(
                &mut observer,
                &Event::Dispatched {
                    function,
                    tasks: items.len(),
                },
            );

            let result = items
                .iter()
                .map(|item| calls::call_sync(function, f, item))
                .collect::<Result<Vec<_>, _>>()
                .and_then(|outputs| {
                    normalize::item_columns(function, outputs).map_err(Error::from)
                });
            columns.extend(settle(&mut observer, function, result)?);
        }

        Ok(normalize::into_fitness(columns, items.len(), &self.set.signs())?)
    }
}
