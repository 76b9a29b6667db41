use std::convert::Infallible;

use ndarray::Array2;
use tracing::{debug, trace};

use swarmfit_core::{Convention, ObjectiveFn, Observer};

use crate::{
    Error, Evaluate, Event, ObjectiveSet, Variant, calls,
    event::{emit, settle},
    normalize,
};

/// Calls each function once with the whole population.
///
/// Each function returns either one value per candidate (a vector) or one
/// row per objective it computes (a `(k, n)` matrix). Functions must be
/// synchronous and run in declaration order.
#[derive(Debug, Clone)]
pub struct Objective<C> {
    set: ObjectiveSet<ObjectiveFn<[C]>>,
}

impl<C> Objective<C> {
    /// Creates a vectorized evaluator.
    #[must_use]
    pub fn new(set: ObjectiveSet<ObjectiveFn<[C]>>) -> Self {
        Self { set }
    }
}

impl<C> Evaluate<C> for Objective<C> {
    type Function = ObjectiveFn<[C]>;

    fn variant(&self) -> Variant {
        Variant::Objective
    }

    fn objectives(&self) -> &ObjectiveSet<ObjectiveFn<[C]>> {
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
            trace!(function, "calling objective function");
            emit(&mut observer, &Event::Dispatched { function, tasks: 1 });

            let result = calls::call_sync(function, f, items).and_then(|output| {
                normalize::population_columns(function, output).map_err(Error::from)
            });
            columns.extend(settle(&mut observer, function, result)?);
        }

        Ok(normalize::into_fitness(columns, items.len(), &self.set.signs())?)
    }
}
