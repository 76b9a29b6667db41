//! Evaluates a population against a slow "remote" simulator in batches,
//! printing observer events as each function group runs.

use std::{convert::Infallible, time::Duration};

use swarmfit_core::ObjectiveFn;
use swarmfit_objectives::{BatchObjective, Evaluate, Event, ObjectiveSet};

/// Pretends to call a remote service that scores a whole batch at once.
async fn simulate(batch: Vec<Vec<f64>>) -> Result<Vec<Vec<f64>>, Infallible> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(batch
        .iter()
        .map(|p| {
            let drag = p[0].powi(2) + p[1].powi(2);
            let lift = 4.0 - (p[0] - 1.0).powi(2) - (p[1] - 1.0).powi(2);
            vec![drag, lift]
        })
        .collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let simulator = ObjectiveFn::from_async(|batch: &[Vec<f64>]| {
        let batch = batch.to_vec();
        async move {
            // The service answers one row per candidate; the engine expects
            // one row per objective.
            let rows = simulate(batch).await?;
            let n = rows.len();
            let mut stacked = ndarray::Array2::zeros((2, n));
            for (i, row) in rows.iter().enumerate() {
                stacked[[0, i]] = row[0];
                stacked[[1, i]] = row[1];
            }
            Ok::<_, Infallible>(stacked)
        }
    });

    let set = ObjectiveSet::builder([simulator])
        .num_objectives(2)
        .directions_from_tokens(["minimize", "maximize"])
        .names(["drag", "lift"])
        .build()?;
    let objective = BatchObjective::new(set, 4)?;

    let population: Vec<Vec<f64>> = (0..10)
        .map(|i| {
            let t = f64::from(i) / 9.0;
            vec![2.0 * t, 1.0 - t]
        })
        .collect();

    let fitness = objective.evaluate_observed(&population, |event: &Event<'_>| -> Option<Infallible> {
        println!("{event:?}");
        None
    })?;

    println!("{}: {:?}", objective.variant(), objective.objectives().names());
    for (p, row) in population.iter().zip(fitness.rows()) {
        println!("{p:?} -> {row}");
    }
    Ok(())
}
