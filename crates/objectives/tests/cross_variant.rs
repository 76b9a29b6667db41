use std::convert::Infallible;

use approx::assert_relative_eq;
use ndarray::{Array2, array};

use swarmfit_core::{Direction, ObjectiveFn};
use swarmfit_objectives::{
    AsyncElementWiseObjective, BatchObjective, ElementWiseObjective, Error, Evaluate, Objective,
    ObjectiveSet,
};

type Point = Vec<f64>;

fn f(p: &Point) -> f64 {
    p[0].powi(2)
}

fn g(p: &Point) -> f64 {
    (p[0] - 5.0).powi(2)
}

fn vectorized(h: fn(&Point) -> f64) -> ObjectiveFn<[Point]> {
    ObjectiveFn::infallible(move |items: &[Point]| items.iter().map(h).collect::<Vec<_>>())
}

fn per_item(h: fn(&Point) -> f64) -> ObjectiveFn<Point> {
    ObjectiveFn::infallible(h)
}

fn batched(h: fn(&Point) -> f64) -> ObjectiveFn<[Point]> {
    ObjectiveFn::from_async(move |batch: &[Point]| {
        let values: Vec<f64> = batch.iter().map(h).collect();
        async move {
            tokio::task::yield_now().await;
            Ok::<_, Infallible>(values)
        }
    })
}

fn per_item_async(h: fn(&Point) -> f64) -> ObjectiveFn<Point> {
    ObjectiveFn::from_async(move |p: &Point| {
        let value = h(p);
        async move {
            tokio::task::yield_now().await;
            Ok::<_, Infallible>(value)
        }
    })
}

fn configured<F>(functions: [F; 2], directions: [Direction; 2]) -> ObjectiveSet<F> {
    ObjectiveSet::builder(functions)
        .directions(directions)
        .build()
        .expect("valid config")
}

fn all_variants(directions: [Direction; 2], items: &[Point]) -> Vec<(String, Array2<f64>)> {
    let set = |functions| configured(functions, directions);
    let set_items = |functions| configured(functions, directions);

    let mut results = Vec::new();

    let objective = Objective::new(set([vectorized(f), vectorized(g)]));
    results.push((objective.variant().to_string(), objective.evaluate(items).unwrap()));

    let objective = ElementWiseObjective::new(set_items([per_item(f), per_item(g)]));
    results.push((objective.variant().to_string(), objective.evaluate(items).unwrap()));

    let objective = BatchObjective::new(set([batched(f), batched(g)]), 2).unwrap();
    results.push((objective.variant().to_string(), objective.evaluate(items).unwrap()));

    let objective = AsyncElementWiseObjective::new(set_items([per_item_async(f), per_item_async(g)]));
    results.push((objective.variant().to_string(), objective.evaluate(items).unwrap()));

    results
}

#[test]
fn minimize_pair_matches_known_values() {
    let items = vec![vec![0.0], vec![5.0], vec![2.5]];
    let expected = array![[0.0, 25.0], [25.0, 0.0], [6.25, 6.25]];

    for (variant, fitness) in all_variants([Direction::Minimize; 2], &items) {
        assert_eq!(fitness.dim(), (3, 2), "{variant}");
        assert_relative_eq!(fitness, expected);
    }
}

#[test]
fn variants_agree_and_negate_maximized_columns() {
    let items: Vec<Point> = (0..11).map(|i| vec![f64::from(i) * 0.7 - 1.0]).collect();
    let directions = [Direction::Maximize, Direction::Minimize];

    let results = all_variants(directions, &items);
    let (_, reference) = &results[0];

    for (i, p) in items.iter().enumerate() {
        assert_relative_eq!(reference[[i, 0]], -f(p));
        assert_relative_eq!(reference[[i, 1]], g(p));
    }
    for (variant, fitness) in &results[1..] {
        assert_eq!(fitness.dim(), (items.len(), 2), "{variant}");
        assert_relative_eq!(fitness, reference);
    }
}

#[test]
fn variant_names_are_distinct() {
    let items = vec![vec![1.0]];
    let names: Vec<String> = all_variants([Direction::Minimize; 2], &items)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    assert_eq!(
        names,
        vec![
            "Objective",
            "ElementWiseObjective",
            "BatchObjective",
            "AsyncElementWiseObjective"
        ]
    );
}

#[test]
fn config_errors_prevent_construction() {
    let err = ObjectiveSet::builder([per_item(f), per_item(g)])
        .directions_from_tokens(["minimize", "minimize", "maximize"])
        .build()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "number of directions (3) does not match number of objectives (2)"
    );
}

#[test]
fn failed_batch_yields_no_matrix() {
    let flaky = ObjectiveFn::from_async(|batch: &[Point]| {
        let values: Vec<f64> = batch.iter().map(f).collect();
        let poisoned = batch.iter().any(|p| p[0].is_nan());
        async move {
            if poisoned {
                Err("simulation rejected NaN input")
            } else {
                Ok(values)
            }
        }
    });
    let set = ObjectiveSet::new([flaky, batched(g)]).unwrap();
    let objective = BatchObjective::new(set, 2).unwrap();

    let result = objective.evaluate(&[vec![1.0], vec![2.0], vec![f64::NAN]]);

    assert!(matches!(result, Err(Error::Function { function: 0, .. })));
}
