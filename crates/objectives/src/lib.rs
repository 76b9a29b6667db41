//! Objective evaluation for population-based multi-objective optimizers.
//!
//! An evaluator takes a population of candidates and returns an `(n, k)`
//! fitness matrix: one row per candidate in input order, one column per
//! objective, with maximized objectives negated so that every column reads
//! "smaller is better".
//!
//! # Evaluators
//!
//! All four implement [`Evaluate`] and share the same configuration
//! ([`ObjectiveSet`]) and output contract. They differ in how user functions
//! are called:
//!
//! - [`Objective`] — each synchronous function is called once with the
//!   whole population
//! - [`ElementWiseObjective`] — each synchronous function is called once per
//!   candidate, sequentially
//! - [`BatchObjective`] — each asynchronous function is called once per
//!   fixed-size batch, with all batches in flight together
//! - [`AsyncElementWiseObjective`] — each asynchronous function is called once
//!   per candidate, with all calls in flight together
//!
//! The asynchronous evaluators run one function's calls concurrently on a
//! single thread and wait for all of them before moving to the next
//! function. The first failing call ends the wait, and no matrix is
//! returned.
//!
//! # Observer Events
//!
//! [`Evaluate::evaluate_observed`] reports an [`Event::Dispatched`] before
//! each function's calls start, then either [`Event::Completed`] or
//! [`Event::Failed`]. Observers cannot alter evaluation.
//!
//! # Example
//!
//! ```
//! use swarmfit_core::ObjectiveFn;
//! use swarmfit_objectives::{ElementWiseObjective, Evaluate, ObjectiveSet};
//!
//! let f = ObjectiveFn::infallible(|p: &Vec<f64>| p[0].powi(2));
//! let g = ObjectiveFn::infallible(|p: &Vec<f64>| (p[0] - 5.0).powi(2));
//!
//! let set = ObjectiveSet::builder([f, g])
//!     .directions_from_tokens(["minimize", "maximize"])
//!     .build()?;
//! let fitness = ElementWiseObjective::new(set).evaluate(&[vec![0.0], vec![5.0]])?;
//!
//! assert_eq!(fitness[[0, 1]], -25.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod async_element_wise;
mod batch;
mod calls;
mod element_wise;
mod error;
mod evaluate;
mod event;
mod normalize;
mod objective;
mod partition;
mod runtime;
mod set;

pub use async_element_wise::AsyncElementWiseObjective;
pub use batch::BatchObjective;
pub use element_wise::ElementWiseObjective;
pub use error::{Error, Layout, ShapeError};
pub use evaluate::{Evaluate, Variant};
pub use event::Event;
pub use objective::Objective;
pub use partition::partition;
pub use set::{ConfigError, ObjectiveSet, ObjectiveSetBuilder};
