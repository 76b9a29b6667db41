//! Core traits and types for the Swarmfit evaluation engine.
//!
//! This crate defines the shared vocabulary that evaluators and their callers
//! build on:
//!
//! - [`ObjectiveFn`] — a user-supplied objective function, synchronous or
//!   asynchronous
//! - [`Output`] — the raw, rank-tagged value an objective function returns
//! - [`Direction`] — whether an objective is minimized or maximized
//! - [`Observer`] — receives evaluation events and optionally returns actions

mod direction;
mod function;
mod observer;
mod output;

pub use direction::{Direction, ParseDirectionError};
pub use function::{BoxError, Convention, ObjectiveFn};
pub use observer::Observer;
pub use output::{Output, RaggedRowsError};
