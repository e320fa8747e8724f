//! **knapsweep** searches for near-optimal knapsack subsets with a
//! multi-objective evolutionary algorithm, then sweeps that algorithm's
//! crossover and mutation probabilities across many random seeds to find the
//! pair that most reliably reaches the best achievable value the fastest.
//!
//! The building blocks mirror the steps of a typical generational loop:
//! - [`items`] generates the deterministic problem instance for a seed
//! - [`evaluation`] maps candidate subsets to two-objective fitness tuples,
//!   penalizing infeasible selections
//! - [`variation`] recombines and mutates the set-encoded individuals
//! - [`selection`] truncates each generation with non-dominated sorting
//!   refined by crowding distances
//! - [`evolution`] wires the operators into a mu+lambda loop with
//!   per-generation statistics and a Pareto archive
//! - [`sweep`] runs the loop once per `(seed, cxpb, mutpb)` combination and
//!   ranks the probability pairs, while [`report`] persists the collected
//!   rows as a flat CSV table
//!
//! Unlike fixed-length genome approaches, individuals here are plain sets of
//! item indices: crossover and mutation freely grow and shrink them, and the
//! capacity constraint is enforced by the evaluator alone.
//!
//! Every run is reproducible from its seed: the seed generates the items and
//! the same stream then drives population initialization and variation, so
//! re-running a combination reproduces its summary bit for bit. Runs execute
//! strictly one at a time and never share state besides their own stream.
//!
//! # Example
//! ```
//! use knapsweep::sweep::{self, SweepConfig};
//!
//! let config = SweepConfig {
//!   seeds: vec![1],
//!   generations: 5,
//!   ..SweepConfig::default()
//! };
//! // one run per probability pair of the default grid
//! let rows = sweep::run(&config);
//! assert_eq!(rows.len(), 11);
//! let best = sweep::aggregate(&rows);
//! assert!(best.cxpb + best.mutpb > 0.99);
//! ```

#![warn(missing_docs)]

pub mod evaluation;
pub mod evolution;
pub mod fitness;
pub mod individual;
pub mod items;
pub mod pareto;
pub mod report;
pub mod selection;
pub mod stats;
pub mod sweep;
pub mod variation;
