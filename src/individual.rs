//! Set-encoded candidate solutions.

use std::collections::BTreeSet;

use rand::{rngs::StdRng, Rng};

use crate::fitness::Fitness;

/// A candidate knapsack content: a set of distinct item indices with a
/// lazily cached fitness.
///
/// The genome has no fixed length. Crossover and mutation freely grow and
/// shrink the membership, and only the evaluator constrains how large a
/// feasible individual may get. A missing fitness marks the individual as
/// stale: every membership change resets the cache, and the evolution loop
/// re-evaluates stale individuals before they take part in selection.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Individual {
  items: BTreeSet<usize>,
  fitness: Option<Fitness>,
}

impl Individual {
  /// Creates an individual from the given item indices.
  pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
    Self {
      items: indices.into_iter().collect(),
      fitness: None,
    }
  }

  /// Creates an individual of `size` indices drawn uniformly from
  /// `[0, universe)`. Duplicate draws collapse under set semantics, so the
  /// effective size may come out smaller than `size`.
  pub fn random(rng: &mut StdRng, universe: usize, size: usize) -> Self {
    Self::from_indices((0..size).map(|_| rng.gen_range(0..universe)))
  }

  /// Membership of the individual, iterated in ascending index order.
  pub fn items(&self) -> &BTreeSet<usize> {
    &self.items
  }

  /// Number of selected items.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Returns `true` if no item is selected.
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Returns `true` if `index` is selected.
  pub fn contains(&self, index: usize) -> bool {
    self.items.contains(&index)
  }

  /// Inserts an index, resetting the fitness cache if membership changed.
  /// Returns `true` if the index was newly inserted.
  pub fn insert(&mut self, index: usize) -> bool {
    let changed = self.items.insert(index);
    if changed {
      self.fitness = None;
    }
    changed
  }

  /// Removes an index, resetting the fitness cache if membership changed.
  /// Returns `true` if the index was present.
  pub fn remove(&mut self, index: usize) -> bool {
    let changed = self.items.remove(&index);
    if changed {
      self.fitness = None;
    }
    changed
  }

  /// Replaces the whole membership, resetting the fitness cache.
  pub fn replace(&mut self, items: BTreeSet<usize>) {
    self.items = items;
    self.fitness = None;
  }

  /// The cached fitness, or `None` while the individual is stale.
  pub fn fitness(&self) -> Option<Fitness> {
    self.fitness
  }

  /// Returns `true` if the cached fitness is missing or out of date.
  pub fn is_stale(&self) -> bool {
    self.fitness.is_none()
  }

  /// Stores an evaluated fitness, marking the individual as fresh.
  pub fn set_fitness(&mut self, fitness: Fitness) {
    self.fitness = Some(fitness);
  }
}
