//! Knapsack problem instances.

use std::ops::Index;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// The number of items a default problem instance contains.
pub const DEFAULT_ITEM_COUNT: usize = 20;

/// A single item that can be put into the knapsack.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Item {
  /// Weight of the item.
  pub weight: u32,
  /// Value of the item.
  pub value: f64,
}

/// An immutable problem instance: items addressed by indices in `0..len`.
///
/// An instance is generated once per run seed and shared read-only by every
/// individual of that run.
#[derive(Clone, PartialEq, Debug)]
pub struct ItemSet {
  items: Vec<Item>,
}

impl ItemSet {
  /// Creates an instance from explicitly given items.
  pub fn new(items: Vec<Item>) -> Self {
    Self { items }
  }

  /// Draws `count` items from `rng`: weights are uniform integers in
  /// `[1, 10]`, values are uniform reals in `[0, 100)`.
  ///
  /// Drawing from the same stream that later feeds the evolution loop makes
  /// the whole run reproducible from the seed of that stream alone.
  pub fn generate(rng: &mut StdRng, count: usize) -> Self {
    let items = (0..count)
      .map(|_| Item {
        weight: rng.gen_range(1..=10),
        value: rng.gen_range(0.0..100.0),
      })
      .collect();
    Self { items }
  }

  /// Seeds a fresh random stream and draws `count` items from it. Identical
  /// seeds and counts always yield identical instances.
  pub fn from_seed(seed: u64, count: usize) -> Self {
    Self::generate(&mut StdRng::seed_from_u64(seed), count)
  }

  /// Number of items in the instance.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Returns `true` if the instance has no items.
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

impl Index<usize> for ItemSet {
  type Output = Item;

  fn index(&self, index: usize) -> &Item {
    &self.items[index]
  }
}
