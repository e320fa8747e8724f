//! The archive of historically non-dominated individuals.

use std::cmp::Ordering;

use crate::individual::Individual;

/// A de-duplicated archive of the pairwise non-dominated individuals seen
/// across a whole run.
///
/// The archive stores independent clones, so later mutation of the evolving
/// population cannot retroactively corrupt archived members.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ParetoFront {
  members: Vec<Individual>,
}

impl ParetoFront {
  /// Creates an empty archive.
  pub fn new() -> Self {
    Self::default()
  }

  /// Offers every individual of `population` to the archive.
  pub fn update(&mut self, population: &[Individual]) {
    for individual in population {
      self.insert(individual);
    }
  }

  /// Offers one evaluated individual to the archive. The candidate enters
  /// unless an archived member dominates it or already carries the same
  /// membership; on entry it evicts every member it dominates.
  ///
  /// # Panics
  ///
  /// Panics if the candidate carries no fitness.
  pub fn insert(&mut self, candidate: &Individual) {
    let fitness = candidate
      .fitness()
      .expect("archive candidates must be evaluated");
    for member in &self.members {
      if member.items() == candidate.items() {
        return;
      }
      let member_fitness =
        member.fitness().expect("archived individuals are evaluated");
      if member_fitness.dominance(&fitness) == Ordering::Less {
        return;
      }
    }
    self.members.retain(|member| {
      let member_fitness =
        member.fitness().expect("archived individuals are evaluated");
      fitness.dominance(&member_fitness) != Ordering::Less
    });
    self.members.push(candidate.clone());
  }

  /// Archived individuals in insertion order.
  pub fn members(&self) -> &[Individual] {
    &self.members
  }

  /// Number of archived individuals.
  pub fn len(&self) -> usize {
    self.members.len()
  }

  /// Returns `true` if nothing has been archived yet.
  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fitness::Fitness;

  fn evaluated(indices: &[usize], weight: f64, value: f64) -> Individual {
    let mut ind = Individual::from_indices(indices.iter().copied());
    ind.set_fitness(Fitness { weight, value });
    ind
  }

  #[test]
  fn test_incomparable_members_accumulate() {
    let mut front = ParetoFront::new();
    front.insert(&evaluated(&[0], 1.0, 10.0));
    front.insert(&evaluated(&[1], 2.0, 20.0));
    assert_eq!(front.len(), 2);
  }

  #[test]
  fn test_dominated_candidates_are_rejected() {
    let mut front = ParetoFront::new();
    front.insert(&evaluated(&[0], 1.0, 10.0));
    front.insert(&evaluated(&[1], 2.0, 5.0));
    assert_eq!(front.len(), 1);
    assert_eq!(front.members()[0], evaluated(&[0], 1.0, 10.0));
  }

  #[test]
  fn test_entering_candidates_evict_dominated_members() {
    let mut front = ParetoFront::new();
    front.insert(&evaluated(&[0], 3.0, 10.0));
    front.insert(&evaluated(&[1], 5.0, 20.0));
    // dominates both archived members
    front.insert(&evaluated(&[2], 2.0, 30.0));
    assert_eq!(front.len(), 1);
    assert_eq!(front.members()[0], evaluated(&[2], 2.0, 30.0));
  }

  #[test]
  fn test_duplicate_memberships_are_skipped() {
    let mut front = ParetoFront::new();
    front.insert(&evaluated(&[0, 1], 1.0, 10.0));
    front.insert(&evaluated(&[0, 1], 1.0, 10.0));
    assert_eq!(front.len(), 1);
  }

  #[test]
  fn test_archived_clones_are_independent() {
    let mut front = ParetoFront::new();
    let mut original = evaluated(&[0, 1], 1.0, 10.0);
    front.insert(&original);
    original.insert(7);
    assert_eq!(front.members()[0], evaluated(&[0, 1], 1.0, 10.0));
  }
}
