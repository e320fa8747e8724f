//! Fitness evaluation operators.

use std::collections::BTreeSet;

use crate::{fitness::Fitness, items::ItemSet};

/// The largest membership a feasible individual may have.
pub const MAX_ITEMS: usize = 50;

/// The largest total weight a feasible individual may have.
pub const MAX_WEIGHT: u32 = 50;

/// The fitness assigned to infeasible individuals. It dominates nothing and
/// is dominated by every feasible fitness, so infeasible individuals survive
/// selection only for lack of alternatives.
pub const PENALTY: Fitness = Fitness {
  weight: 10_000.0,
  value: 0.0,
};

/// An operator that maps a membership set to its fitness.
///
/// Evaluation is total: every membership, however it was constructed, yields
/// a well-defined fitness tuple.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use knapsweep::fitness::Fitness;
///
/// let e = |s: &BTreeSet<usize>| Fitness {
///   weight: s.len() as f64,
///   value: 0.0,
/// };
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluation {
  /// Returns the fitness of the given membership set.
  fn evaluate(&self, selection: &BTreeSet<usize>) -> Fitness;
}

impl<F> Evaluation for F
where
  F: Fn(&BTreeSet<usize>) -> Fitness,
{
  fn evaluate(&self, selection: &BTreeSet<usize>) -> Fitness {
    self(selection)
  }
}

/// Evaluates knapsack contents against a problem instance.
///
/// Feasible selections score their exact total weight and value. Selections
/// with more than [`MAX_ITEMS`] items or heavier than [`MAX_WEIGHT`] score
/// [`PENALTY`] on both objectives at once.
#[derive(Clone, PartialEq, Debug)]
pub struct KnapsackEvaluation {
  items: ItemSet,
}

impl KnapsackEvaluation {
  /// Creates an evaluation over the given problem instance.
  pub fn new(items: ItemSet) -> Self {
    Self { items }
  }
}

impl Evaluation for KnapsackEvaluation {
  fn evaluate(&self, selection: &BTreeSet<usize>) -> Fitness {
    let weight: u32 = selection.iter().map(|&i| self.items[i].weight).sum();
    let value: f64 = selection.iter().map(|&i| self.items[i].value).sum();
    if selection.len() > MAX_ITEMS || weight > MAX_WEIGHT {
      return PENALTY;
    }
    Fitness {
      weight: f64::from(weight),
      value,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::items::Item;

  fn takes_evaluation<E: Evaluation>(e: &E) -> Fitness {
    e.evaluate(&BTreeSet::new())
  }

  #[test]
  fn test_evaluation_from_closure() {
    let evaluation = |s: &BTreeSet<usize>| Fitness {
      weight: s.len() as f64,
      value: 0.0,
    };
    assert_eq!(takes_evaluation(&evaluation).weight, 0.0);
  }

  #[test]
  fn test_feasible_selections_score_exact_sums() {
    let items = ItemSet::new(vec![
      Item {
        weight: 3,
        value: 10.0,
      },
      Item {
        weight: 7,
        value: 20.5,
      },
      Item {
        weight: 40,
        value: 1.0,
      },
    ]);
    let evaluation = KnapsackEvaluation::new(items);

    let fitness = evaluation.evaluate(&BTreeSet::from([0, 1]));
    assert_eq!(fitness, Fitness { weight: 10.0, value: 30.5 });

    // an empty selection weighs and is worth nothing
    let fitness = evaluation.evaluate(&BTreeSet::new());
    assert_eq!(fitness, Fitness { weight: 0.0, value: 0.0 });

    // a selection of exactly the allowed weight is still feasible
    let fitness = evaluation.evaluate(&BTreeSet::from([0, 1, 2]));
    assert_eq!(fitness, Fitness { weight: 50.0, value: 31.5 });
  }

  #[test]
  fn test_overweight_selections_are_penalized() {
    let items = ItemSet::new(vec![
      Item {
        weight: 30,
        value: 10.0,
      },
      Item {
        weight: 21,
        value: 10.0,
      },
    ]);
    let evaluation = KnapsackEvaluation::new(items);
    assert_eq!(evaluation.evaluate(&BTreeSet::from([0, 1])), PENALTY);
  }

  #[test]
  fn test_oversized_selections_are_penalized() {
    // weightless items isolate the cardinality constraint
    let items = ItemSet::new(vec![
      Item {
        weight: 0,
        value: 1.0
      };
      60
    ]);
    let evaluation = KnapsackEvaluation::new(items);

    let full = evaluation.evaluate(&(0..51).collect());
    assert_eq!(full, PENALTY);

    let fitting = evaluation.evaluate(&(0..50).collect());
    assert_eq!(fitting, Fitness { weight: 0.0, value: 50.0 });
  }
}
