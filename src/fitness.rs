//! Fitness tuples and Pareto dominance.

use std::cmp::Ordering;

/// A two-objective fitness of a knapsack selection: total `weight` is
/// minimized while total `value` is maximized.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Fitness {
  /// Total weight of the selected items. The lower - the better.
  pub weight: f64,
  /// Total value of the selected items. The higher - the better.
  pub value: f64,
}

impl Fitness {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`. A fitness dominates another one if
  /// it is no worse on both objectives and strictly better on at least one.
  pub fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    // the value pair is flipped: a greater value is the better one
    let objectives =
      [(self.weight, other.weight), (other.value, self.value)];
    for (a, b) in objectives {
      match (ord, a.partial_cmp(&b).expect("NaN encountered")) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less)
        | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
        _ => {}
      }
    }
    ord
  }
}

#[cfg(test)]
mod tests {
  use std::cmp::Ordering;

  use super::*;

  fn fit(weight: f64, value: f64) -> Fitness {
    Fitness { weight, value }
  }

  #[test]
  fn test_dominance() {
    // identical tuples do not dominate each other
    assert_eq!(fit(10.0, 50.0).dominance(&fit(10.0, 50.0)), Ordering::Equal);

    // lighter and more valuable dominates
    assert_eq!(fit(5.0, 60.0).dominance(&fit(10.0, 50.0)), Ordering::Less);
    assert_eq!(fit(10.0, 50.0).dominance(&fit(5.0, 60.0)), Ordering::Greater);

    // strictly better on one objective is enough when the other matches
    assert_eq!(fit(5.0, 50.0).dominance(&fit(10.0, 50.0)), Ordering::Less);
    assert_eq!(fit(10.0, 60.0).dominance(&fit(10.0, 50.0)), Ordering::Less);

    // trading weight for value is incomparable
    assert_eq!(fit(5.0, 40.0).dominance(&fit(10.0, 50.0)), Ordering::Equal);
    assert_eq!(fit(12.0, 60.0).dominance(&fit(10.0, 50.0)), Ordering::Equal);
  }

  #[test]
  fn test_dominance_is_a_strict_partial_order() {
    let tuples: Vec<Fitness> = (0..4)
      .flat_map(|w| (0..4).map(move |v| fit(f64::from(w), f64::from(v))))
      .collect();

    for a in &tuples {
      // irreflexive
      assert_ne!(a.dominance(a), Ordering::Less);
      for b in &tuples {
        // asymmetric
        if a.dominance(b) == Ordering::Less {
          assert_ne!(b.dominance(a), Ordering::Less);
        }
        for c in &tuples {
          // transitive
          if a.dominance(b) == Ordering::Less
            && b.dominance(c) == Ordering::Less
          {
            assert_eq!(a.dominance(c), Ordering::Less);
          }
        }
      }
    }
  }
}
