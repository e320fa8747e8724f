//! Crossover and mutation operators on set-encoded individuals.

use rand::{rngs::StdRng, Rng};

use crate::individual::Individual;

/// An operator that recombines two individuals in place, turning a pair of
/// parents into a pair of offspring.
///
/// Operators draw all of their randomness from the stream they are handed,
/// never from a thread-local generator, so a run stays reproducible from its
/// seed.
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Crossover {
  /// Recombines `a` and `b` in place.
  fn cross(&self, a: &mut Individual, b: &mut Individual, rng: &mut StdRng);
}

impl<F> Crossover for F
where
  F: Fn(&mut Individual, &mut Individual, &mut StdRng),
{
  fn cross(&self, a: &mut Individual, b: &mut Individual, rng: &mut StdRng) {
    self(a, b, rng)
  }
}

/// An operator that mutates a single individual in place.
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Mutation {
  /// Mutates the given individual.
  fn mutate(&self, individual: &mut Individual, rng: &mut StdRng);
}

impl<F> Mutation for F
where
  F: Fn(&mut Individual, &mut StdRng),
{
  fn mutate(&self, individual: &mut Individual, rng: &mut StdRng) {
    self(individual, rng)
  }
}

/// Replaces the first parent with the intersection of both memberships and
/// the second with their symmetric difference.
///
/// The intersection offspring never outgrows the smaller parent while the
/// symmetric difference offspring can shrink or grow, so the population keeps
/// exploring subsets of both smaller and larger cardinality without a
/// fixed-length genome. Empty parents recombine into empty offspring without
/// failure.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SetIntersection();

impl Crossover for SetIntersection {
  fn cross(&self, a: &mut Individual, b: &mut Individual, _: &mut StdRng) {
    let intersection = a.items() & b.items();
    let difference = a.items() ^ b.items();
    a.replace(intersection);
    b.replace(difference);
  }
}

/// Attempts exactly one membership change per call: an even coin removes one
/// uniformly chosen element, otherwise one uniform index from
/// `[0, universe)` is inserted.
///
/// Removal from an empty individual and insertion of an already selected
/// index are documented no-ops, not errors; the full-universe individual
/// tolerates both branches.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RandomAddRemove(pub usize);

impl Mutation for RandomAddRemove {
  fn mutate(&self, individual: &mut Individual, rng: &mut StdRng) {
    if rng.gen::<f64>() < 0.5 {
      if !individual.is_empty() {
        let nth = rng.gen_range(0..individual.len());
        let index = individual
          .items()
          .iter()
          .nth(nth)
          .copied()
          .expect("drawn within membership bounds");
        individual.remove(index);
      }
    } else {
      individual.insert(rng.gen_range(0..self.0));
    }
  }
}
