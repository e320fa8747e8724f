//! The mu+lambda generational evolution loop.

use rand::{rngs::StdRng, Rng};
use typed_builder::TypedBuilder;

use crate::{
  evaluation::Evaluation,
  individual::Individual,
  pareto::ParetoFront,
  selection::Selector,
  stats::{GenerationRecord, Logbook, RunResult},
  variation::{Crossover, Mutation},
};

/// A mu+lambda evolutionary engine.
///
/// One engine value holds the complete configuration of a single run: the
/// operators and the numeric parameters. It is constructed with a compile
/// time checked builder once per run and never mutated afterwards, so
/// repeated runs cannot interfere with each other through shared state.
///
/// Each generation produces `lambda` offspring from parent pairs drawn
/// uniformly with replacement: a pair is cloned, recombined with probability
/// `cxpb`, and each clone is then independently mutated with probability
/// `mutpb`. Survivors are selected from the combined `mu + lambda` pool.
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use knapsweep::{
///   evaluation::KnapsackEvaluation,
///   evolution::MuPlusLambda,
///   items::ItemSet,
///   selection::Nsga2Selector,
///   variation::{RandomAddRemove, SetIntersection},
/// };
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let items = ItemSet::generate(&mut rng, 20);
/// let engine = MuPlusLambda::builder()
///   .evaluation(KnapsackEvaluation::new(items))
///   .crossover(SetIntersection())
///   .mutation(RandomAddRemove(20))
///   .selector(Nsga2Selector())
///   .universe(20)
///   .cxpb(0.5)
///   .mutpb(0.5)
///   .generations(10)
///   .build();
/// let run = engine.run(&mut rng);
/// assert_eq!(run.logbook.len(), 11);
/// ```
#[derive(TypedBuilder, Debug)]
pub struct MuPlusLambda<Evl, Crs, Mut, Sel> {
  /// Fitness evaluation operator.
  evaluation: Evl,
  /// Crossover operator, applied to offspring pairs with probability `cxpb`.
  crossover: Crs,
  /// Mutation operator, applied to each offspring with probability `mutpb`.
  mutation: Mut,
  /// Survivor selection operator.
  selector: Sel,
  /// Number of item indices individuals draw from.
  universe: usize,
  /// Per-pair crossover probability.
  cxpb: f64,
  /// Per-offspring mutation probability.
  mutpb: f64,
  /// Survivor population size.
  #[builder(default = 50)]
  mu: usize,
  /// Number of offspring produced per generation.
  #[builder(default = 100)]
  lambda: usize,
  /// Number of generation steps to run.
  #[builder(default = 100)]
  generations: usize,
  /// Number of uniform draws used to initialize each individual.
  #[builder(default = 5)]
  init_size: usize,
}

/// The output of one finished run.
#[derive(Clone, PartialEq, Debug)]
pub struct Run {
  /// Ordered per-generation statistics, one record per generation,
  /// generation `0` included.
  pub logbook: Logbook,
  /// The individuals that stayed non-dominated across the whole run.
  pub front: ParetoFront,
}

impl Run {
  /// Derives the run summary from the logbook.
  pub fn result(&self) -> RunResult {
    RunResult::from_logbook(&self.logbook)
  }
}

impl<Evl, Crs, Mut, Sel> MuPlusLambda<Evl, Crs, Mut, Sel>
where
  Evl: Evaluation,
  Crs: Crossover,
  Mut: Mutation,
  Sel: Selector,
{
  /// Runs the configured loop to completion on the given random stream.
  ///
  /// A run always terminates after exactly `generations` steps and yields
  /// `generations + 1` logbook records. Identical configurations consuming
  /// identically seeded streams produce identical runs; nothing else feeds
  /// randomness into the loop.
  ///
  /// # Panics
  ///
  /// Panics if `mu`, `lambda` or `universe` is zero, or if a probability
  /// lies outside `[0, 1]`.
  pub fn run(&self, rng: &mut StdRng) -> Run {
    assert!(self.mu > 0, "mu must be positive");
    assert!(self.lambda > 0, "lambda must be positive");
    assert!(self.universe > 0, "universe cannot be empty");
    assert!((0.0..=1.0).contains(&self.cxpb), "cxpb must lie in [0, 1]");
    assert!((0.0..=1.0).contains(&self.mutpb), "mutpb must lie in [0, 1]");

    let mut population: Vec<Individual> = (0..self.mu)
      .map(|_| Individual::random(rng, self.universe, self.init_size))
      .collect();
    self.evaluate(&mut population);

    let mut front = ParetoFront::new();
    front.update(&population);
    let mut logbook = vec![GenerationRecord::compute(0, &population)];

    for generation in 1..=self.generations {
      let mut offspring = self.breed(&population, rng);
      self.evaluate(&mut offspring);
      front.update(&offspring);

      let mut pool = std::mem::take(&mut population);
      pool.append(&mut offspring);
      population = self.selector.select(pool, self.mu);

      logbook.push(GenerationRecord::compute(generation, &population));
    }

    Run { logbook, front }
  }

  /// Produces `lambda` offspring from parent pairs drawn uniformly with
  /// replacement from the current population.
  fn breed(
    &self,
    population: &[Individual],
    rng: &mut StdRng,
  ) -> Vec<Individual> {
    let mut offspring = Vec::with_capacity(self.lambda + 1);
    while offspring.len() < self.lambda {
      let mut a = population[rng.gen_range(0..population.len())].clone();
      let mut b = population[rng.gen_range(0..population.len())].clone();
      if rng.gen::<f64>() < self.cxpb {
        self.crossover.cross(&mut a, &mut b, rng);
      }
      if rng.gen::<f64>() < self.mutpb {
        self.mutation.mutate(&mut a, rng);
      }
      if rng.gen::<f64>() < self.mutpb {
        self.mutation.mutate(&mut b, rng);
      }
      offspring.push(a);
      offspring.push(b);
    }
    offspring.truncate(self.lambda);
    offspring
  }

  /// Evaluates every stale individual, leaving cached fitnesses untouched.
  fn evaluate(&self, population: &mut [Individual]) {
    for individual in population {
      if individual.is_stale() {
        individual.set_fitness(self.evaluation.evaluate(individual.items()));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;

  use super::*;
  use crate::{
    evaluation::KnapsackEvaluation,
    items::ItemSet,
    selection::Nsga2Selector,
    variation::{RandomAddRemove, SetIntersection},
  };

  fn small_engine(
    items: ItemSet,
  ) -> MuPlusLambda<
    KnapsackEvaluation,
    SetIntersection,
    RandomAddRemove,
    Nsga2Selector,
  > {
    MuPlusLambda::builder()
      .evaluation(KnapsackEvaluation::new(items))
      .crossover(SetIntersection())
      .mutation(RandomAddRemove(20))
      .selector(Nsga2Selector())
      .universe(20)
      .cxpb(0.5)
      .mutpb(0.5)
      .mu(10)
      .lambda(20)
      .generations(15)
      .build()
  }

  #[test]
  fn test_run_produces_one_record_per_generation() {
    let mut rng = StdRng::seed_from_u64(1);
    let items = ItemSet::generate(&mut rng, 20);
    let run = small_engine(items).run(&mut rng);

    assert_eq!(run.logbook.len(), 16);
    for (expected, record) in run.logbook.iter().enumerate() {
      assert_eq!(record.generation, expected);
    }
    assert!(!run.front.is_empty());
  }

  #[test]
  fn test_runs_are_reproducible_from_the_seed() {
    let mut runs = Vec::new();
    for _ in 0..2 {
      let mut rng = StdRng::seed_from_u64(9);
      let items = ItemSet::generate(&mut rng, 20);
      runs.push(small_engine(items).run(&mut rng));
    }
    assert_eq!(runs[0], runs[1]);
  }

  #[test]
  fn test_extreme_probabilities_are_valid() {
    let mut rng = StdRng::seed_from_u64(2);
    let items = ItemSet::generate(&mut rng, 20);
    let engine = MuPlusLambda::builder()
      .evaluation(KnapsackEvaluation::new(items))
      .crossover(SetIntersection())
      .mutation(RandomAddRemove(20))
      .selector(Nsga2Selector())
      .universe(20)
      .cxpb(1.0)
      .mutpb(0.0)
      .mu(8)
      .lambda(16)
      .generations(5)
      .build();
    let run = engine.run(&mut rng);
    assert_eq!(run.logbook.len(), 6);
  }
}
