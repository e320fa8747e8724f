//! Per-generation statistics and run summaries.

use crate::individual::Individual;

/// Aggregate statistics of one objective over a population.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ObjectiveStats {
  /// Mean of the objective.
  pub avg: f64,
  /// Population standard deviation of the objective.
  pub std: f64,
  /// Smallest observed value.
  pub min: f64,
  /// Largest observed value.
  pub max: f64,
}

impl ObjectiveStats {
  fn compute(values: &[f64]) -> Self {
    let n = values.len() as f64;
    let avg = values.iter().sum::<f64>() / n;
    let variance =
      values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;
    Self {
      avg,
      std: variance.sqrt(),
      min: values.iter().copied().fold(f64::INFINITY, f64::min),
      max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
  }
}

/// Statistics of one generation's population, one entry of a run's logbook.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GenerationRecord {
  /// Generation index, starting at `0` for the initial population.
  pub generation: usize,
  /// Weight objective statistics.
  pub weight: ObjectiveStats,
  /// Value objective statistics.
  pub value: ObjectiveStats,
}

impl GenerationRecord {
  /// Computes the record of `generation` over an evaluated population.
  ///
  /// # Panics
  ///
  /// Panics if the population is empty or contains stale individuals.
  pub fn compute(generation: usize, population: &[Individual]) -> Self {
    assert!(!population.is_empty(), "population cannot be empty");
    let (weights, values): (Vec<f64>, Vec<f64>) = population
      .iter()
      .map(|ind| {
        let fitness = ind.fitness().expect("population must be evaluated");
        (fitness.weight, fitness.value)
      })
      .unzip();
    Self {
      generation,
      weight: ObjectiveStats::compute(&weights),
      value: ObjectiveStats::compute(&values),
    }
  }
}

/// An alias for the ordered run history: one record per generation.
pub type Logbook = Vec<GenerationRecord>;

/// The overall outcome of one run, derived from its logbook.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RunResult {
  /// Largest per-generation maximum of the value objective.
  pub max_value: f64,
  /// Earliest generation whose maximum first reached `max_value`.
  pub earliest_gen: usize,
}

impl RunResult {
  /// Derives the result from an ordered logbook.
  ///
  /// The earliest generation is found by exact `f64` equality against the
  /// historical maximum. The maximum is itself copied out of one of the
  /// records, so a witness always exists; comparing with a tolerance instead
  /// could report a different, merely close generation.
  ///
  /// # Panics
  ///
  /// Panics if the logbook is empty.
  pub fn from_logbook(logbook: &[GenerationRecord]) -> Self {
    assert!(!logbook.is_empty(), "logbook cannot be empty");
    let max_value = logbook
      .iter()
      .map(|record| record.value.max)
      .fold(f64::NEG_INFINITY, f64::max);
    let earliest_gen = logbook
      .iter()
      .find(|record| record.value.max == max_value)
      .map(|record| record.generation)
      .expect("the maximum comes from one of the records");
    Self {
      max_value,
      earliest_gen,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fitness::Fitness;

  fn evaluated(weight: f64, value: f64) -> Individual {
    let mut ind = Individual::default();
    ind.set_fitness(Fitness { weight, value });
    ind
  }

  fn record(generation: usize, max_value: f64) -> GenerationRecord {
    let stats = ObjectiveStats {
      avg: 0.0,
      std: 0.0,
      min: 0.0,
      max: max_value,
    };
    GenerationRecord {
      generation,
      weight: stats,
      value: stats,
    }
  }

  #[test]
  fn test_record_over_a_known_population() {
    let population = vec![
      evaluated(2.0, 10.0),
      evaluated(4.0, 20.0),
      evaluated(6.0, 30.0),
    ];
    let record = GenerationRecord::compute(7, &population);

    assert_eq!(record.generation, 7);
    assert_eq!(record.weight.avg, 4.0);
    assert_eq!(record.weight.min, 2.0);
    assert_eq!(record.weight.max, 6.0);
    assert_eq!(record.value.avg, 20.0);
    // population standard deviation, not the sample one
    assert!((record.weight.std - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
  }

  #[test]
  fn test_result_picks_the_earliest_maximum() {
    let logbook =
      vec![record(0, 10.0), record(1, 25.0), record(2, 25.0), record(3, 20.0)];
    let result = RunResult::from_logbook(&logbook);
    assert_eq!(result.max_value, 25.0);
    assert_eq!(result.earliest_gen, 1);
  }

  #[test]
  fn test_result_equality_is_exact() {
    // a value within any epsilon of the maximum is still not the maximum
    let close = 25.0 - f64::EPSILON * 25.0;
    let logbook = vec![record(0, close), record(1, 25.0)];
    let result = RunResult::from_logbook(&logbook);
    assert_eq!(result.earliest_gen, 1);
  }
}
