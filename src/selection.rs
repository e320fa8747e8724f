//! Survivor selection operators.

use std::cmp::Ordering;

use crate::{fitness::Fitness, individual::Individual};

/// An operator that truncates a combined pool of evaluated individuals down
/// to the next generation's population.
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Selector {
  /// Selects exactly `count` survivors from `pool`, or the whole pool when
  /// it is not larger than `count`.
  fn select(&self, pool: Vec<Individual>, count: usize) -> Vec<Individual>;
}

impl<F> Selector for F
where
  F: Fn(Vec<Individual>, usize) -> Vec<Individual>,
{
  fn select(&self, pool: Vec<Individual>, count: usize) -> Vec<Individual> {
    self(pool, count)
  }
}

// index of an individual in the pool
type PoolIndex = usize;
// number of individuals dominating an individual
type DominanceCounter = u32;
// crowding distance of an individual
type CrowdingDistance = f64;
// indices of the individuals dominated by an individual
type DominanceList = Vec<PoolIndex>;
// indices of the individuals of one front
type Front = Vec<PoolIndex>;

/// Selects survivors by non-dominated sorting refined with a crowding
/// distance metric.
///
/// The pool is peeled into successive non-domination fronts: the first front
/// holds the individuals dominated by nobody, the second those dominated
/// only by the first, and so on. Whole fronts survive in front order while
/// they fit, and the single front that would overflow the population is
/// thinned to its members with the largest crowding distance. Boundary
/// members of that front carry an infinite distance and always survive
/// thinning; equally crowded members keep their pool order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Nsga2Selector();

impl Selector for Nsga2Selector {
  fn select(&self, pool: Vec<Individual>, count: usize) -> Vec<Individual> {
    if pool.len() <= count {
      return pool;
    }

    let fitnesses: Vec<Fitness> = pool
      .iter()
      .map(|ind| ind.fitness().expect("pool must be evaluated"))
      .collect();

    let mut dominance_lists: Vec<DominanceList> =
      vec![Vec::new(); pool.len()];
    let mut dominance_counters: Vec<DominanceCounter> = vec![0; pool.len()];
    let mut first_front: Front = Vec::new();

    // fill dominance lists and counters
    for p_idx in 0..pool.len() {
      // for each unique pair of individuals `p`...
      let (p_fit, rest) =
        fitnesses[p_idx..].split_first().expect("no fitnesses remain");
      // and `q`...
      for (i, q_fit) in rest.iter().enumerate() {
        let q_idx = p_idx + i + 1;
        match p_fit.dominance(q_fit) {
          // if individual `p` dominates individual `q`...
          Ordering::Less => {
            // put `q` into the list of individuals dominated by `p`
            dominance_lists[p_idx].push(q_idx);
            // and increment the counter of individuals dominating `q`
            dominance_counters[q_idx] += 1;
          }
          // if individual `q` dominates individual `p`...
          Ordering::Greater => {
            // put `p` into the list of individuals dominated by `q`
            dominance_lists[q_idx].push(p_idx);
            // and increment the counter of individuals dominating `p`
            dominance_counters[p_idx] += 1;
          }
          Ordering::Equal => {}
        }
      }
      // by now every pair involving `p` has been visited
      if dominance_counters[p_idx] == 0 {
        first_front.push(p_idx);
      }
    }

    debug_assert!(
      !first_front.is_empty(),
      "the first front must have at least 1 individual"
    );

    let mut survivors: Vec<PoolIndex> = Vec::with_capacity(count);
    let mut last_front = first_front;
    // until appending the next whole front would overflow the population...
    while survivors.len() + last_front.len() < count {
      let mut next_front: Front = Vec::new();
      // for each individual `p` of the last appended front...
      for &p_idx in &last_front {
        // release each individual `q` dominated by `p`
        for &q_idx in &dominance_lists[p_idx] {
          dominance_counters[q_idx] -= 1;
          // once nothing left dominates `q`, it belongs to the next front
          if dominance_counters[q_idx] == 0 {
            next_front.push(q_idx);
          }
        }
      }
      survivors.append(&mut last_front);
      last_front = next_front;
    }

    // thin the overflowing front by crowding distance. the sort is stable,
    // so equally crowded members resolve by pool order
    let remaining = count - survivors.len();
    let crowding = crowding_distances(&fitnesses, &last_front);
    last_front.sort_by(|&a, &b| crowding[b].total_cmp(&crowding[a]));
    last_front.truncate(remaining);
    survivors.append(&mut last_front);

    // pull survivors out of the pool preserving the selection order
    let mut slots: Vec<Option<Individual>> =
      pool.into_iter().map(Some).collect();
    let selected: Vec<Individual> = survivors
      .into_iter()
      .map(|idx| slots[idx].take().expect("selected indices are unique"))
      .collect();

    debug_assert_eq!(
      selected.len(),
      count,
      "the number of survivors must match the requested count"
    );

    selected
  }
}

/// Calculates crowding distances for the members of one front. Boundary
/// members of each objective get an infinite distance, interior members
/// accumulate the normalized gap between their neighbors.
fn crowding_distances(
  fitnesses: &[Fitness],
  front: &[PoolIndex],
) -> Vec<CrowdingDistance> {
  let mut distances: Vec<CrowdingDistance> = vec![0.0; fitnesses.len()];
  if front.len() <= 2 {
    for &idx in front {
      distances[idx] = f64::INFINITY;
    }
    return distances;
  }

  let mut ordered: Vec<PoolIndex> = front.to_vec();
  for objective in [
    (|f: &Fitness| f.weight) as fn(&Fitness) -> f64,
    |f: &Fitness| f.value,
  ] {
    // order the front by the scores of this objective
    ordered.sort_by(|&a, &b| {
      objective(&fitnesses[a]).total_cmp(&objective(&fitnesses[b]))
    });

    let first = ordered[0];
    let last = ordered[ordered.len() - 1];
    distances[first] = f64::INFINITY;
    distances[last] = f64::INFINITY;

    let span = objective(&fitnesses[last]) - objective(&fitnesses[first]);
    if span == 0.0 {
      continue;
    }
    for window in ordered.windows(3) {
      let (prev, mid, next) = (window[0], window[1], window[2]);
      if distances[mid] != f64::INFINITY {
        distances[mid] +=
          (objective(&fitnesses[next]) - objective(&fitnesses[prev])) / span;
      }
    }
  }
  distances
}
