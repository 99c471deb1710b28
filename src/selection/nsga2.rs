use std::cmp::Ordering;

use ndarray::Array1;
use ordered_float::OrderedFloat;

use crate::genetic::{Fitness, Individual, SelectionError, validate_uniform_arity};
use crate::non_dominated_sorting::fast_non_dominated_sorting;

/// Computes the crowding distance for a front of mutually non-dominating
/// individuals.
///
/// Per objective the front is stable-sorted by raw objective value; the two
/// extreme individuals get infinite distance so boundary solutions are always
/// preferred, and interior individuals accumulate the gap between their
/// neighbors. The accumulation is unnormalized: objectives on wildly
/// different scales should be pre-scaled by the caller.
pub fn crowding_distances<G: Clone>(front: &[&Individual<G>]) -> Array1<f64> {
    let front_size = front.len();
    let mut distances = Array1::zeros(front_size);
    if front_size == 0 {
        return distances;
    }
    let n_objectives = front[0].fitness.n_objectives();

    for obj in 0..n_objectives {
        let mut order: Vec<usize> = (0..front_size).collect();
        order.sort_by_key(|&i| OrderedFloat(front[i].fitness.values()[obj]));

        distances[order[0]] = f64::INFINITY;
        distances[order[front_size - 1]] = f64::INFINITY;

        for w in 1..front_size.saturating_sub(1) {
            let idx = order[w];
            // Boundary individuals keep their infinite distance.
            if distances[idx] < f64::INFINITY {
                distances[idx] += front[order[w + 1]].fitness.values()[obj]
                    - front[order[w - 1]].fitness.values()[obj];
            }
        }
    }
    distances
}

/// Orders a front descending by crowding distance (stable, so ties keep
/// their input order) and returns the first `n` individuals. An empty front
/// yields an empty result.
pub fn sort_crowding_dist<'a, G: Clone>(
    front: &[&'a Individual<G>],
    n: usize,
) -> Vec<&'a Individual<G>> {
    if front.is_empty() {
        return Vec::new();
    }
    let distances = crowding_distances(front);
    let mut order: Vec<usize> = (0..front.len()).collect();
    order.sort_by(|&i, &j| {
        distances[j]
            .partial_cmp(&distances[i])
            .unwrap_or(Ordering::Equal)
    });
    order.into_iter().take(n).map(|i| front[i]).collect()
}

/// NSGA-II selection: Pareto fronts are taken wholesale until the quota `n`
/// would be exceeded, and the boundary front is thinned by crowding
/// distance, keeping the least crowded individuals.
///
/// Returns exactly `min(n, individuals.len())` references into the input;
/// no individual appears more often than it does in the input.
pub fn select_nsga2<'a, G: Clone>(
    individuals: &'a [Individual<G>],
    n: usize,
) -> Result<Vec<&'a Individual<G>>, SelectionError> {
    validate_uniform_arity(individuals)?;
    let fitnesses: Vec<&Fitness> = individuals.iter().map(|ind| &ind.fitness).collect();
    let fronts = fast_non_dominated_sorting(&fitnesses, n);

    let mut chosen: Vec<&Individual<G>> = Vec::with_capacity(n.min(individuals.len()));
    let Some((boundary, full_fronts)) = fronts.split_last() else {
        return Ok(chosen); // n == 0
    };
    for front in full_fronts {
        chosen.extend(front.iter().map(|&i| &individuals[i]));
    }
    if chosen.len() < n {
        let boundary_refs: Vec<&Individual<G>> =
            boundary.iter().map(|&i| &individuals[i]).collect();
        chosen.extend(sort_crowding_dist(&boundary_refs, n - chosen.len()));
    }
    Ok(chosen)
}
