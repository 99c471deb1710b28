use std::cmp::Ordering;

use ndarray::ArrayView1;
use ordered_float::OrderedFloat;

use crate::genetic::{Fitness, Individual, SelectionError, validate_uniform_arity};
use crate::helpers::linalg::{pairwise_squared_euclidean, squared_euclidean};
use crate::helpers::order_statistic::randomized_select;
use crate::non_dominated_sorting::dominance_relations;
use crate::random::RandomGenerator;

/// SPEA-II selection.
///
/// Strength-Pareto raw fitness: each individual's strength is the number of
/// individuals it dominates, and an individual's raw fitness is the summed
/// strength of everyone dominating it, so raw fitness below one marks the
/// non-dominated candidates. When the candidates underfill the quota, a
/// nearest-neighbor density term breaks ties among the rest; when they
/// overfill it, the most crowded candidates are eliminated one by one.
///
/// Returns exactly `n` references into the input, in input order. Fails with
/// `CapacityViolation` when `n` exceeds the population size.
pub fn select_spea2<'a, G: Clone>(
    individuals: &'a [Individual<G>],
    n: usize,
    rng: &mut dyn RandomGenerator,
) -> Result<Vec<&'a Individual<G>>, SelectionError> {
    validate_uniform_arity(individuals)?;
    let population_size = individuals.len();
    if n > population_size {
        return Err(SelectionError::CapacityViolation(format!(
            "selection target {} exceeds population size {}",
            n, population_size
        )));
    }
    if population_size == 0 {
        return Ok(Vec::new());
    }

    let fitnesses: Vec<&Fitness> = individuals.iter().map(|ind| &ind.fitness).collect();
    let (_, dominated_sets) = dominance_relations(&fitnesses);

    let strength: Vec<usize> = dominated_sets.iter().map(|set| set.len()).collect();
    let mut fits = vec![0.0_f64; population_size];
    for (dominator, dominated) in dominated_sets.iter().enumerate() {
        for &i in dominated {
            fits[i] += strength[dominator] as f64;
        }
    }

    // Non-dominated individuals accumulate no dominator strength.
    let mut chosen: Vec<usize> = (0..population_size).filter(|&i| fits[i] < 1.0).collect();

    if chosen.len() < n {
        fill_by_density(individuals, &mut chosen, &mut fits, n, rng)?;
    } else if chosen.len() > n {
        truncate_by_nearest_neighbor(&mut chosen, &fitnesses, n, rng);
    }

    Ok(chosen.iter().map(|&i| &individuals[i]).collect())
}

/// Adds the k-th-nearest-neighbor density term `1 / (d_k + 2)` to every raw
/// fitness (k = ⌊√N⌋, d_k found by randomized selection rather than a full
/// sort) and fills the quota with the unchosen individuals of lowest
/// combined fitness, ties by index.
fn fill_by_density<G: Clone>(
    individuals: &[Individual<G>],
    chosen: &mut Vec<usize>,
    fits: &mut [f64],
    n: usize,
    rng: &mut dyn RandomGenerator,
) -> Result<(), SelectionError> {
    let population_size = individuals.len();
    let k = (population_size as f64).sqrt() as usize;

    for i in 0..population_size {
        let row = individuals[i].fitness.values().view();
        let mut dists: Vec<f64> = (0..population_size)
            .filter(|&j| j != i)
            .map(|j| squared_euclidean(&row, &individuals[j].fitness.values().view()))
            .collect();
        let kth_dist = randomized_select(&mut dists, k, rng)?;
        fits[i] += 1.0 / (kth_dist + 2.0);
    }

    let mut is_chosen = vec![false; population_size];
    for &i in chosen.iter() {
        is_chosen[i] = true;
    }
    let mut rest: Vec<usize> = (0..population_size).filter(|&i| !is_chosen[i]).collect();
    rest.sort_by_key(|&i| (OrderedFloat(fits[i]), i));

    let missing = n - chosen.len();
    chosen.extend(rest.into_iter().take(missing));
    Ok(())
}

/// Iteratively removes the candidate whose distances to its nearest
/// remaining neighbors are lexicographically smallest, until `n` remain.
/// Complete ties fall back to a uniform draw from the injected generator.
/// Each candidate keeps its neighbors ordered by ascending distance; a
/// removal splices the victim out of every remaining ordering instead of
/// recomputing it.
fn truncate_by_nearest_neighbor(
    chosen: &mut Vec<usize>,
    fitnesses: &[&Fitness],
    n: usize,
    rng: &mut dyn RandomGenerator,
) {
    let size = chosen.len();
    let rows: Vec<ArrayView1<f64>> = chosen
        .iter()
        .map(|&i| fitnesses[i].values().view())
        .collect();
    let dists = pairwise_squared_euclidean(&rows);

    let mut neighbor_ranks: Vec<Vec<usize>> = (0..size)
        .map(|i| {
            let mut order: Vec<usize> = (0..size).filter(|&j| j != i).collect();
            order.sort_by_key(|&j| (OrderedFloat(dists[[i, j]]), j));
            order
        })
        .collect();

    let mut alive = vec![true; size];
    let mut alive_count = size;

    while alive_count > n {
        let mut min_pos: Option<usize> = None;
        let mut tied: Vec<usize> = Vec::new();

        for i in (0..size).filter(|&i| alive[i]) {
            let Some(best) = min_pos else {
                min_pos = Some(i);
                continue;
            };
            let mut ordering = Ordering::Equal;
            for rank in 0..neighbor_ranks[i].len() {
                let dist_i = dists[[i, neighbor_ranks[i][rank]]];
                let dist_best = dists[[best, neighbor_ranks[best][rank]]];
                ordering = dist_i.partial_cmp(&dist_best).unwrap_or(Ordering::Equal);
                if ordering != Ordering::Equal {
                    break;
                }
            }
            match ordering {
                Ordering::Less => {
                    min_pos = Some(i);
                    tied.clear();
                }
                Ordering::Equal => tied.push(i),
                Ordering::Greater => {}
            }
        }

        let best = min_pos.expect("at least one candidate is alive");
        let victim = if tied.is_empty() {
            best
        } else {
            let mut candidates = vec![best];
            candidates.extend(tied);
            *rng.choose_usize(&candidates)
                .expect("candidate list is non-empty")
        };

        alive[victim] = false;
        alive_count -= 1;
        for i in (0..size).filter(|&i| alive[i]) {
            neighbor_ranks[i].retain(|&j| j != victim);
        }
    }

    let mut keep = alive.iter();
    chosen.retain(|_| *keep.next().expect("alive flags cover every candidate"));
}
