use rayon::prelude::*;

use crate::genetic::{Fitness, Individual, SelectionError, validate_uniform_arity};

/// Pairwise dominance bookkeeping: for each individual, how many others
/// dominate it and the list of indices it dominates. Each unordered pair is
/// tested at most twice (the second direction only when the first fails).
///
/// The pair phase runs row-parallel; per-row outcomes are collected and
/// merged sequentially in index order, so counts and list orders are
/// identical across runs and thread counts.
pub(crate) fn dominance_relations(fitnesses: &[&Fitness]) -> (Vec<usize>, Vec<Vec<usize>>) {
    let population_size = fitnesses.len();

    let per_row: Vec<Vec<(usize, usize)>> = (0..population_size)
        .into_par_iter()
        .map(|i| {
            let mut local = Vec::new();
            for j in (i + 1)..population_size {
                if fitnesses[i].dominates(fitnesses[j]) {
                    local.push((i, j));
                } else if fitnesses[j].dominates(fitnesses[i]) {
                    local.push((j, i));
                }
                // else -> neither dominates
            }
            local
        })
        .collect();

    let mut domination_count = vec![0usize; population_size];
    let mut dominated_sets: Vec<Vec<usize>> = vec![Vec::new(); population_size];
    for local in per_row {
        for (dominator, dominated) in local {
            dominated_sets[dominator].push(dominated);
            domination_count[dominated] += 1;
        }
    }
    (domination_count, dominated_sets)
}

/// Fast Non-Dominated Sorting over fitness values.
/// Returns a vector of fronts, each front a list of indices in input order.
/// Front construction stops once the cumulative count of classified
/// individuals reaches `min(N, limit)`; the entire boundary front is included
/// even when that overshoots `limit`. `limit == 0` returns no fronts without
/// performing a single dominance test.
pub fn fast_non_dominated_sorting(fitnesses: &[&Fitness], limit: usize) -> Vec<Vec<usize>> {
    if limit == 0 {
        return Vec::new();
    }
    let population_size = fitnesses.len();
    let (mut domination_count, dominated_sets) = dominance_relations(fitnesses);

    let first_front: Vec<usize> = (0..population_size)
        .filter(|&i| domination_count[i] == 0)
        .collect();
    let target = population_size.min(limit);
    let mut sorted = first_front.len();

    let mut fronts = vec![first_front];
    while sorted < target {
        let current = fronts.last().expect("fronts always holds the first front");
        let mut next_front = Vec::new();
        for &p in current {
            for &q in &dominated_sets[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        if next_front.is_empty() {
            break;
        }
        sorted += next_front.len();
        fronts.push(next_front);
    }

    fronts
}

/// Sorts `individuals` into Pareto fronts until `n` of them are classified,
/// returning references to the original individuals (no copies). With
/// `first_front_only` only front 0 is built.
pub fn sort_nondominated<'a, G: Clone>(
    individuals: &'a [Individual<G>],
    n: usize,
    first_front_only: bool,
) -> Result<Vec<Vec<&'a Individual<G>>>, SelectionError> {
    validate_uniform_arity(individuals)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    let fitnesses: Vec<&Fitness> = individuals.iter().map(|ind| &ind.fitness).collect();
    let index_fronts = if first_front_only {
        let (domination_count, _) = dominance_relations(&fitnesses);
        vec![
            (0..individuals.len())
                .filter(|&i| domination_count[i] == 0)
                .collect(),
        ]
    } else {
        fast_non_dominated_sorting(&fitnesses, n)
    };
    Ok(index_fronts
        .into_iter()
        .map(|front| front.into_iter().map(|i| &individuals[i]).collect())
        .collect())
}
