use std::cmp::Ordering;
use std::ops::Index;

use crate::archive::sorted_insert;
use crate::genetic::{Individual, SelectionError, validate_uniform_arity};

/// Fixed-capacity archive of the best individuals ever observed, kept sorted
/// best-first by the total fitness order. Entries are deep copies, so later
/// in-place mutation of the live population never reaches the archive.
///
/// The archive has a single owner; concurrent mutation must be serialized by
/// the caller.
pub struct HallOfFame<G: Clone> {
    maxsize: usize,
    items: Vec<Individual<G>>,
}

impl<G: Clone> HallOfFame<G> {
    /// Creates an archive holding at most `maxsize` individuals. A capacity
    /// of zero is refused rather than producing an archive that silently
    /// drops everything.
    pub fn new(maxsize: usize) -> Result<Self, SelectionError> {
        if maxsize == 0 {
            return Err(SelectionError::CapacityViolation(
                "hall of fame capacity must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            maxsize,
            items: Vec::new(),
        })
    }

    pub fn maxsize(&self) -> usize {
        self.maxsize
    }

    /// Folds a population into the archive. While the archive is under-full
    /// it is rebuilt from the union of archive and population, best first,
    /// truncated to capacity. Once full, each candidate strictly better than
    /// the current worst entry evicts that worst entry and is inserted at
    /// its sorted position.
    pub fn update(&mut self, population: &[Individual<G>]) -> Result<(), SelectionError> {
        self.validate_candidates(population)?;

        if self.items.len() < self.maxsize {
            let mut pool: Vec<&Individual<G>> =
                self.items.iter().chain(population.iter()).collect();
            pool.sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap_or(Ordering::Equal));
            pool.truncate(self.maxsize);
            self.items = pool.into_iter().cloned().collect();
        } else {
            for candidate in population {
                let improves = {
                    let worst = self.items.last().expect("a full archive is never empty");
                    candidate.fitness.partial_cmp(&worst.fitness) == Some(Ordering::Greater)
                };
                if improves {
                    self.items.pop();
                    self.insert(candidate);
                }
            }
        }
        Ok(())
    }

    /// Deep-copies `individual` into its sorted position. Does not enforce
    /// the capacity bound; `update` does.
    pub fn insert(&mut self, individual: &Individual<G>) {
        sorted_insert(&mut self.items, individual);
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Individual<G> {
        self.items.remove(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.items.iter()
    }

    fn validate_candidates(&self, population: &[Individual<G>]) -> Result<(), SelectionError> {
        let found = validate_uniform_arity(population)?;
        if let (Some(stored), Some(_)) = (self.items.first(), population.first()) {
            let expected = stored.fitness.n_objectives();
            if found != expected {
                return Err(SelectionError::ArityMismatch { expected, found });
            }
        }
        Ok(())
    }
}

impl<G: Clone> Index<usize> for HallOfFame<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    use crate::genetic::Fitness;

    fn scalar(value: f64) -> Individual<Array1<f64>> {
        Individual::new(array![value], Fitness::maximizing(array![value]))
    }

    fn stored_values(hof: &HallOfFame<Array1<f64>>) -> Vec<f64> {
        hof.iter().map(|ind| ind.fitness.values()[0]).collect()
    }

    #[test]
    fn test_zero_capacity_is_refused() {
        assert!(matches!(
            HallOfFame::<Array1<f64>>::new(0),
            Err(SelectionError::CapacityViolation(_))
        ));
    }

    #[test]
    fn test_update_keeps_best_across_generations() {
        let mut hof = HallOfFame::new(2).unwrap();
        hof.update(&[scalar(5.0), scalar(3.0)]).unwrap();
        assert_eq!(stored_values(&hof), vec![5.0, 3.0]);

        hof.update(&[scalar(4.0), scalar(6.0)]).unwrap();
        assert_eq!(stored_values(&hof), vec![6.0, 5.0]);
    }

    #[test]
    fn test_full_archive_ignores_non_improving_candidates() {
        let mut hof = HallOfFame::new(2).unwrap();
        hof.update(&[scalar(5.0), scalar(3.0)]).unwrap();
        // Equal to the current worst: not strictly better, so no eviction.
        hof.update(&[scalar(3.0), scalar(1.0)]).unwrap();
        assert_eq!(stored_values(&hof), vec![5.0, 3.0]);
    }

    #[test]
    fn test_order_invariant_under_many_updates() {
        let mut hof = HallOfFame::new(4).unwrap();
        for batch in [
            vec![2.0, 9.0, 4.0],
            vec![9.0, 1.0],
            vec![7.0, 3.0, 8.0, 2.5],
            vec![6.5],
        ] {
            let pop: Vec<_> = batch.into_iter().map(scalar).collect();
            hof.update(&pop).unwrap();
            assert!(hof.len() <= hof.maxsize());
            let values = stored_values(&hof);
            for window in values.windows(2) {
                assert!(
                    window[0] >= window[1],
                    "archive must stay sorted best first: {:?}",
                    values
                );
            }
        }
        assert_eq!(stored_values(&hof), vec![9.0, 9.0, 8.0, 7.0]);
    }

    #[test]
    fn test_entries_are_deep_copies() {
        let mut hof = HallOfFame::new(2).unwrap();
        let mut pop = vec![scalar(5.0)];
        hof.update(&pop).unwrap();

        // Mutating the live individual afterwards must not reach the archive.
        pop[0].genome[0] = -1.0;
        assert_eq!(hof[0].genome[0], 5.0);
    }

    #[test]
    fn test_multi_objective_total_order() {
        let ind = |a: f64, b: f64| {
            Individual::new(array![a, b], Fitness::maximizing(array![a, b]))
        };
        let mut hof = HallOfFame::new(3).unwrap();
        hof.update(&[ind(1.0, 9.0), ind(2.0, 0.0), ind(1.0, 3.0)])
            .unwrap();
        // Lexicographic on weighted values: (2,0) > (1,9) > (1,3).
        let firsts: Vec<f64> = hof.iter().map(|i| i.fitness.values()[0]).collect();
        let seconds: Vec<f64> = hof.iter().map(|i| i.fitness.values()[1]).collect();
        assert_eq!(firsts, vec![2.0, 1.0, 1.0]);
        assert_eq!(seconds, vec![0.0, 9.0, 3.0]);
    }

    #[test]
    fn test_update_rejects_mismatched_arity() {
        let mut hof = HallOfFame::new(2).unwrap();
        hof.update(&[scalar(1.0)]).unwrap();
        let wide = Individual::new(array![1.0, 2.0], Fitness::maximizing(array![1.0, 2.0]));
        assert!(matches!(
            hof.update(&[wide]),
            Err(SelectionError::ArityMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut hof = HallOfFame::new(3).unwrap();
        hof.update(&[scalar(1.0), scalar(2.0), scalar(3.0)]).unwrap();
        let removed = hof.remove(1);
        assert_eq!(removed.fitness.values()[0], 2.0);
        assert_eq!(stored_values(&hof), vec![3.0, 1.0]);
        hof.clear();
        assert!(hof.is_empty());
    }
}
