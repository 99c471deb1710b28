use std::ops::Index;

use crate::archive::sorted_insert;
use crate::genetic::{Individual, SelectionError, validate_uniform_arity};

/// Unbounded archive of every non-dominated individual ever observed, kept
/// sorted by the total fitness order like the hall of fame. Entries are deep
/// copies of the inserted individuals.
///
/// An optional similarity predicate over genome payloads limits growth on
/// continuous domains: a candidate whose fitness ties an archived entry and
/// whose genome the predicate calls similar is discarded as a twin.
pub struct ParetoFront<G: Clone> {
    items: Vec<Individual<G>>,
    similar: Box<dyn Fn(&G, &G) -> bool>,
}

impl<G: Clone + PartialEq + 'static> ParetoFront<G> {
    /// Archive with genome equality as the similarity predicate.
    pub fn new() -> Self {
        Self::with_similarity(|a: &G, b: &G| a == b)
    }
}

impl<G: Clone + PartialEq + 'static> Default for ParetoFront<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Clone> ParetoFront<G> {
    /// Archive with a caller-supplied similarity predicate. The predicate
    /// must be reflexive and symmetric; it need not be transitive, but a
    /// non-transitive predicate can leave the archive holding entries a
    /// transitive reading would call duplicates. That tradeoff is the
    /// caller's.
    pub fn with_similarity(similar: impl Fn(&G, &G) -> bool + 'static) -> Self {
        Self {
            items: Vec::new(),
            similar: Box::new(similar),
        }
    }

    /// Folds a population into the archive: candidates dominated by an
    /// archived entry are discarded, archived entries dominated by a
    /// candidate are evicted, and fitness-equal twins (per the similarity
    /// predicate) are discarded. Surviving candidates are inserted
    /// deep-copied at their sorted position.
    pub fn update(&mut self, population: &[Individual<G>]) -> Result<(), SelectionError> {
        self.validate_candidates(population)?;

        for candidate in population {
            let mut is_dominated = false;
            let mut has_twin = false;
            let mut to_remove: Vec<usize> = Vec::new();

            for (i, archived) in self.items.iter().enumerate() {
                if candidate.fitness.is_dominated_by(&archived.fitness) {
                    is_dominated = true;
                    break;
                } else if archived.fitness.is_dominated_by(&candidate.fitness) {
                    to_remove.push(i);
                } else if candidate.fitness == archived.fitness
                    && (self.similar)(&candidate.genome, &archived.genome)
                {
                    has_twin = true;
                    break;
                }
            }

            // Indices collected ascending; removing from the back keeps the
            // remaining ones valid.
            for &i in to_remove.iter().rev() {
                self.items.remove(i);
            }
            if !is_dominated && !has_twin {
                sorted_insert(&mut self.items, candidate);
            }
        }
        Ok(())
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

impl<G: Clone> Index<usize> for ParetoFront<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}
