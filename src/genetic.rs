use std::cmp::Ordering;
use std::fmt;

use ndarray::Array1;

/// Error type shared by the selection and archive operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Two fitness vectors (or a values/weights pair) of differing length met.
    ArityMismatch { expected: usize, found: usize },
    /// An individual was required from an empty collection.
    EmptyInput(String),
    /// A capacity or selection target that cannot be honored.
    CapacityViolation(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::ArityMismatch { expected, found } => {
                write!(
                    f,
                    "Fitness arity mismatch: expected {} objectives, found {}",
                    expected, found
                )
            }
            SelectionError::EmptyInput(msg) => write!(f, "Empty input: {}", msg),
            SelectionError::CapacityViolation(msg) => write!(f, "Capacity violation: {}", msg),
        }
    }
}

impl std::error::Error for SelectionError {}

/// A fixed-arity vector of objective values together with the weight signs
/// fixed at construction (+1.0 to maximize an objective, -1.0 to minimize it).
///
/// All comparisons go through the weighted values, so dominance and the total
/// archive order read "bigger is better" regardless of the direction of each
/// raw objective. Raw values stay available for distance computations.
#[derive(Debug, Clone)]
pub struct Fitness {
    values: Array1<f64>,
    weights: Array1<f64>,
    wvalues: Array1<f64>,
}

impl Fitness {
    /// Creates a fitness from raw objective values and their weight signs.
    /// Fails with `ArityMismatch` when the two vectors differ in length.
    pub fn new(values: Array1<f64>, weights: Array1<f64>) -> Result<Self, SelectionError> {
        if values.len() != weights.len() {
            return Err(SelectionError::ArityMismatch {
                expected: weights.len(),
                found: values.len(),
            });
        }
        let wvalues = &values * &weights;
        Ok(Self {
            values,
            weights,
            wvalues,
        })
    }

    /// Fitness where every objective is maximized.
    pub fn maximizing(values: Array1<f64>) -> Self {
        let weights = Array1::from_elem(values.len(), 1.0);
        Self::new(values, weights).expect("weights built with matching length")
    }

    /// Fitness where every objective is minimized.
    pub fn minimizing(values: Array1<f64>) -> Self {
        let weights = Array1::from_elem(values.len(), -1.0);
        Self::new(values, weights).expect("weights built with matching length")
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// The weighted objective values every comparison is based on.
    pub fn wvalues(&self) -> &Array1<f64> {
        &self.wvalues
    }

    pub fn n_objectives(&self) -> usize {
        self.values.len()
    }

    /// Pareto dominance over the weighted values: `self` dominates `other`
    /// iff it is no worse in every objective and strictly better in at least
    /// one. Equal vectors dominate neither way. Both sides must share one
    /// arity; public entry points validate that once per call.
    pub fn dominates(&self, other: &Fitness) -> bool {
        debug_assert_eq!(self.wvalues.len(), other.wvalues.len());
        let mut better = false;
        for (&a, &b) in self.wvalues.iter().zip(other.wvalues.iter()) {
            if a < b {
                return false;
            } else if a > b {
                better = true;
            }
        }
        better
    }

    pub fn is_dominated_by(&self, other: &Fitness) -> bool {
        other.dominates(self)
    }
}

impl PartialEq for Fitness {
    fn eq(&self, other: &Self) -> bool {
        self.wvalues.len() == other.wvalues.len()
            && self
                .wvalues
                .iter()
                .zip(other.wvalues.iter())
                .all(|(a, b)| a == b)
    }
}

/// Elementwise lexicographic order over the weighted values. This is the
/// total order the bounded archive ranks by; it is unrelated to dominance.
/// `None` only for mismatched arity or NaN objectives.
impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.wvalues.len() != other.wvalues.len() {
            return None;
        }
        for (a, b) in self.wvalues.iter().zip(other.wvalues.iter()) {
            match a.partial_cmp(b)? {
                Ordering::Equal => continue,
                ord => return Some(ord),
            }
        }
        Some(Ordering::Equal)
    }
}

/// An opaque genome payload plus exactly one fitness. The selection core
/// compares individuals only through their fitness; the genome is touched
/// only when an archive clones it for storage. `G::clone` must therefore be
/// a deep copy; genomes sharing interior-mutable state would alias archive
/// entries with the live population.
#[derive(Debug, Clone)]
pub struct Individual<G: Clone> {
    pub genome: G,
    pub fitness: Fitness,
}

impl<G: Clone> Individual<G> {
    pub fn new(genome: G, fitness: Fitness) -> Self {
        Self { genome, fitness }
    }
}

/// An ordered sequence of individuals; duplicates permitted.
pub type Population<G> = Vec<Individual<G>>;

/// Checks that every fitness in the population carries the same arity and
/// returns it (0 for an empty population).
pub(crate) fn validate_uniform_arity<G: Clone>(
    individuals: &[Individual<G>],
) -> Result<usize, SelectionError> {
    let Some(first) = individuals.first() else {
        return Ok(0);
    };
    let expected = first.fitness.n_objectives();
    for ind in &individuals[1..] {
        let found = ind.fitness.n_objectives();
        if found != expected {
            return Err(SelectionError::ArityMismatch { expected, found });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rstest::rstest;

    fn maxi(values: Array1<f64>) -> Fitness {
        Fitness::maximizing(values)
    }

    #[rstest]
    // Strictly better everywhere.
    #[case(array![2.0, 3.0], array![1.0, 2.0], true)]
    // Better in one objective, equal in the other.
    #[case(array![2.0, 2.0], array![1.0, 2.0], true)]
    // Equal vectors dominate neither way.
    #[case(array![1.0, 2.0], array![1.0, 2.0], false)]
    // Trade-off: neither dominates.
    #[case(array![2.0, 1.0], array![1.0, 2.0], false)]
    // Strictly worse everywhere.
    #[case(array![0.0, 1.0], array![1.0, 2.0], false)]
    fn test_dominates_maximizing(
        #[case] a: Array1<f64>,
        #[case] b: Array1<f64>,
        #[case] expected: bool,
    ) {
        assert_eq!(maxi(a).dominates(&maxi(b)), expected);
    }

    #[test]
    fn test_dominates_minimizing_flips_direction() {
        let a = Fitness::minimizing(array![1.0, 1.0]);
        let b = Fitness::minimizing(array![2.0, 3.0]);
        assert!(a.dominates(&b), "Smaller values win under -1.0 weights");
        assert!(!b.dominates(&a));
        assert!(b.is_dominated_by(&a));
    }

    #[test]
    fn test_dominates_mixed_weights() {
        // First objective maximized, second minimized.
        let weights = array![1.0, -1.0];
        let a = Fitness::new(array![2.0, 1.0], weights.clone()).unwrap();
        let b = Fitness::new(array![1.0, 3.0], weights).unwrap();
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
    }

    #[test]
    fn test_dominance_is_irreflexive() {
        let a = maxi(array![1.0, 2.0, 3.0]);
        assert!(!a.dominates(&a));
    }

    #[test]
    fn test_total_order_is_lexicographic() {
        let a = maxi(array![1.0, 5.0]);
        let b = maxi(array![2.0, 0.0]);
        // b wins on the first objective even though it loses the second.
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Less));
        assert_eq!(b.partial_cmp(&a), Some(Ordering::Greater));
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
    }

    #[test]
    fn test_total_order_respects_weights() {
        let a = Fitness::minimizing(array![1.0]);
        let b = Fitness::minimizing(array![2.0]);
        assert!(a.partial_cmp(&b) == Some(Ordering::Greater), "1.0 beats 2.0 when minimizing");
    }

    #[test]
    fn test_equality_over_weighted_values() {
        let a = maxi(array![1.0, 2.0]);
        let b = maxi(array![1.0, 2.0]);
        let c = maxi(array![1.0, 3.0]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_new_rejects_mismatched_weights() {
        let err = Fitness::new(array![1.0, 2.0], array![1.0]).unwrap_err();
        assert_eq!(
            err,
            SelectionError::ArityMismatch {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_validate_uniform_arity() {
        let pop = vec![
            Individual::new((), maxi(array![1.0, 2.0])),
            Individual::new((), maxi(array![3.0, 4.0])),
        ];
        assert_eq!(validate_uniform_arity(&pop), Ok(2));

        let mixed = vec![
            Individual::new((), maxi(array![1.0, 2.0])),
            Individual::new((), maxi(array![3.0])),
        ];
        assert_eq!(
            validate_uniform_arity(&mixed),
            Err(SelectionError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );

        let empty: Vec<Individual<()>> = Vec::new();
        assert_eq!(validate_uniform_arity(&empty), Ok(0));
    }
}
