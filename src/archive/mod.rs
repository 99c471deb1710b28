use std::cmp::Ordering;

use crate::genetic::Individual;

mod hall_of_fame;
mod pareto_front;

pub use hall_of_fame::HallOfFame;
pub use pareto_front::ParetoFront;

/// Deep-copies `individual` into its position in a best-first list ordered
/// by the total fitness order. The new entry lands before existing equals,
/// which keeps the relative order of equal fitnesses stable.
pub(crate) fn sorted_insert<G: Clone>(items: &mut Vec<Individual<G>>, individual: &Individual<G>) {
    let position = items.partition_point(|stored| {
        stored.fitness.partial_cmp(&individual.fitness) == Some(Ordering::Greater)
    });
    items.insert(position, individual.clone());
}
