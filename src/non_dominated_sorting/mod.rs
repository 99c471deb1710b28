mod dominator;

pub(crate) use dominator::dominance_relations;
pub use dominator::{fast_non_dominated_sorting, sort_nondominated};
