pub mod archive;
pub mod genetic;
pub mod helpers;
pub mod non_dominated_sorting;
pub mod random;
pub mod selection;
