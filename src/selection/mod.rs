pub mod nsga2;
pub mod spea2;

pub use nsga2::select_nsga2;
pub use spea2::select_spea2;
