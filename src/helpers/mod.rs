pub mod linalg;
pub mod order_statistic;
