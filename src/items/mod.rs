pub mod catalog;
pub mod drops;
pub mod generation;
pub mod types;
