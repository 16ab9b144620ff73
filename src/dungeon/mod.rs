pub mod generation;
pub mod types;
