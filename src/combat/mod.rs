pub mod auto;
pub mod logic;
pub mod math;
pub mod types;
