pub mod engine;
pub mod pools;
pub mod types;
