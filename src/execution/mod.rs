pub mod engine;
pub mod impact;
pub mod sizing;
pub mod types;
pub mod validation;
