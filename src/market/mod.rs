pub mod display;
pub mod hash;
pub mod types;
