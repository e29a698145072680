pub mod prompt;
pub mod repository;
pub mod types;
