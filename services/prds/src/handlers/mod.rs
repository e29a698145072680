pub mod generate;
pub mod health;
pub mod prd;
pub mod webhook;
