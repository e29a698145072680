pub mod generate;
pub mod identity;
pub mod prd;
