pub mod db;
pub mod llm;
pub mod prompt;
pub mod webhook;
