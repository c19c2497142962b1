// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod json_extractor;
pub mod json_store;
pub mod memory_store;
