// Application layer - Use cases and collaborator traits
pub mod ingest_service;
pub mod measurement_store;
pub mod table_extractor;
