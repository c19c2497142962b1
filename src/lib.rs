// Runway friction test reports: parsing, chainage alignment and risk classification
pub mod application;
pub mod domain;
pub mod infrastructure;
