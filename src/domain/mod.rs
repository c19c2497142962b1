// Domain layer - Report parsing, chainage alignment and friction classification
pub mod chainage;
pub mod classifier;
pub mod configuration;
pub mod error;
pub mod pairing;
pub mod record;
pub mod report;
pub mod rows;
pub mod runway;
pub mod sample;
