// Per-run friction samples
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementSample {
    /// Position within the local run, in steps of 10 m
    pub distance: i64,
    pub friction: f64,
    pub speed: i64,
}

impl MeasurementSample {
    pub fn new(distance: i64, friction: f64, speed: i64) -> Self {
        Self {
            distance,
            friction,
            speed,
        }
    }
}
