// Friction smoothing, thirds attribution and risk colors
use super::sample::MeasurementSample;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROLLING_WINDOW: usize = 10;
pub const INTERVAL: usize = 10;
pub const RED_MARGIN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    #[default]
    White,
    Red,
    Yellow,
    Green,
}

impl RiskColor {
    pub fn from_average(v: f64) -> Self {
        if v == 0.0 {
            Self::White
        } else if v < 0.5 {
            Self::Red
        } else if v < 0.6 {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for RiskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary friction per runway third
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrictionThirds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// A sample together with everything the classifier derived for it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassifiedSample {
    pub sample: MeasurementSample,
    pub rolling_average: f64,
    pub interval_average: Option<f64>,
    pub third: f64,
    pub color: RiskColor,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Centered mean over `ROLLING_WINDOW` values (5 before, 4 after). Positions
/// whose window does not fit inside the series are 0.
pub fn rolling_average(values: &[f64]) -> Vec<f64> {
    let before = ROLLING_WINDOW / 2;
    let after = ROLLING_WINDOW - before - 1;
    (0..values.len())
        .map(|i| {
            if i < before || i + after >= values.len() {
                return 0.0;
            }
            let window = &values[i - before..=i + after];
            round2(window.iter().sum::<f64>() / ROLLING_WINDOW as f64)
        })
        .collect()
}

/// Mean of each complete block of `INTERVAL` values, repeated over the block.
/// Values past the last complete block have no average.
pub fn interval_average(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for (block, chunk) in values.chunks_exact(INTERVAL).enumerate() {
        let mean = chunk.iter().sum::<f64>() / INTERVAL as f64;
        let start = block * INTERVAL;
        out[start..start + INTERVAL].fill(Some(mean));
    }
    out
}

/// Attribute the summary friction of each third to every row of that third.
pub fn friction_thirds(len: usize, thirds: FrictionThirds) -> Vec<f64> {
    let first = len / 3;
    let second = 2 * len / 3;
    (0..len)
        .map(|row| {
            if row < first {
                thirds.a
            } else if row < second {
                thirds.b
            } else {
                thirds.c
            }
        })
        .collect()
}

/// Base colors, then every row within `RED_MARGIN` of a base-red row turns red.
pub fn classify(averages: &[f64]) -> Vec<RiskColor> {
    let base: Vec<RiskColor> = averages.iter().copied().map(RiskColor::from_average).collect();
    (0..base.len())
        .map(|i| {
            let lo = i.saturating_sub(RED_MARGIN);
            let hi = (i + RED_MARGIN).min(base.len() - 1);
            if base[lo..=hi].contains(&RiskColor::Red) {
                RiskColor::Red
            } else {
                base[i]
            }
        })
        .collect()
}

pub fn classify_samples(samples: &[MeasurementSample], thirds: FrictionThirds) -> Vec<ClassifiedSample> {
    let friction: Vec<f64> = samples.iter().map(|s| s.friction).collect();
    let rolling = rolling_average(&friction);
    let interval = interval_average(&friction);
    let third = friction_thirds(samples.len(), thirds);
    let colors = classify(&rolling);

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| ClassifiedSample {
            sample: *sample,
            rolling_average: rolling[i],
            interval_average: interval[i],
            third: third[i],
            color: colors[i],
        })
        .collect()
}
