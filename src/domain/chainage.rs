// Alignment of run samples onto the absolute runway chainage
use super::classifier::{ClassifiedSample, RiskColor};
use super::error::{FrictionError, Result};
use super::runway::Direction;
use serde::{Deserialize, Serialize};

pub const STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChainageRow {
    pub chainage: u32,
    pub distance: i64,
    pub friction: f64,
    pub speed: i64,
    pub rolling_average: f64,
    /// 100 m block mean, absent past the last complete block
    pub interval_average: Option<f64>,
    /// Summary friction of the runway third this sample falls in
    pub third: f64,
    pub color: RiskColor,
}

impl ChainageRow {
    fn empty(chainage: u32) -> Self {
        Self {
            chainage,
            ..Default::default()
        }
    }

    fn place(&mut self, classified: &ClassifiedSample) {
        self.distance = classified.sample.distance;
        self.friction = classified.sample.friction;
        self.speed = classified.sample.speed;
        self.rolling_average = classified.rolling_average;
        self.interval_average = classified.interval_average;
        self.third = classified.third;
        self.color = classified.color;
    }

    pub fn is_placed(&self) -> bool {
        self.distance != 0 || self.friction != 0.0 || self.speed != 0
    }
}

/// Every multiple of `STEP` from 0 to `runway_length`, plus `runway_length`
/// itself when it is not a multiple, in travel order.
pub fn chainage_scale(runway_length: u32, direction: Direction) -> Vec<u32> {
    let mut scale: Vec<u32> = (0..=runway_length).step_by(STEP as usize).collect();
    if scale.last() != Some(&runway_length) {
        scale.push(runway_length);
    }
    if direction == Direction::Descending {
        scale.reverse();
    }
    scale
}

/// Place `samples` on the chainage scale of a runway, the first sample on
/// the row equal to `starting_point`.
///
/// Runs on runway ends 19..36 travel towards chainage 0, so consecutive
/// samples land on decreasing chainage values. Rows without a sample keep
/// zero values and a white color.
pub fn align(
    samples: &[ClassifiedSample],
    numbering: u8,
    runway_length: u32,
    starting_point: u32,
) -> Result<Vec<ChainageRow>> {
    let direction = Direction::from_numbering(numbering)?;
    if runway_length == 0 {
        return Err(FrictionError::Validation(
            "runway length must be positive".to_string(),
        ));
    }

    let mut rows: Vec<ChainageRow> = chainage_scale(runway_length, direction)
        .into_iter()
        .map(ChainageRow::empty)
        .collect();

    let start_index = rows
        .iter()
        .position(|row| row.chainage == starting_point)
        .ok_or(FrictionError::NotFound { starting_point })?;

    if start_index + samples.len() > rows.len() {
        return Err(FrictionError::Overflow {
            start_index,
            samples: samples.len(),
            scale_len: rows.len(),
        });
    }

    for (row, classified) in rows[start_index..].iter_mut().zip(samples) {
        row.place(classified);
    }

    tracing::debug!(
        "Placed {} samples from chainage {} ({:?}) on a {} row scale",
        samples.len(),
        starting_point,
        direction,
        rows.len()
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::MeasurementSample;
    use pretty_assertions::assert_eq;

    fn classified(n: usize) -> Vec<ClassifiedSample> {
        (0..n)
            .map(|i| ClassifiedSample {
                sample: MeasurementSample::new((i as i64 + 1) * 10, 0.5 + i as f64 / 100.0, 60),
                rolling_average: 0.55,
                interval_average: (i < 2).then_some(0.52),
                third: 0.6,
                color: RiskColor::Yellow,
            })
            .collect()
    }

    #[test]
    fn test_scale_lengths() {
        let scale = chainage_scale(2390, Direction::Ascending);
        assert_eq!(scale.len(), 240);
        assert_eq!(scale.last(), Some(&2390));

        let scale = chainage_scale(2395, Direction::Ascending);
        assert_eq!(scale.len(), 241);
        assert_eq!(&scale[238..], &[2380, 2390, 2395]);
    }

    #[test]
    fn test_scale_descending() {
        assert_eq!(chainage_scale(25, Direction::Descending), vec![25, 20, 10, 0]);
    }

    #[test]
    fn test_align_ascending_round_trip() {
        let samples = classified(4);
        let rows = align(&samples, 7, 100, 30).unwrap();
        assert_eq!(rows.len(), 11);

        let start = 3;
        for (i, s) in samples.iter().enumerate() {
            let row = rows[start + i];
            assert_eq!(row.chainage, 30 + 10 * i as u32);
            assert_eq!(row.distance, s.sample.distance);
            assert_eq!(row.friction, s.sample.friction);
            assert_eq!(row.speed, s.sample.speed);
            assert_eq!(row.rolling_average, s.rolling_average);
            assert_eq!(row.interval_average, s.interval_average);
            assert_eq!(row.third, 0.6);
            assert_eq!(row.color, s.color);
        }
        for (i, row) in rows.iter().enumerate() {
            if !(start..start + samples.len()).contains(&i) {
                assert_eq!(*row, ChainageRow::empty(row.chainage));
                assert!(!row.is_placed());
            }
        }
    }

    #[test]
    fn test_align_descending_lands_on_decreasing_chainage() {
        let rows = align(&classified(3), 25, 100, 90).unwrap();
        assert_eq!(rows[0].chainage, 100);
        let placed: Vec<(u32, i64)> = rows
            .iter()
            .filter(|r| r.is_placed())
            .map(|r| (r.chainage, r.distance))
            .collect();
        assert_eq!(placed, vec![(90, 10), (80, 20), (70, 30)]);
    }

    #[test]
    fn test_align_overflow() {
        let err = align(&classified(5), 7, 100, 90).unwrap_err();
        assert_eq!(
            err,
            FrictionError::Overflow {
                start_index: 9,
                samples: 5,
                scale_len: 11
            }
        );
    }

    #[test]
    fn test_align_fills_scale_exactly() {
        let rows = align(&classified(2), 7, 100, 90).unwrap();
        assert!(rows[9].is_placed());
        assert!(rows[10].is_placed());
    }

    #[test]
    fn test_align_starting_point_not_on_scale() {
        let err = align(&classified(1), 7, 100, 95).unwrap_err();
        assert_eq!(err, FrictionError::NotFound { starting_point: 95 });
    }

    #[test]
    fn test_align_rejects_bad_numbering_and_length() {
        assert!(matches!(align(&classified(1), 0, 100, 0), Err(FrictionError::Validation(_))));
        assert!(matches!(align(&classified(1), 37, 100, 0), Err(FrictionError::Validation(_))));
        assert!(matches!(align(&classified(1), 7, 0, 0), Err(FrictionError::Validation(_))));
    }
}
