// Runway geometry derived from a runway-end numbering
use super::configuration::Side;
use super::error::{FrictionError, Result};

/// Direction of travel along the chainage scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Runway ends 01..18, chainage grows with each sample
    Ascending,
    /// Runway ends 19..36, chainage shrinks with each sample
    Descending,
}

impl Direction {
    pub fn from_numbering(numbering: u8) -> Result<Self> {
        match numbering {
            1..=18 => Ok(Self::Ascending),
            19..=36 => Ok(Self::Descending),
            other => Err(FrictionError::Validation(format!(
                "runway numbering {other} outside 1..=36"
            ))),
        }
    }
}

/// Runway-end number on the opposite end, in 1..=36.
pub fn reciprocal(numbering: u8) -> u8 {
    ((numbering as u16 + 18 - 1) % 36 + 1) as u8
}

/// Display label pairing both runway ends, lowest first: 07 -> "07-25".
pub fn runway_label(numbering: u8) -> String {
    if numbering == 18 {
        return "00-18".to_string();
    }
    let other = reciprocal(numbering);
    format!("{:02}-{:02}", numbering.min(other), numbering.max(other))
}

/// Physical side of the run independent of the direction of travel.
pub fn absolute_side(numbering: u8, relative_side: Side) -> Side {
    if numbering <= 18 {
        relative_side
    } else {
        relative_side.flipped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reciprocal() {
        assert_eq!(reciprocal(7), 25);
        assert_eq!(reciprocal(18), 36);
        assert_eq!(reciprocal(36), 18);
        assert_eq!(reciprocal(31), 13);
        assert_eq!(reciprocal(1), 19);
    }

    #[test]
    fn test_runway_label() {
        assert_eq!(runway_label(18), "00-18");
        assert_eq!(runway_label(7), "07-25");
        assert_eq!(runway_label(31), "13-31");
        assert_eq!(runway_label(25), "07-25");
        assert_eq!(runway_label(36), "18-36");
    }

    #[test]
    fn test_absolute_side() {
        assert_eq!(absolute_side(25, Side::L), Side::R);
        assert_eq!(absolute_side(7, Side::L), Side::L);
        assert_eq!(absolute_side(18, Side::R), Side::R);
        assert_eq!(absolute_side(19, Side::R), Side::L);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_numbering(18).unwrap(), Direction::Ascending);
        assert_eq!(Direction::from_numbering(19).unwrap(), Direction::Descending);
        assert!(matches!(Direction::from_numbering(0), Err(FrictionError::Validation(_))));
        assert!(matches!(Direction::from_numbering(37), Err(FrictionError::Validation(_))));
    }
}
