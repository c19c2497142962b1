// Runway configuration label parsing, e.g. "RGL RWY 07 L3"
use super::error::{FrictionError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

const SOURCE: &str = "configuration";

static IATA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}").expect("valid regex"));
static NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RWY(\d{2})|(\d{2})\s").expect("valid regex"));
static SIDE_SEPARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][0-9]").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    L,
    R,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Self::L => Self::R,
            Self::R => Self::L,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::L => 'L',
            Self::R => 'R',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Self::L),
            'R' => Some(Self::R),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunwayConfiguration {
    pub iata: String,
    pub numbering: u8,
    pub relative_side: Side,
    pub separation: u8,
}

impl RunwayConfiguration {
    pub fn parse(label: &str) -> Result<Self> {
        let iata = IATA
            .find(label)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| FrictionError::parse(SOURCE, format!("no IATA code in '{label}'")))?;

        let numbering = find_numbering(label)
            .ok_or_else(|| FrictionError::parse(SOURCE, format!("no runway numbering in '{label}'")))?;
        if !(1..=36).contains(&numbering) {
            return Err(FrictionError::parse(
                SOURCE,
                format!("runway numbering {numbering:02} outside 01..36 in '{label}'"),
            ));
        }

        // Earlier letter+digit pairs (e.g. "Y0" in "RWY07") are discarded
        let pair = SIDE_SEPARATION
            .find_iter(label)
            .last()
            .map(|m| m.as_str())
            .ok_or_else(|| FrictionError::parse(SOURCE, format!("no side/separation in '{label}'")))?;
        let mut chars = pair.chars();
        let (letter, digit) = match (chars.next(), chars.next()) {
            (Some(letter), Some(digit)) => (letter, digit),
            _ => return Err(FrictionError::parse(SOURCE, format!("bad side/separation '{pair}'"))),
        };
        let relative_side = Side::from_char(letter)
            .ok_or_else(|| FrictionError::parse(SOURCE, format!("side '{letter}' is neither L nor R in '{label}'")))?;
        let separation = digit
            .to_digit(10)
            .map(|d| d as u8)
            .ok_or_else(|| FrictionError::parse(SOURCE, format!("bad separation '{digit}'")))?;

        Ok(Self {
            iata,
            numbering,
            relative_side,
            separation,
        })
    }

    /// The trailing side/separation token, e.g. "L3"
    pub fn side_token(&self) -> String {
        format!("{}{}", self.relative_side, self.separation)
    }
}

/// Leftmost two-digit run that either directly follows "RWY" or is followed by whitespace.
fn find_numbering(label: &str) -> Option<u8> {
    let caps = NUMBERING.captures(label)?;
    caps.get(1).or(caps.get(2))?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_label() {
        let config = RunwayConfiguration::parse("RGL RWY 07 L3").unwrap();
        assert_eq!(config.iata, "RGL");
        assert_eq!(config.numbering, 7);
        assert_eq!(config.relative_side, Side::L);
        assert_eq!(config.separation, 3);
    }

    #[test]
    fn test_parse_keeps_last_side_pair() {
        let config = RunwayConfiguration::parse("AEP 31 BORDE L5").unwrap();
        assert_eq!(config.numbering, 31);
        assert_eq!(config.side_token(), "L5");

        // "Y0" inside "RWY05" is an earlier letter+digit match
        let config = RunwayConfiguration::parse("EQS RWY05 R3").unwrap();
        assert_eq!(config.numbering, 5);
        assert_eq!(config.relative_side, Side::R);
        assert_eq!(config.separation, 3);
    }

    #[test]
    fn test_numbering_position_rules() {
        assert_eq!(find_numbering("RWY07 L3"), Some(7));
        assert_eq!(find_numbering("RWY 07 L3"), Some(7));
        assert_eq!(find_numbering("A12RWY34 L3"), Some(34));
        assert_eq!(find_numbering("RWY123 L3"), Some(12));
        assert_eq!(find_numbering("AEP 123 L3"), Some(23));
        assert_eq!(find_numbering("RWY L3"), None);
    }

    #[test]
    fn test_parse_double_space_label() {
        let config = RunwayConfiguration::parse("AEP RWY 31  R3").unwrap();
        assert_eq!(config.numbering, 31);
        assert_eq!(config.side_token(), "R3");
    }

    #[test]
    fn test_side_token_reproduces_label_suffix() {
        for label in ["EZE RWY 35 L3", "EQS RWY 23 BORDE L5", "EQS RWY 05 R5", "AEP RWY 13 R1"] {
            let config = RunwayConfiguration::parse(label).unwrap();
            assert!((1..=36).contains(&config.numbering));
            assert!(label.ends_with(&config.side_token()), "{label}");
        }
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            RunwayConfiguration::parse("rgl RWY 07 L3"),
            Err(FrictionError::Parse { .. })
        ));
        assert!(matches!(
            RunwayConfiguration::parse("RGL RWY L3"),
            Err(FrictionError::Parse { .. })
        ));
        assert!(matches!(
            RunwayConfiguration::parse("RGL RWY 40 L3"),
            Err(FrictionError::Parse { .. })
        ));
        assert!(matches!(
            RunwayConfiguration::parse("RGL RWY 00 L3"),
            Err(FrictionError::Parse { .. })
        ));
        assert!(matches!(
            RunwayConfiguration::parse("RGL RWY 07 C3"),
            Err(FrictionError::Parse { .. })
        ));
    }

    #[test]
    fn test_side_flip() {
        assert_eq!(Side::L.flipped(), Side::R);
        assert_eq!(Side::R.flipped().flipped(), Side::R);
    }
}
