// Domain error taxonomy
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrictionError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrictionError {
    /// Malformed or missing structure in raw grids or configuration text
    #[error("parse error in {source_name}: {message}")]
    Parse { source_name: String, message: String },

    /// Cross-field invariant violation
    #[error("validation error: {0}")]
    Validation(String),

    #[error(
        "the measurements overflow the chainage scale ({samples} samples from row {start_index}, \
         scale has {scale_len} rows); adjust the starting point or the runway length"
    )]
    Overflow {
        start_index: usize,
        samples: usize,
        scale_len: usize,
    },

    #[error("starting point {starting_point} is not on the chainage scale")]
    NotFound { starting_point: u32 },
}

impl FrictionError {
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Re-attribute a parse error to the document it came from
    pub fn in_source(self, name: &str) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse {
                source_name: name.to_string(),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_source_renames_parse_errors_only() {
        let err = FrictionError::parse("configuration", "no IATA code").in_source("RGL RWY 07 L3_230310");
        assert_eq!(
            err.to_string(),
            "parse error in RGL RWY 07 L3_230310: no IATA code"
        );

        let err = FrictionError::NotFound { starting_point: 95 }.in_source("x");
        assert_eq!(err, FrictionError::NotFound { starting_point: 95 });
    }
}
