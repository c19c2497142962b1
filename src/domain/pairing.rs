// Consistency checks for a left/right pair of runs over the same runway
use super::configuration::Side;
use super::error::{FrictionError, Result};
use super::record::MeasurementRecord;

fn same<T: PartialEq + std::fmt::Display>(attribute: &str, left: T, right: T) -> Result<()> {
    if left != right {
        return Err(FrictionError::Validation(format!(
            "{attribute} values must be the same for both runs, found '{left}' and '{right}'"
        )));
    }
    Ok(())
}

pub fn validate_pair(left: &MeasurementRecord, right: &MeasurementRecord) -> Result<()> {
    for (record, expected) in [(left, Side::L), (right, Side::R)] {
        let side = record.relative_side()?;
        if side != expected {
            return Err(FrictionError::Validation(format!(
                "{} must be a {expected} run, found '{side}'",
                record.filename()
            )));
        }
    }

    same("iata", left.iata()?, right.iata()?)?;
    same("runway", left.runway()?, right.runway()?)?;
    same("numbering", left.numbering()?, right.numbering()?)?;
    same("separation", left.separation()?, right.separation()?)?;
    same("equipment", left.equipment()?, right.equipment()?)?;
    same("tyre type", left.tyre_type()?, right.tyre_type()?)?;
    same("sample count", left.len()?, right.len()?)?;
    Ok(())
}
