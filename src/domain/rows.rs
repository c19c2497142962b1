// Flat rows handed to the persistence collaborator
use super::chainage::ChainageRow;
use super::classifier::RiskColor;
use super::configuration::Side;
use super::error::{FrictionError, Result};
use super::record::MeasurementRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationRow {
    pub key: String,
    pub date: NaiveDateTime,
    pub iata: String,
    pub side: Side,
    pub separation: u8,
    pub runway: String,
    pub numbering: String,
    pub average_speed: i64,
    pub fric_a: f64,
    pub fric_b: f64,
    pub fric_c: f64,
    pub org_type: String,
    pub equipment: String,
    pub pilot: String,
    pub ice_level: i64,
    pub reported_runway_length: Option<i64>,
    pub location: String,
    pub tyre_type: String,
    pub tyre_pressure: f64,
    pub water_film: String,
    pub system_distance: f64,
    pub operator: String,
    pub temperature: i32,
    pub surface_condition: String,
    pub weather: String,
    pub runway_material: String,
    pub runway_length: u32,
    pub starting_point: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub key: String,
    pub chainage: u32,
    pub distance: i64,
    pub friction: f64,
    pub speed: i64,
    pub rolling_average: f64,
    pub interval_average: Option<f64>,
    pub third: f64,
    pub color: RiskColor,
}

impl InformationRow {
    pub fn from_record(record: &MeasurementRecord) -> Result<Self> {
        let conditions = record.conditions().ok_or_else(|| {
            FrictionError::Validation(format!("site conditions of {record} not assigned"))
        })?;
        let thirds = record.thirds()?;
        Ok(Self {
            key: record.key()?,
            date: record.date()?,
            iata: record.iata()?.to_string(),
            side: record.side()?,
            separation: record.separation()?,
            runway: record.runway()?,
            numbering: format!("{:02}", record.numbering()?),
            average_speed: record.average_speed()?,
            fric_a: thirds.a,
            fric_b: thirds.b,
            fric_c: thirds.c,
            org_type: record.org_type()?.to_string(),
            equipment: record.equipment()?.to_string(),
            pilot: record.pilot()?.to_string(),
            ice_level: record.ice_level()?,
            reported_runway_length: record.reported_runway_length()?,
            location: record.location()?.to_string(),
            tyre_type: record.tyre_type()?.to_string(),
            tyre_pressure: record.tyre_pressure()?,
            water_film: record.water_film()?.to_string(),
            system_distance: record.system_distance()?,
            operator: conditions.operator.clone(),
            temperature: conditions.temperature,
            surface_condition: conditions.surface_condition.clone(),
            weather: conditions.weather.clone(),
            runway_material: conditions.runway_material.clone(),
            runway_length: conditions.runway_length,
            starting_point: conditions.starting_point,
        })
    }
}

impl MeasurementRow {
    pub fn new(key: &str, row: &ChainageRow) -> Self {
        Self {
            key: key.to_string(),
            chainage: row.chainage,
            distance: row.distance,
            friction: row.friction,
            speed: row.speed,
            rolling_average: row.rolling_average,
            interval_average: row.interval_average,
            third: row.third,
            color: row.color,
        }
    }
}

/// Information row plus one measurement row per chainage step
pub fn record_rows(record: &MeasurementRecord) -> Result<(InformationRow, Vec<MeasurementRow>)> {
    let info = InformationRow::from_record(record)?;
    let rows = record
        .measurements_with_chainage()?
        .iter()
        .map(|row| MeasurementRow::new(&info.key, row))
        .collect();
    Ok((info, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::fixtures::{conditions, record_with};

    #[test]
    fn test_record_rows() {
        let record = record_with("doc", "RGL RWY 07 L3", &[0.7; 12]);
        record.assign(conditions(200, 20)).unwrap();

        let (info, rows) = record_rows(&record).unwrap();
        assert_eq!(info.key, "2303101119RGL07L3");
        assert_eq!(info.numbering, "07");
        assert_eq!(info.runway, "07-25");
        assert_eq!(info.operator, "Demassi / Buzzi");
        assert_eq!(info.starting_point, 20);
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|r| r.key == info.key));
        assert_eq!(rows[2].distance, 10);
        assert_eq!(rows[2].chainage, 20);
        assert_eq!(rows[7].color, RiskColor::Green);
        // samples 0..4 fall in the first third, 8..12 in the last
        assert_eq!(rows[2].third, 0.68);
        assert_eq!(rows[13].third, 0.67);
        assert!((rows[2].interval_average.unwrap() - 0.7).abs() < 1e-9);
        assert_eq!(rows[13].interval_average, None);
        assert_eq!(rows[0].interval_average, None);
        assert_eq!(rows[0].third, 0.0);
    }

    #[test]
    fn test_information_row_requires_conditions() {
        let record = record_with("doc", "RGL RWY 07 L3", &[0.7; 3]);
        assert!(matches!(
            InformationRow::from_record(&record),
            Err(FrictionError::Validation(_))
        ));
    }

    #[test]
    fn test_measurement_row_serializes_color_lowercase() {
        let row = MeasurementRow::new(
            "k",
            &ChainageRow {
                chainage: 10,
                color: RiskColor::Yellow,
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["color"], "yellow");
        assert_eq!(json["chainage"], 10);
    }
}
