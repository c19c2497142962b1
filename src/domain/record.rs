// Measurement record aggregate - one per friction test report
use super::chainage::{self, ChainageRow};
use super::classifier::{self, ClassifiedSample, FrictionThirds};
use super::configuration::{RunwayConfiguration, Side};
use super::error::{FrictionError, Result};
use super::report::{self, Grid, HeaderBlock, SummaryBlock};
use super::runway;
use super::sample::MeasurementSample;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

pub const DATE_FORMAT: &str = "%y-%m-%d %H:%M:%S";
const KEY_DATE_FORMAT: &str = "%y%m%d%H%M";

/// Conditions recorded on site, supplied by the caller rather than the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConditions {
    pub operator: String,
    pub temperature: i32,
    pub surface_condition: String,
    pub weather: String,
    pub runway_material: String,
    pub runway_length: u32,
    pub starting_point: u32,
}

/// Raw grids as returned by the table extractor
#[derive(Debug, Clone)]
struct RawTables {
    header: Grid,
    summary: Grid,
    samples: Vec<Grid>,
}

#[derive(Debug)]
pub struct MeasurementRecord {
    filename: String,
    raw: RawTables,

    header: OnceLock<HeaderBlock>,
    summary: OnceLock<SummaryBlock>,
    samples: OnceLock<Vec<MeasurementSample>>,
    configuration: OnceLock<RunwayConfiguration>,
    date: OnceLock<NaiveDateTime>,

    conditions: OnceLock<SiteConditions>,
}

fn memoize<'a, T>(cell: &'a OnceLock<T>, compute: impl FnOnce() -> Result<T>) -> Result<&'a T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = compute()?;
    Ok(cell.get_or_init(|| value))
}

impl MeasurementRecord {
    /// Grid 0 is the header block, grid 1 the summary, the rest are sample blocks.
    pub fn from_grids(filename: impl Into<String>, grids: Vec<Grid>) -> Result<Self> {
        let filename = filename.into();
        if grids.len() < 3 {
            return Err(FrictionError::parse(
                &filename,
                format!("expected at least 3 tables, found {}", grids.len()),
            ));
        }
        let mut grids = grids.into_iter();
        let header = grids.next().unwrap_or_default();
        let summary = grids.next().unwrap_or_default();
        let samples = grids.collect();

        Ok(Self {
            filename,
            raw: RawTables {
                header,
                summary,
                samples,
            },
            header: OnceLock::new(),
            summary: OnceLock::new(),
            samples: OnceLock::new(),
            configuration: OnceLock::new(),
            date: OnceLock::new(),
            conditions: OnceLock::new(),
        })
    }

    /// Record identity: the file stem of the source document
    pub fn filename_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn header(&self) -> Result<&HeaderBlock> {
        memoize(&self.header, || {
            tracing::debug!("Reshaping header block of {}", self.filename);
            report::parse_header(&self.raw.header, &self.filename)
        })
    }

    pub fn summary(&self) -> Result<&SummaryBlock> {
        memoize(&self.summary, || {
            tracing::debug!("Reshaping summary block of {}", self.filename);
            report::parse_summary(&self.raw.summary, &self.filename)
        })
    }

    pub fn samples(&self) -> Result<&[MeasurementSample]> {
        memoize(&self.samples, || {
            tracing::debug!("Reshaping sample blocks of {}", self.filename);
            report::parse_samples(&self.raw.samples, &self.filename)
        })
        .map(Vec::as_slice)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.samples()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.samples()?.is_empty())
    }

    fn header_field(&self, label: &str) -> Result<&str> {
        self.header()?
            .get(label)
            .ok_or_else(|| FrictionError::parse(&self.filename, format!("header field '{label}' missing")))
    }

    fn header_value<T: FromStr>(&self, label: &str) -> Result<T> {
        let raw = self.header_field(label)?;
        raw.trim().parse().map_err(|_| {
            FrictionError::parse(&self.filename, format!("header field '{label}' has invalid value '{raw}'"))
        })
    }

    fn summary_value(&self, column: &str) -> Result<f64> {
        let raw = self
            .summary()?
            .get(column)
            .ok_or_else(|| FrictionError::parse(&self.filename, format!("summary column '{column}' missing")))?;
        raw.trim().parse().map_err(|_| {
            FrictionError::parse(&self.filename, format!("summary column '{column}' has invalid value '{raw}'"))
        })
    }

    pub fn configuration(&self) -> Result<&RunwayConfiguration> {
        memoize(&self.configuration, || {
            let label = self.header_field("Configuration")?;
            RunwayConfiguration::parse(label).map_err(|e| e.in_source(&self.filename))
        })
    }

    pub fn date(&self) -> Result<NaiveDateTime> {
        memoize(&self.date, || {
            let raw = self.header_field("Date and Time")?;
            NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
                FrictionError::parse(&self.filename, format!("date '{raw}' does not match YY-MM-DD HH:MM:SS: {e}"))
            })
        })
        .copied()
    }

    pub fn iata(&self) -> Result<&str> {
        Ok(&self.configuration()?.iata)
    }

    pub fn numbering(&self) -> Result<u8> {
        Ok(self.configuration()?.numbering)
    }

    pub fn relative_side(&self) -> Result<Side> {
        Ok(self.configuration()?.relative_side)
    }

    pub fn separation(&self) -> Result<u8> {
        Ok(self.configuration()?.separation)
    }

    /// Physical side of the run, independent of the direction of travel
    pub fn side(&self) -> Result<Side> {
        let config = self.configuration()?;
        Ok(runway::absolute_side(config.numbering, config.relative_side))
    }

    /// Both runway ends, e.g. "07-25"
    pub fn runway(&self) -> Result<String> {
        Ok(runway::runway_label(self.numbering()?))
    }

    /// Dedup key used by persistence, e.g. "2303101119RGL07L3"
    pub fn key(&self) -> Result<String> {
        let date = self.date()?;
        let config = self.configuration()?;
        Ok(format!(
            "{}{}{:02}{}{}",
            date.format(KEY_DATE_FORMAT),
            config.iata,
            config.numbering,
            config.relative_side,
            config.separation
        ))
    }

    pub fn org_type(&self) -> Result<&str> {
        self.header_field("Type")
    }

    pub fn equipment(&self) -> Result<&str> {
        self.header_field("Equipment")
    }

    pub fn pilot(&self) -> Result<&str> {
        self.header_field("Pilot")
    }

    pub fn ice_level(&self) -> Result<i64> {
        self.header_value("Ice Level")
    }

    /// Runway length printed on the report, when the equipment recorded one
    pub fn reported_runway_length(&self) -> Result<Option<i64>> {
        if self.header()?.get("Runway Length").is_none() {
            return Ok(None);
        }
        self.header_value("Runway Length").map(Some)
    }

    pub fn location(&self) -> Result<&str> {
        self.header_field("Location")
    }

    pub fn tyre_type(&self) -> Result<&str> {
        self.header_field("Tyre Type")
    }

    pub fn tyre_pressure(&self) -> Result<f64> {
        self.header_value("Tyre Pressure")
    }

    pub fn water_film(&self) -> Result<&str> {
        self.header_field("Water Film")
    }

    pub fn average_speed(&self) -> Result<i64> {
        self.header_value("Average Speed")
    }

    pub fn system_distance(&self) -> Result<f64> {
        self.header_value("System Distance")
    }

    pub fn fric_a(&self) -> Result<f64> {
        self.summary_value("Fric. A")
    }

    pub fn fric_b(&self) -> Result<f64> {
        self.summary_value("Fric. B")
    }

    pub fn fric_c(&self) -> Result<f64> {
        self.summary_value("Fric. C")
    }

    pub fn thirds(&self) -> Result<FrictionThirds> {
        Ok(FrictionThirds {
            a: self.fric_a()?,
            b: self.fric_b()?,
            c: self.fric_c()?,
        })
    }

    /// Derive every field once so a broken report is rejected as a whole.
    pub fn validate(&self) -> Result<()> {
        self.key()?;
        self.org_type()?;
        self.equipment()?;
        self.pilot()?;
        self.ice_level()?;
        self.reported_runway_length()?;
        self.location()?;
        self.tyre_type()?;
        self.tyre_pressure()?;
        self.water_film()?;
        self.average_speed()?;
        self.system_distance()?;
        self.thirds()?;
        self.samples()?;
        Ok(())
    }

    /// Set the caller-supplied site conditions. Allowed exactly once.
    pub fn assign(&self, conditions: SiteConditions) -> Result<()> {
        self.conditions.set(conditions).map_err(|_| {
            FrictionError::Validation(format!("site conditions of {} already assigned", self.filename))
        })
    }

    pub fn conditions(&self) -> Option<&SiteConditions> {
        self.conditions.get()
    }

    pub fn classified_samples(&self) -> Result<Vec<ClassifiedSample>> {
        Ok(classifier::classify_samples(self.samples()?, self.thirds()?))
    }

    /// Samples placed on the runway chainage using the assigned site conditions
    pub fn measurements_with_chainage(&self) -> Result<Vec<ChainageRow>> {
        let conditions = self.conditions().ok_or_else(|| {
            FrictionError::Validation(format!("site conditions of {} not assigned", self.filename))
        })?;
        chainage::align(
            &self.classified_samples()?,
            self.numbering()?,
            conditions.runway_length,
            conditions.starting_point,
        )
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename)
    }
}
