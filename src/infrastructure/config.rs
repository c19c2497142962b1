use crate::domain::record::SiteConditions;
use crate::domain::runway::Direction;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct FrictionConfig {
    pub input: InputSettings,
    pub store: StoreSettings,
    pub site: SiteSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputSettings {
    /// Directory holding one extracted-grid JSON file per report
    pub dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: PathBuf,
}

/// Site conditions shared by every run of a measurement session
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteSettings {
    pub operator: String,
    pub temperature: i32,
    pub surface_condition: String,
    pub weather: String,
    pub runway_material: String,
    pub runway_length: u32,
    /// Chainage of the first sample for runs on runway ends 01..18
    pub starting_point_ascending: u32,
    /// Chainage of the first sample for runs on runway ends 19..36
    pub starting_point_descending: u32,
}

fn default_extension() -> String {
    "json".to_string()
}

impl SiteSettings {
    pub fn conditions_for(&self, direction: Direction) -> SiteConditions {
        let starting_point = match direction {
            Direction::Ascending => self.starting_point_ascending,
            Direction::Descending => self.starting_point_descending,
        };
        SiteConditions {
            operator: self.operator.clone(),
            temperature: self.temperature,
            surface_condition: self.surface_condition.clone(),
            weather: self.weather.clone(),
            runway_material: self.runway_material.clone(),
            runway_length: self.runway_length,
            starting_point,
        }
    }
}

pub fn load_friction_config() -> anyhow::Result<FrictionConfig> {
    load_friction_config_from(Path::new("config/friction"))
}

/// Load settings from `path` (extension optional), overridden by
/// `FRICTION__SECTION__KEY` environment variables.
pub fn load_friction_config_from(path: &Path) -> anyhow::Result<FrictionConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("FRICTION").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
