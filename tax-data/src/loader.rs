use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    BracketScheduleError, TaxBracket, TaxParameterPreset, TaxParameters, normalize_brackets,
    validate_brackets,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::presets::PresetRegistry;

/// Errors that can occur when loading presets or bracket schedules.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("Preset '{preset}' extends '{base}', which is not defined before it")]
    UnknownBase { preset: String, base: String },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not convert preset '{preset}' to TOML: {source}")]
    Serialize {
        preset: String,
        #[source]
        source: toml::ser::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid state income tax brackets in {origin}: {source}")]
    InvalidBrackets {
        origin: String,
        #[source]
        source: BracketScheduleError,
    },
}

/// One top-level table of a presets file.
///
/// Without `extends` the `parameters` table must be complete. With it, the
/// listed fields replace the base preset's values; a replaced bracket list
/// replaces the whole schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetEntry {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    parameters: toml::Table,
}

/// Loader for tax parameter presets written as TOML.
///
/// ```toml
/// [2026_custom]
/// name = "2026 custom"
/// description = "Government proposal with a higher municipal rate"
/// extends = "2026_he"
///
/// [2026_custom.parameters]
/// municipal_rate = 8.0
/// ```
pub struct PresetLoader;

impl PresetLoader {
    /// Parse the presets defined in `source`, in document order.
    ///
    /// An `extends` key is resolved against presets defined earlier in the
    /// same document first and then against `bases`. Only the presets of
    /// `source` are returned.
    pub fn parse(
        source: &str,
        bases: &PresetRegistry,
    ) -> Result<PresetRegistry, PresetError> {
        let document: toml::Table = toml::from_str(source)?;
        let mut loaded = PresetRegistry::new();

        for (key, value) in document {
            let entry: PresetEntry = value.try_into()?;
            let preset = Self::resolve(&key, entry, &loaded, bases)?;

            validate_brackets(&preset.parameters.state_income_tax_brackets).map_err(|source| {
                warn!(preset = %key, error = %source, "Rejected preset bracket schedule");
                PresetError::InvalidBrackets {
                    origin: format!("preset '{key}'"),
                    source,
                }
            })?;

            debug!(preset = %key, name = %preset.name, "Loaded preset");
            loaded.insert(key, preset);
        }

        Ok(loaded)
    }

    /// Read and parse a presets file. See [`PresetLoader::parse`].
    pub fn load_file(
        path: &Path,
        bases: &PresetRegistry,
    ) -> Result<PresetRegistry, PresetError> {
        let source = fs::read_to_string(path).map_err(|source| PresetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&source, bases)
    }

    fn resolve(
        key: &str,
        entry: PresetEntry,
        loaded: &PresetRegistry,
        bases: &PresetRegistry,
    ) -> Result<TaxParameterPreset, PresetError> {
        let mut parameters = match &entry.extends {
            Some(base) => {
                let base_preset = loaded
                    .get(base)
                    .or_else(|_| bases.get(base))
                    .map_err(|_| PresetError::UnknownBase {
                        preset: key.to_string(),
                        base: base.clone(),
                    })?;
                let table: toml::Table = toml::Value::try_from(&base_preset.parameters)
                    .map_err(|source| PresetError::Serialize {
                        preset: base.clone(),
                        source,
                    })?
                    .try_into()?;
                debug!(preset = %key, base = %base, "Extending preset");
                table
            }
            None => toml::Table::new(),
        };

        parameters.extend(entry.parameters);
        let parameters: TaxParameters = toml::Value::Table(parameters).try_into()?;

        Ok(TaxParameterPreset {
            description: entry.description.unwrap_or_else(|| entry.name.clone()),
            name: entry.name,
            parameters,
        })
    }
}

/// A single row of a bracket CSV file.
///
/// The file has columns `min,rate` or `min,max,rate`. Rates are percentages
/// (`12.64` for 12.64 %). An empty `max` cell marks the unbounded bracket.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket::new(record.min, record.max, record.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for state income tax bracket schedules from CSV files.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse and validate a bracket schedule from a CSV reader.
    ///
    /// When the file has no `max` column every bracket's upper limit is taken
    /// from the next row's `min` and the last row is unbounded.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracket>, PresetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let has_max = csv_reader.headers()?.iter().any(|header| header == "max");

        let mut brackets = Vec::new();
        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            brackets.push(TaxBracket::from(record));
        }

        if !has_max {
            normalize_brackets(&mut brackets);
        }

        validate_brackets(&brackets).map_err(|source| {
            warn!(error = %source, "Rejected bracket CSV");
            PresetError::InvalidBrackets {
                origin: "bracket CSV".to_string(),
                source,
            }
        })?;

        debug!(brackets = brackets.len(), "Loaded bracket schedule");
        Ok(brackets)
    }

    pub fn load_file(path: &Path) -> Result<Vec<TaxBracket>, PresetError> {
        let file = fs::File::open(path).map_err(|source| PresetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(file)
    }
}
