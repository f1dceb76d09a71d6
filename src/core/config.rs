//! Colonist generator configuration
//!
//! The on-disk form keeps the comma separated weight strings used by earlier
//! simulation revisions (`astronaut_sex_ratio = "50,50"`). They are parsed into
//! typed values once, at load time, so a malformed weight never reaches the
//! factory.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SettlerError};
use crate::core::types::{Orientation, Sex, SimulationId};

/// Relative weights for drawing a colonist's sex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SexRatio {
    pub male: u32,
    pub female: u32,
}

impl SexRatio {
    pub fn outcomes(&self) -> [(Sex, u32); 2] {
        [(Sex::Male, self.male), (Sex::Female, self.female)]
    }

    pub fn total(&self) -> u64 {
        self.male as u64 + self.female as u64
    }
}

impl Default for SexRatio {
    fn default() -> Self {
        Self { male: 50, female: 50 }
    }
}

impl FromStr for SexRatio {
    type Err = SettlerError;

    fn from_str(s: &str) -> Result<Self> {
        let w = parse_weights(s, 2, "sex ratio")?;
        Ok(Self { male: w[0], female: w[1] })
    }
}

impl fmt::Display for SexRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.male, self.female)
    }
}

/// Relative orientation weights for one sex
///
/// Source strings list them as `opposite,same,both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationWeights {
    pub opposite_sex: u32,
    pub same_sex: u32,
    pub both: u32,
}

impl OrientationWeights {
    /// Orientation outcomes for a colonist of `sex`, each paired with its weight
    pub fn outcomes(&self, sex: Sex) -> [(Orientation, u32); 3] {
        [
            (Orientation::attracted_to(sex.opposite()), self.opposite_sex),
            (Orientation::attracted_to(sex), self.same_sex),
            (Orientation::AttractedToBoth, self.both),
        ]
    }

    pub fn total(&self) -> u64 {
        self.opposite_sex as u64 + self.same_sex as u64 + self.both as u64
    }
}

impl FromStr for OrientationWeights {
    type Err = SettlerError;

    fn from_str(s: &str) -> Result<Self> {
        let w = parse_weights(s, 3, "orientation weights")?;
        Ok(Self {
            opposite_sex: w[0],
            same_sex: w[1],
            both: w[2],
        })
    }
}

impl fmt::Display for OrientationWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.opposite_sex, self.same_sex, self.both)
    }
}

/// Half-open range `[min, max)` of founder ages in whole Earth years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min >= max {
            return Err(SettlerError::InvalidArgument(format!(
                "age range min ({}) must be below max ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

}

impl FromStr for AgeRange {
    type Err = SettlerError;

    fn from_str(s: &str) -> Result<Self> {
        let bounds = parse_numbers(s, 2, "age range")?;
        Self::new(bounds[0], bounds[1])
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

/// Configuration as written in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGeneratorConfig {
    /// Missing id means a fresh simulation
    #[serde(default)]
    pub simulation_id: Option<String>,
    #[serde(default = "default_sex_ratio")]
    pub astronaut_sex_ratio: String,
    #[serde(default = "default_orientation_male")]
    pub astronaut_orientation_male: String,
    #[serde(default = "default_orientation_female")]
    pub astronaut_orientation_female: String,
    #[serde(default = "default_age_range")]
    pub astronaut_age_range: String,
}

fn default_sex_ratio() -> String {
    "50,50".to_string()
}

fn default_orientation_male() -> String {
    "60,6,4".to_string()
}

fn default_orientation_female() -> String {
    "90,6,4".to_string()
}

fn default_age_range() -> String {
    "20,45".to_string()
}

impl Default for RawGeneratorConfig {
    fn default() -> Self {
        Self {
            simulation_id: None,
            astronaut_sex_ratio: default_sex_ratio(),
            astronaut_orientation_male: default_orientation_male(),
            astronaut_orientation_female: default_orientation_female(),
            astronaut_age_range: default_age_range(),
        }
    }
}

/// Validated generator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub simulation_id: SimulationId,
    pub sex_ratio: SexRatio,
    pub orientation_male: OrientationWeights,
    pub orientation_female: OrientationWeights,
    pub age_range: AgeRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            simulation_id: SimulationId::new(),
            sex_ratio: SexRatio::default(),
            orientation_male: OrientationWeights {
                opposite_sex: 60,
                same_sex: 6,
                both: 4,
            },
            orientation_female: OrientationWeights {
                opposite_sex: 90,
                same_sex: 6,
                both: 4,
            },
            age_range: AgeRange { min: 20, max: 45 },
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: &RawGeneratorConfig) -> Result<Self> {
        let simulation_id = match &raw.simulation_id {
            Some(id) => id.parse::<SimulationId>()?,
            None => SimulationId::new(),
        };

        let config = Self {
            simulation_id,
            sex_ratio: raw.astronaut_sex_ratio.parse()?,
            orientation_male: raw.astronaut_orientation_male.parse()?,
            orientation_female: raw.astronaut_orientation_female.parse()?,
            age_range: raw.astronaut_age_range.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_raw(&self) -> RawGeneratorConfig {
        RawGeneratorConfig {
            simulation_id: Some(self.simulation_id.to_string()),
            astronaut_sex_ratio: self.sex_ratio.to_string(),
            astronaut_orientation_male: self.orientation_male.to_string(),
            astronaut_orientation_female: self.orientation_female.to_string(),
            astronaut_age_range: self.age_range.to_string(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawGeneratorConfig = toml::from_str(content)?;
        Self::from_raw(&raw)
    }

    /// Load from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            simulation = %config.simulation_id,
            "Loaded generator config"
        );
        Ok(config)
    }

    /// Orientation weights that apply to colonists of `sex`
    pub fn orientation_for(&self, sex: Sex) -> &OrientationWeights {
        match sex {
            Sex::Male => &self.orientation_male,
            Sex::Female => &self.orientation_female,
        }
    }

    /// Validate configuration for internal consistency
    ///
    /// Needed for configs assembled by hand, since weight fields are public.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("sex ratio (male)", self.sex_ratio.male),
            ("sex ratio (female)", self.sex_ratio.female),
            ("male orientation (opposite sex)", self.orientation_male.opposite_sex),
            ("male orientation (same sex)", self.orientation_male.same_sex),
            ("male orientation (both)", self.orientation_male.both),
            ("female orientation (opposite sex)", self.orientation_female.opposite_sex),
            ("female orientation (same sex)", self.orientation_female.same_sex),
            ("female orientation (both)", self.orientation_female.both),
        ];
        for (what, weight) in weights {
            if weight == 0 {
                return Err(SettlerError::InvalidArgument(format!(
                    "{} weight must be positive",
                    what
                )));
            }
        }

        // Weighted draws accumulate in u32
        let totals = [
            ("sex ratio", self.sex_ratio.total()),
            ("male orientation", self.orientation_male.total()),
            ("female orientation", self.orientation_female.total()),
        ];
        for (what, total) in totals {
            if total > u32::MAX as u64 {
                return Err(SettlerError::InvalidArgument(format!(
                    "{} weights sum to {}, above {}",
                    what,
                    total,
                    u32::MAX
                )));
            }
        }

        // Dominant category is always attraction to the opposite sex
        for (sex, w) in [(Sex::Male, &self.orientation_male), (Sex::Female, &self.orientation_female)] {
            if w.opposite_sex < w.same_sex || w.opposite_sex < w.both {
                return Err(SettlerError::InvalidArgument(format!(
                    "{} orientation weights {} must favour the opposite sex",
                    sex, w
                )));
            }
        }

        Ok(())
    }
}

fn parse_numbers(s: &str, expected: usize, what: &str) -> Result<Vec<u32>> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|e| {
                SettlerError::InvalidArgument(format!("{} {:?}: {:?} is not a number ({})", what, s, part, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if values.len() != expected {
        return Err(SettlerError::InvalidArgument(format!(
            "{} {:?}: expected {} values, found {}",
            what,
            s,
            expected,
            values.len()
        )));
    }
    Ok(values)
}

fn parse_weights(s: &str, expected: usize, what: &str) -> Result<Vec<u32>> {
    let values = parse_numbers(s, expected, what)?;
    if values.iter().any(|&w| w == 0) {
        return Err(SettlerError::InvalidArgument(format!(
            "{} {:?}: weights must be positive",
            what, s
        )));
    }
    if values.iter().try_fold(0u32, |sum, &w| sum.checked_add(w)).is_none() {
        return Err(SettlerError::InvalidArgument(format!(
            "{} {:?}: weights sum past {}",
            what,
            s,
            u32::MAX
        )));
    }
    Ok(values)
}

// === PROCESS-WIDE DEFAULT ===

use std::sync::OnceLock;

static DEFAULT_CONFIG: OnceLock<GeneratorConfig> = OnceLock::new();

/// Registered process-wide default, if any
pub fn registered_default() -> Option<&'static GeneratorConfig> {
    DEFAULT_CONFIG.get()
}

/// Register the process-wide default config (can only be called once)
///
/// Returns Err with the rejected config if a default was already registered.
pub fn register_default(config: GeneratorConfig) -> std::result::Result<(), GeneratorConfig> {
    DEFAULT_CONFIG.set(config).map_err(|rejected| {
        tracing::warn!(
            simulation = %rejected.simulation_id,
            "Generator default already registered, ignoring new config"
        );
        rejected
    })
}
