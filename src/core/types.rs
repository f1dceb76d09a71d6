//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::SettlerError;

/// Unique identifier for colonists and their synthetic parents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Fresh v4 id from operating system entropy
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// v4 id built from caller supplied random bytes
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of the simulation run a colonist belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(pub Uuid);

impl SimulationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SimulationId {
    type Err = SettlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| SettlerError::InvalidArgument(format!("simulation id {:?}: {}", s, e)))
    }
}

/// Simulation day counter (Mars sols since the simulation epoch)
///
/// Signed: founders born on Earth before the epoch have negative birth sols.
pub type Solday = i64;

/// Produces globally unique identifiers
pub trait IdentityGenerator {
    fn new_id(&mut self) -> EntityId;
}

impl<R: RngCore + ?Sized> IdentityGenerator for R {
    fn new_id(&mut self) -> EntityId {
        EntityId::from_random_bytes(self.gen())
    }
}

/// Biological sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Sex {
    pub fn opposite(&self) -> Sex {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Sex {
    type Err = SettlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            other => Err(SettlerError::InvalidArgument(format!(
                "unrecognized sex {:?} (expected m/male or f/female)",
                other
            ))),
        }
    }
}

/// Sexual orientation, expressed as who the colonist is attracted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "m")]
    AttractedToMale,
    #[serde(rename = "f")]
    AttractedToFemale,
    #[serde(rename = "mf")]
    AttractedToBoth,
}

impl Orientation {
    /// Attraction to members of `sex`
    pub fn attracted_to(sex: Sex) -> Self {
        match sex {
            Sex::Male => Orientation::AttractedToMale,
            Sex::Female => Orientation::AttractedToFemale,
        }
    }
}

/// Planet (or other body) a colonist can be born on or live at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Earth,
    Mars,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Earth => write!(f, "Earth"),
            Location::Mars => write!(f, "Mars"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sex_parse_accepts_short_and_long_forms() {
        assert_eq!("m".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" F ".parse::<Sex>().unwrap(), Sex::Female);
    }

    #[test]
    fn test_sex_parse_rejects_unknown() {
        let err = "x".parse::<Sex>().unwrap_err();
        assert!(matches!(err, SettlerError::InvalidArgument(_)));
    }

    #[test]
    fn test_orientation_attracted_to() {
        assert_eq!(Orientation::attracted_to(Sex::Female), Orientation::AttractedToFemale);
        assert_eq!(Orientation::attracted_to(Sex::Male.opposite()), Orientation::AttractedToFemale);
    }

    #[test]
    fn test_seeded_ids_are_v4_and_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let id = a.new_id();
        assert_eq!(id, b.new_id());
        assert_eq!(id.0.get_version_num(), 4);
        assert_ne!(id, a.new_id());
    }

    #[test]
    fn test_orientation_serializes_to_source_labels() {
        let json = serde_json::to_string(&Orientation::AttractedToBoth).unwrap();
        assert_eq!(json, "\"mf\"");
        let sex: Sex = serde_json::from_str("\"f\"").unwrap();
        assert_eq!(sex, Sex::Female);
    }

    #[test]
    fn test_simulation_id_parse() {
        let id = SimulationId::new();
        assert_eq!(id.to_string().parse::<SimulationId>().unwrap(), id);
        assert!("not-a-uuid".parse::<SimulationId>().is_err());
    }
}
