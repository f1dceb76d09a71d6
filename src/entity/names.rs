//! Name catalogs for colonist generation

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::core::error::{Result, SettlerError};
use crate::core::types::Sex;

/// Source of random first and family names
pub trait NameCatalog {
    fn random_first_name<R: Rng + ?Sized>(&self, sex: Sex, rng: &mut R) -> Result<String>;

    fn random_family_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String>;
}

const MALE_FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "David", "William", "Richard", "Joseph", "Thomas",
    "Daniel", "Matej", "Anthony", "Mark", "Steven", "Paul", "Andrew", "Yuri", "Kenneth", "Kevin",
    "Brian", "George", "Timothy", "Hiroshi", "Edward", "Jason", "Rashid", "Ryan", "Jacob", "Kwame",
    "Nicholas", "Eric", "Jonathan",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Valentina", "Elizabeth", "Susan", "Jessica", "Sarah",
    "Karen", "Lisa", "Nancy", "Mae", "Margaret", "Sandra", "Ashley", "Emily", "Donna", "Michelle",
    "Carol", "Amanda", "Dorothy", "Kalpana", "Deborah", "Stephanie", "Rebecca", "Sunita", "Laura",
    "Chiaki", "Kathleen", "Amy", "Angela",
];

const FAMILY_NAMES: &[&str] = &[
    "Smith", "Johnson", "Chen", "Nakamura", "Petrov", "Santos", "Kim", "Hansen", "Okafor",
    "Moreau", "Singh", "Torres", "Andersen", "Park", "Johansson", "Fernandez", "Larsson", "Novak",
    "Ibrahim", "Costa", "Yamamoto", "Kowalski", "Bakker", "Tanaka", "Svensson", "Rossi",
    "Fischer", "Dubois", "Schmidt", "Popov", "Mendez", "Nguyen",
];

/// In-memory name lists
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamePool {
    #[serde(default)]
    pub male: Vec<String>,
    #[serde(default)]
    pub female: Vec<String>,
    #[serde(default)]
    pub family: Vec<String>,
}

impl NamePool {
    pub fn new(male: Vec<String>, female: Vec<String>, family: Vec<String>) -> Self {
        Self { male, female, family }
    }

    /// Built-in lists, used when no name file is given
    pub fn builtin() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            male: owned(MALE_FIRST_NAMES),
            female: owned(FEMALE_FIRST_NAMES),
            family: owned(FAMILY_NAMES),
        }
    }

    /// Parse lists from TOML (`male = [...]`, `female = [...]`, `family = [...]`)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let pool: NamePool = toml::from_str(content)?;
        for (list, names) in [("male", &pool.male), ("female", &pool.female), ("family", &pool.family)] {
            if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
                return Err(SettlerError::InvalidArgument(format!(
                    "blank entry at position {} in {} names",
                    pos, list
                )));
            }
        }
        Ok(pool)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let pool = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            male = pool.male.len(),
            female = pool.female.len(),
            family = pool.family.len(),
            "Loaded name lists"
        );
        Ok(pool)
    }

    pub fn first_names(&self, sex: Sex) -> &[String] {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NameCatalog for NamePool {
    fn random_first_name<R: Rng + ?Sized>(&self, sex: Sex, rng: &mut R) -> Result<String> {
        self.first_names(sex)
            .choose(rng)
            .cloned()
            .ok_or_else(|| SettlerError::CatalogExhausted(format!("{} first names", sex)))
    }

    fn random_family_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        self.family
            .choose(rng)
            .cloned()
            .ok_or_else(|| SettlerError::CatalogExhausted("family names".to_string()))
    }
}
