//! The colonist record

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::calendar;
use crate::core::types::{EntityId, Location, Orientation, Sex, SimulationId, Solday};

/// Productivity every colonist starts with
pub const BASELINE_PRODUCTIVITY: i32 = 100;

/// A simulated person
///
/// Identity fields are fixed at construction and only readable. Simulation
/// state (`current_location`, `productivity`) can be changed by other systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colonist {
    id: EntityId,
    simulation: SimulationId,
    sex: Sex,
    orientation: Orientation,
    first_name: String,
    family_name: String,
    birth_location: Location,
    pub current_location: Location,
    biological_father: EntityId,
    biological_mother: EntityId,
    birth_solday: Solday,
    pub productivity: i32,
}

/// Identity fields for [`Colonist::new`]
#[derive(Debug, Clone)]
pub struct ColonistIdentity {
    pub id: EntityId,
    pub simulation: SimulationId,
    pub sex: Sex,
    pub orientation: Orientation,
    pub first_name: String,
    pub family_name: String,
    pub birth_location: Location,
    pub biological_father: EntityId,
    pub biological_mother: EntityId,
    pub birth_solday: Solday,
}

impl Colonist {
    pub fn new(identity: ColonistIdentity, current_location: Location) -> Self {
        let ColonistIdentity {
            id,
            simulation,
            sex,
            orientation,
            first_name,
            family_name,
            birth_location,
            biological_father,
            biological_mother,
            birth_solday,
        } = identity;

        Self {
            id,
            simulation,
            sex,
            orientation,
            first_name,
            family_name,
            birth_location,
            current_location,
            biological_father,
            biological_mother,
            birth_solday,
            productivity: BASELINE_PRODUCTIVITY,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn simulation(&self) -> SimulationId {
        self.simulation
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }

    pub fn birth_location(&self) -> Location {
        self.birth_location
    }

    pub fn biological_father(&self) -> EntityId {
        self.biological_father
    }

    pub fn biological_mother(&self) -> EntityId {
        self.biological_mother
    }

    pub fn birth_solday(&self) -> Solday {
        self.birth_solday
    }

    /// Age in sols on `solday` (negative before birth)
    pub fn age_in_sols(&self, solday: Solday) -> Solday {
        solday - self.birth_solday
    }

    pub fn age_in_earth_years(&self, solday: Solday) -> f64 {
        calendar::sols_to_earth_years(self.age_in_sols(solday) as f64)
    }
}

impl fmt::Display for Colonist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Astronaut(id={}, '{} {}')>",
            self.id, self.first_name, self.family_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(first: &str, sex: Sex, orientation: Orientation) -> Colonist {
        Colonist::new(
            ColonistIdentity {
                id: EntityId::new(),
                simulation: SimulationId::new(),
                sex,
                orientation,
                first_name: first.to_string(),
                family_name: "Novak".to_string(),
                birth_location: Location::Earth,
                biological_father: EntityId::new(),
                biological_mother: EntityId::new(),
                birth_solday: -375,
            },
            Location::Mars,
        )
    }

    #[test]
    fn test_new_colonist_has_baseline_productivity() {
        let c = sample("Ada", Sex::Female, Orientation::AttractedToMale);
        assert_eq!(c.productivity, BASELINE_PRODUCTIVITY);
        assert_eq!(c.current_location, Location::Mars);
        assert_eq!(c.full_name(), "Ada Novak");
    }

    #[test]
    fn test_display_format() {
        let c = sample("Ada", Sex::Female, Orientation::AttractedToMale);
        assert_eq!(
            c.to_string(),
            format!("<Astronaut(id={}, 'Ada Novak')>", c.id())
        );
    }

    #[test]
    fn test_age_in_sols_and_years() {
        let c = sample("Ada", Sex::Female, Orientation::AttractedToMale);
        assert_eq!(c.age_in_sols(0), 375);
        assert!((c.age_in_earth_years(0) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_json_round_trip() {
        let c = sample("Ada", Sex::Female, Orientation::AttractedToBoth);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"orientation\":\"mf\""));
        let back: Colonist = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
