//! Earth/Mars time conversion
//!
//! Ages are configured in Earth years but the simulation counts Mars sols.

use crate::core::types::Solday;

/// Mean Earth days in an Earth year
pub const EARTH_DAYS_PER_YEAR: f64 = 365.25;

/// Length of one Mars sol in Earth days
pub const EARTH_DAYS_PER_SOL: f64 = 1.02749125;

/// Convert whole Earth years into sols (unrounded)
pub fn earth_years_to_sols(years: u32) -> f64 {
    years as f64 * EARTH_DAYS_PER_YEAR * EARTH_DAYS_PER_SOL
}

/// Convert a sol count back into fractional Earth years
pub fn sols_to_earth_years(sols: f64) -> f64 {
    sols / (EARTH_DAYS_PER_YEAR * EARTH_DAYS_PER_SOL)
}

/// Birth sol of someone `age_years` old on `solday`
///
/// The sol offset is rounded to the nearest whole sol. Results before the
/// simulation epoch are negative.
pub fn birth_solday(solday: Solday, age_years: u32) -> Solday {
    solday - earth_years_to_sols(age_years).round() as Solday
}
