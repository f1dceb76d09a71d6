//! Founder colonist generation
//!
//! Builds one fully initialised [`Colonist`] from the generator configuration
//! and a random source. Every founder gets two freshly generated parent ids, so
//! lineage code never has to special-case the first generation.
//!
//! Draw order is fixed: id, sex, first name, orientation, family name,
//! father id, mother id, age. Seeding the random source therefore reproduces
//! the same colonist.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::calendar;
use crate::core::config::{self, GeneratorConfig};
use crate::core::error::{Result, SettlerError};
use crate::core::types::{IdentityGenerator, Location, Sex, Solday};
use crate::entity::{Colonist, ColonistIdentity, NameCatalog};

/// Founders are always born on Earth
pub const FOUNDER_BIRTH_LOCATION: Location = Location::Earth;

/// Founders always arrive at Mars
pub const FOUNDER_DESTINATION: Location = Location::Mars;

/// Generates founder colonists
///
/// Holds only shared references, so one factory can serve many threads as
/// long as each call gets its own random source.
pub struct AstronautFactory<'a, C: NameCatalog> {
    catalog: &'a C,
    config: Option<&'a GeneratorConfig>,
}

impl<'a, C: NameCatalog> AstronautFactory<'a, C> {
    /// Factory that relies on per-call or registered configuration
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog, config: None }
    }

    pub fn with_config(catalog: &'a C, config: &'a GeneratorConfig) -> Self {
        Self {
            catalog,
            config: Some(config),
        }
    }

    /// Per-call config, then the factory's own, then the registered default
    fn resolve_config<'b>(&'b self, call: Option<&'b GeneratorConfig>) -> Result<&'b GeneratorConfig> {
        match call.or(self.config) {
            Some(config) => Ok(config),
            None => config::registered_default().ok_or(SettlerError::ConfigurationMissing),
        }
    }

    /// Create one founder colonist on `solday`
    ///
    /// `sex` skips the sex draw when given. Nothing is persisted.
    pub fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        solday: Solday,
        sex: Option<Sex>,
        config: Option<&GeneratorConfig>,
    ) -> Result<Colonist> {
        if solday < 0 {
            return Err(SettlerError::InvalidArgument(format!(
                "solday must be non-negative, got {}",
                solday
            )));
        }
        let config = self.resolve_config(config)?;
        config.validate()?;

        let id = rng.new_id();
        let simulation = config.simulation_id;

        let sex = match sex {
            Some(sex) => sex,
            None => draw(&config.sex_ratio.outcomes(), rng)?,
        };
        let first_name = self.catalog.random_first_name(sex, rng)?;
        let orientation = draw(&config.orientation_for(sex).outcomes(sex), rng)?;
        let family_name = self.catalog.random_family_name(rng)?;

        // Synthetic parents, never resolved against existing colonists
        let biological_father = rng.new_id();
        let biological_mother = rng.new_id();

        let age_years = rng.gen_range(config.age_range.min()..config.age_range.max());
        let birth_solday = calendar::birth_solday(solday, age_years);

        let colonist = Colonist::new(
            ColonistIdentity {
                id,
                simulation,
                sex,
                orientation,
                first_name,
                family_name,
                birth_location: FOUNDER_BIRTH_LOCATION,
                biological_father,
                biological_mother,
                birth_solday,
            },
            FOUNDER_DESTINATION,
        );

        tracing::debug!(
            id = %colonist.id(),
            name = %colonist.full_name(),
            sex = %sex,
            age_years,
            birth_solday,
            "Created founder colonist"
        );

        Ok(colonist)
    }

    /// Create `count` founders in parallel
    ///
    /// Colonist `i` draws from its own ChaCha stream `i` seeded with `seed`, so
    /// the cohort is identical for a given seed regardless of thread count.
    /// Any failure fails the whole cohort.
    pub fn create_cohort(
        &self,
        count: usize,
        solday: Solday,
        seed: u64,
        sex: Option<Sex>,
        config: Option<&GeneratorConfig>,
    ) -> Result<Vec<Colonist>>
    where
        C: Sync,
    {
        let cohort = (0..count)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(i as u64);
                self.create(&mut rng, solday, sex, config)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count, solday, seed, "Generated founder cohort");
        Ok(cohort)
    }
}

/// Weighted categorical draw over `(outcome, weight)` pairs
fn draw<T: Copy, R: Rng + ?Sized>(outcomes: &[(T, u32)], rng: &mut R) -> Result<T> {
    let index = WeightedIndex::new(outcomes.iter().map(|(_, weight)| *weight))
        .map_err(|e| SettlerError::InvalidArgument(format!("invalid weights: {}", e)))?;
    Ok(outcomes[index.sample(rng)].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Orientation;
    use crate::entity::NamePool;
    use rand::rngs::mock::StepRng;

    fn config() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    #[test]
    fn test_create_populates_every_field() {
        let names = NamePool::builtin();
        let config = config();
        let factory = AstronautFactory::with_config(&names, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let c = factory.create(&mut rng, 500, None, None).unwrap();
        assert_eq!(c.simulation(), config.simulation_id);
        assert_eq!(c.birth_location(), Location::Earth);
        assert_eq!(c.current_location, Location::Mars);
        assert_eq!(c.productivity, 100);
        assert!(names.first_names(c.sex()).contains(&c.first_name().to_string()));
        assert!(names.family.contains(&c.family_name().to_string()));
        assert!(c.birth_solday() < 500);
    }

    #[test]
    fn test_seeded_rng_reproduces_colonist() {
        let names = NamePool::builtin();
        let config = config();
        let factory = AstronautFactory::with_config(&names, &config);

        let a = factory
            .create(&mut ChaCha8Rng::seed_from_u64(99), 10, None, None)
            .unwrap();
        let b = factory
            .create(&mut ChaCha8Rng::seed_from_u64(99), 10, None, None)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_bits_take_first_outcome_everywhere() {
        let names = NamePool::builtin();
        let mut config = config();
        config.age_range = "30,31".parse().unwrap();
        let factory = AstronautFactory::with_config(&names, &config);
        let mut rng = StepRng::new(0, 0);

        let c = factory.create(&mut rng, 1000, None, None).unwrap();
        assert_eq!(c.sex(), Sex::Male);
        assert_eq!(c.orientation(), Orientation::AttractedToFemale);
        assert_eq!(c.first_name(), names.male[0]);
        assert_eq!(c.birth_solday(), 1000 - 11_259);
    }

    #[test]
    fn test_per_call_config_overrides_factory_config() {
        let names = NamePool::builtin();
        let base = config();
        let mut other = config();
        other.age_range = "0,1".parse().unwrap();
        let factory = AstronautFactory::with_config(&names, &base);

        let c = factory
            .create(&mut ChaCha8Rng::seed_from_u64(5), 77, None, Some(&other))
            .unwrap();
        assert_eq!(c.simulation(), other.simulation_id);
        assert_eq!(c.birth_solday(), 77);
    }

    #[test]
    fn test_negative_solday_is_rejected() {
        let names = NamePool::builtin();
        let config = config();
        let factory = AstronautFactory::with_config(&names, &config);
        let result = factory.create(&mut ChaCha8Rng::seed_from_u64(5), -1, None, None);
        assert!(matches!(result, Err(SettlerError::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_hand_built_config_is_rejected() {
        let names = NamePool::builtin();
        let mut config = config();
        config.orientation_male.both = 0;
        let factory = AstronautFactory::with_config(&names, &config);
        let result = factory.create(&mut ChaCha8Rng::seed_from_u64(5), 0, Some(Sex::Male), None);
        assert!(matches!(result, Err(SettlerError::InvalidArgument(_))));
    }

    #[test]
    fn test_overflowing_weights_fail_instead_of_panicking() {
        let names = NamePool::builtin();
        let mut config = config();
        config.sex_ratio.male = u32::MAX;
        config.sex_ratio.female = u32::MAX;
        let factory = AstronautFactory::with_config(&names, &config);
        let result = factory.create(&mut ChaCha8Rng::seed_from_u64(5), 0, None, None);
        assert!(matches!(result, Err(SettlerError::InvalidArgument(_))));
    }

    #[test]
    fn test_catalog_failure_propagates() {
        let names = NamePool::new(vec!["Yuri".into()], vec![], vec!["Gagarin".into()]);
        let config = config();
        let factory = AstronautFactory::with_config(&names, &config);
        let result = factory.create(&mut ChaCha8Rng::seed_from_u64(5), 0, Some(Sex::Female), None);
        assert!(matches!(result, Err(SettlerError::CatalogExhausted(_))));
    }

    #[test]
    fn test_cohort_is_deterministic_and_unique() {
        let names = NamePool::builtin();
        let config = config();
        let factory = AstronautFactory::with_config(&names, &config);

        let a = factory.create_cohort(64, 200, 42, None, None).unwrap();
        let b = factory.create_cohort(64, 200, 42, None, None).unwrap();
        assert_eq!(a, b);

        let mut ids: Vec<_> = a.iter().map(|c| c.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn test_draw_respects_single_heavy_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let picked = draw(&[("rare", 1), ("common", 1_000_000)], &mut rng).unwrap();
            assert_eq!(picked, "common");
        }
    }
}
