//! Mars Settlers - founder colonist generation for colonization simulations

pub mod core;
pub mod entity;
pub mod factory;
pub mod persistence;

pub use crate::core::{GeneratorConfig, Result, SettlerError};
pub use entity::{Colonist, NameCatalog, NamePool};
pub use factory::AstronautFactory;
pub use persistence::{ColonistStore, InMemoryStore, JsonLinesStore};
