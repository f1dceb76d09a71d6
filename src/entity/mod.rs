pub mod colonist;
pub mod names;

pub use colonist::{Colonist, ColonistIdentity, BASELINE_PRODUCTIVITY};
pub use names::{NameCatalog, NamePool};
