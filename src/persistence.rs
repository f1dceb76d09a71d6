//! Colonist storage
//!
//! Generation never persists anything itself. Callers hand finished colonists
//! to a [`ColonistStore`].

use std::io::Write;

use ahash::AHashMap;

use crate::core::error::{Result, SettlerError};
use crate::core::types::EntityId;
use crate::entity::Colonist;

/// Accepts completed colonists for storage
pub trait ColonistStore {
    fn store(&mut self, colonist: Colonist) -> Result<()>;

    fn store_all(&mut self, colonists: impl IntoIterator<Item = Colonist>) -> Result<usize>
    where
        Self: Sized,
    {
        let mut stored = 0;
        for colonist in colonists {
            self.store(colonist)?;
            stored += 1;
        }
        Ok(stored)
    }
}

/// Colonists kept in memory, indexed by id
#[derive(Debug, Default)]
pub struct InMemoryStore {
    colonists: AHashMap<EntityId, Colonist>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: EntityId) -> Option<&Colonist> {
        self.colonists.get(&id)
    }

    /// Mutable access for simulation state updates (location, productivity)
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Colonist> {
        self.colonists.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.colonists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colonists.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Colonist> {
        self.colonists.values()
    }
}

impl ColonistStore for InMemoryStore {
    fn store(&mut self, colonist: Colonist) -> Result<()> {
        let id = colonist.id();
        if self.colonists.contains_key(&id) {
            return Err(SettlerError::DuplicateEntity(id));
        }
        self.colonists.insert(id, colonist);
        Ok(())
    }
}

/// Writes one JSON object per colonist per line
pub struct JsonLinesStore<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesStore<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ColonistStore for JsonLinesStore<W> {
    fn store(&mut self, colonist: Colonist) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &colonist)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}
