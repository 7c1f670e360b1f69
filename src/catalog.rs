//! Read-only character catalog loaded from the OC data file.
//!
//! The catalog is loaded once and passed around by reference; battles only
//! ever derive `Combatant` copies from it, so any number of concurrently
//! running battles may share one instance without synchronization.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no such combatant: {0}")]
    UnknownId(u32),
    #[error("non-numeric catalog key: {0}")]
    BadKey(String),
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static per-character data, exactly as stored in the data file.
/// The ability fields are ID references into a future ability table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    #[serde(rename = "baseStars")]
    pub base_stars: u8,
    #[serde(rename = "baseHP")]
    pub base_hp: i32,
    #[serde(rename = "baseAttack")]
    pub base_attack: i32,
    #[serde(rename = "baseSpeed")]
    pub base_speed: i32,
    #[serde(rename = "baseLuck")]
    pub base_luck: i32,
    #[serde(rename = "artPath")]
    pub art_path: String,
    pub ability1: i32,
    pub ability2: i32,
    pub lore: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: HashMap<u32, CharacterRecord>,
}

impl Catalog {
    /// Parses the keyed-by-ID JSON shape of the OC data file.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let keyed: HashMap<String, CharacterRecord> = serde_json::from_str(raw)?;
        let mut records = HashMap::with_capacity(keyed.len());
        for (key, record) in keyed {
            let id = key
                .parse::<u32>()
                .map_err(|_| CatalogError::BadKey(key.clone()))?;
            records.insert(id, record);
        }
        Ok(Self { records })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Unknown IDs surface here, at combatant-construction time.
    pub fn get(&self, id: u32) -> Result<&CharacterRecord, CatalogError> {
        self.records.get(&id).ok_or(CatalogError::UnknownId(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
