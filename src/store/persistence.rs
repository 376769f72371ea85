use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

use super::ChartCollection;

pub const COLLECTION_JSON_SCHEMA_V1: u32 = 1;

/// Durable home of the chart collection.
///
/// Both operations are synchronous; the store logs failures instead of
/// propagating them.
pub trait ChartPersistence {
    fn load(&mut self) -> ChartResult<Option<ChartCollection>>;
    fn save(&mut self, collection: &ChartCollection) -> ChartResult<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartCollectionJsonContractV1 {
    pub schema_version: u32,
    pub collection: ChartCollection,
}

impl ChartCollection {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartCollectionJsonContractV1 {
            schema_version: COLLECTION_JSON_SCHEMA_V1,
            collection: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart collection v1: {e}"))
        })
    }

    /// Accepts either the versioned envelope or a bare collection.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(parse_error)?;
        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(parse_error);
        }
        let payload: ChartCollectionJsonContractV1 =
            serde_json::from_value(value).map_err(parse_error)?;
        if payload.schema_version != COLLECTION_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart collection schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.collection)
    }
}

fn parse_error(err: serde_json::Error) -> ChartError {
    ChartError::InvalidData(format!("failed to parse chart collection json: {err}"))
}

/// Keeps the last saved collection in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryPersistence {
    stored: Option<ChartCollection>,
    save_count: usize,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `collection` already stored, as if saved by an earlier run.
    #[must_use]
    pub fn with_collection(collection: ChartCollection) -> Self {
        Self {
            stored: Some(collection),
            save_count: 0,
        }
    }

    #[must_use]
    pub fn stored(&self) -> Option<&ChartCollection> {
        self.stored.as_ref()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ChartPersistence for MemoryPersistence {
    fn load(&mut self) -> ChartResult<Option<ChartCollection>> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, collection: &ChartCollection) -> ChartResult<()> {
        self.stored = Some(collection.clone());
        self.save_count += 1;
        trace!(save_count = self.save_count, "saved chart collection in memory");
        Ok(())
    }
}

/// Stores the collection as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartPersistence for JsonFilePersistence {
    fn load(&mut self) -> ChartResult<Option<ChartCollection>> {
        let input = match fs::read_to_string(&self.path) {
            Ok(input) => input,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted chart collection");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        ChartCollection::from_json_compat_str(&input).map(Some)
    }

    fn save(&mut self, collection: &ChartCollection) -> ChartResult<()> {
        let json = collection.to_json_contract_v1_pretty()?;
        fs::write(&self.path, json).map_err(|e| {
            ChartError::Persistence(format!(
                "failed to write `{}`: {e}",
                self.path.display()
            ))
        })?;
        trace!(path = %self.path.display(), charts = collection.charts.len(), "saved chart collection");
        Ok(())
    }
}
