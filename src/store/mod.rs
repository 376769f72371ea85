//! Persisted chart collection.
//!
//! `ChartStore` owns the ordered chart list and the active-chart pointer.
//! Every mutation builds the next collection, swaps it in whole and hands it
//! to the injected [`ChartPersistence`].

mod persistence;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::{new_id, now_unix_millis, unix_millis_to_datetime};
use crate::core::{AlignmentChartData, RadarChartData};

pub use persistence::{
    COLLECTION_JSON_SCHEMA_V1, ChartCollectionJsonContractV1, ChartPersistence,
    JsonFilePersistence, MemoryPersistence,
};

pub const DEFAULT_RADAR_NAME: &str = "New Radar Chart";
pub const DEFAULT_RADAR_DESCRIPTION: &str = "A new statistic chart";
pub const DEFAULT_ALIGNMENT_NAME: &str = "New Alignment";
pub const DEFAULT_ALIGNMENT_DESCRIPTION: &str = "Three-point alignment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Radar,
    Alignment,
}

/// Kind-specific chart content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartPayload {
    Radar(RadarChartData),
    Alignment(AlignmentChartData),
}

impl ChartPayload {
    #[must_use]
    pub fn default_for(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Radar => Self::Radar(RadarChartData::default()),
            ChartKind::Alignment => Self::Alignment(AlignmentChartData::default()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Radar(_) => ChartKind::Radar,
            Self::Alignment(_) => ChartKind::Alignment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    #[serde(flatten)]
    pub payload: ChartPayload,
}

impl ChartRecord {
    /// New record with the documented defaults for `kind`.
    #[must_use]
    pub fn with_defaults(kind: ChartKind) -> Self {
        let (name, description) = match kind {
            ChartKind::Radar => (DEFAULT_RADAR_NAME, DEFAULT_RADAR_DESCRIPTION),
            ChartKind::Alignment => (DEFAULT_ALIGNMENT_NAME, DEFAULT_ALIGNMENT_DESCRIPTION),
        };
        Self {
            id: new_id(),
            name: name.to_owned(),
            description: description.to_owned(),
            created_at: now_unix_millis(),
            payload: ChartPayload::default_for(kind),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.payload.kind()
    }

    #[must_use]
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        unix_millis_to_datetime(self.created_at)
    }

    #[must_use]
    pub fn as_radar(&self) -> Option<&RadarChartData> {
        match &self.payload {
            ChartPayload::Radar(data) => Some(data),
            ChartPayload::Alignment(_) => None,
        }
    }

    #[must_use]
    pub fn as_alignment(&self) -> Option<&AlignmentChartData> {
        match &self.payload {
            ChartPayload::Alignment(data) => Some(data),
            ChartPayload::Radar(_) => None,
        }
    }

    /// Applies `patch`; a payload of the other kind is dropped.
    fn merge(&mut self, patch: ChartPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(payload) = patch.payload {
            if payload.kind() == self.kind() {
                self.payload = payload;
            } else {
                warn!(
                    chart_id = %self.id,
                    kind = ?self.kind(),
                    patch_kind = ?payload.kind(),
                    "ignoring payload of a different chart kind"
                );
            }
        }
    }
}

/// Partial update for [`ChartStore::update_chart`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub payload: Option<ChartPayload>,
}

impl ChartPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn payload(mut self, payload: ChartPayload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Everything the store persists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartCollection {
    pub charts: Vec<ChartRecord>,
    #[serde(default)]
    pub active_chart_id: Option<String>,
}

impl ChartCollection {
    #[must_use]
    pub fn chart(&self, id: &str) -> Option<&ChartRecord> {
        self.charts.iter().find(|chart| chart.id == id)
    }

    #[must_use]
    pub fn active_chart(&self) -> Option<&ChartRecord> {
        self.active_chart_id
            .as_deref()
            .and_then(|id| self.chart(id))
    }
}

/// Single owner of the chart collection.
///
/// Construct one per process and pass it by reference to whatever edits
/// charts. Persistence failures are logged and never reach the caller.
#[derive(Debug)]
pub struct ChartStore<P: ChartPersistence> {
    persistence: P,
    collection: ChartCollection,
}

impl<P: ChartPersistence> ChartStore<P> {
    /// Loads the persisted collection, starting empty when there is none.
    pub fn open(mut persistence: P) -> Self {
        let collection = match persistence.load() {
            Ok(Some(collection)) => {
                debug!(charts = collection.charts.len(), "loaded chart collection");
                collection
            }
            Ok(None) => ChartCollection::default(),
            Err(err) => {
                warn!(error = %err, "failed to load chart collection, starting empty");
                ChartCollection::default()
            }
        };
        Self {
            persistence,
            collection,
        }
    }

    #[must_use]
    pub fn collection(&self) -> &ChartCollection {
        &self.collection
    }

    #[must_use]
    pub fn charts(&self) -> &[ChartRecord] {
        &self.collection.charts
    }

    #[must_use]
    pub fn chart(&self, id: &str) -> Option<&ChartRecord> {
        self.collection.chart(id)
    }

    #[must_use]
    pub fn active_chart_id(&self) -> Option<&str> {
        self.collection.active_chart_id.as_deref()
    }

    #[must_use]
    pub fn active_chart(&self) -> Option<&ChartRecord> {
        self.collection.active_chart()
    }

    #[must_use]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Creates a chart with defaults, makes it active and returns its id.
    pub fn add_chart(&mut self, kind: ChartKind) -> String {
        let record = ChartRecord::with_defaults(kind);
        let id = record.id.clone();
        debug!(chart_id = %id, ?kind, "add chart");

        let mut next = self.collection.clone();
        next.charts.push(record);
        next.active_chart_id = Some(id.clone());
        self.commit(next);
        id
    }

    /// Merges `patch` into the chart with `id`. Returns `false` for unknown ids.
    pub fn update_chart(&mut self, id: &str, patch: ChartPatch) -> bool {
        let mut next = self.collection.clone();
        let Some(record) = next.charts.iter_mut().find(|chart| chart.id == id) else {
            return false;
        };
        record.merge(patch);
        self.commit(next);
        true
    }

    /// Edits a radar payload in place of a copy.
    ///
    /// `edit` returns whether it changed anything; unchanged edits are not
    /// committed. Returns `false` for unknown ids and alignment charts.
    pub fn update_radar<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut RadarChartData) -> bool,
    {
        let Some(ChartPayload::Radar(data)) = self.chart(id).map(|chart| &chart.payload) else {
            return false;
        };
        let mut data = data.clone();
        if !edit(&mut data) {
            return false;
        }
        self.update_chart(id, ChartPatch::default().payload(ChartPayload::Radar(data)))
    }

    /// Alignment counterpart of [`ChartStore::update_radar`].
    pub fn update_alignment<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut AlignmentChartData) -> bool,
    {
        let Some(ChartPayload::Alignment(data)) = self.chart(id).map(|chart| &chart.payload)
        else {
            return false;
        };
        let mut data = data.clone();
        if !edit(&mut data) {
            return false;
        }
        self.update_chart(
            id,
            ChartPatch::default().payload(ChartPayload::Alignment(data)),
        )
    }

    /// Removes the chart with `id`, clearing the active pointer if it pointed there.
    pub fn delete_chart(&mut self, id: &str) -> bool {
        if self.chart(id).is_none() {
            return false;
        }
        debug!(chart_id = %id, "delete chart");
        let mut next = self.collection.clone();
        next.charts.retain(|chart| chart.id != id);
        if next.active_chart_id.as_deref() == Some(id) {
            next.active_chart_id = None;
        }
        self.commit(next);
        true
    }

    /// Points the editor at `id`. The id is not checked against the collection.
    pub fn set_active_chart(&mut self, id: Option<&str>) {
        let mut next = self.collection.clone();
        next.active_chart_id = id.map(str::to_owned);
        self.commit(next);
    }

    fn commit(&mut self, next: ChartCollection) {
        self.collection = next;
        if let Err(err) = self.persistence.save(&self.collection) {
            warn!(error = %err, "failed to persist chart collection");
        }
    }
}
