use indexmap::IndexSet;
use tracing::debug;

use crate::core::RadarChartData;
use crate::store::{ChartCollection, ChartKind, ChartRecord};

/// A compared chart's value for one stat label.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonValue {
    pub chart_id: String,
    pub value: f64,
    pub color: String,
}

/// Radar charts overlaid on the active radar chart, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSet {
    chart_ids: IndexSet<String>,
}

impl ComparisonSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn chart_ids(&self) -> Vec<&str> {
        self.chart_ids.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chart_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chart_ids.is_empty()
    }

    /// Adds `chart_id` as an overlay for the active chart.
    ///
    /// Only radar charts compare against a radar chart; the active chart
    /// itself, unknown ids and duplicates are rejected.
    pub fn add(&mut self, collection: &ChartCollection, chart_id: &str) -> bool {
        let Some(active) = collection.active_chart() else {
            return false;
        };
        if active.kind() != ChartKind::Radar || active.id == chart_id {
            return false;
        }
        let is_radar = collection
            .chart(chart_id)
            .is_some_and(|chart| chart.kind() == ChartKind::Radar);
        if !is_radar {
            return false;
        }
        let inserted = self.chart_ids.insert(chart_id.to_owned());
        if inserted {
            debug!(chart_id, "add comparison overlay");
        }
        inserted
    }

    pub fn remove(&mut self, chart_id: &str) -> bool {
        self.chart_ids.shift_remove(chart_id)
    }

    pub fn clear(&mut self) {
        self.chart_ids.clear();
    }

    /// Compared charts still present in `collection`, skipping deleted ones.
    #[must_use]
    pub fn overlays<'a>(&self, collection: &'a ChartCollection) -> Vec<&'a ChartRecord> {
        self.chart_ids
            .iter()
            .filter_map(|id| collection.chart(id))
            .filter(|chart| chart.kind() == ChartKind::Radar)
            .collect()
    }

    #[must_use]
    pub fn overlay_data<'a>(&self, collection: &'a ChartCollection) -> Vec<&'a RadarChartData> {
        self.overlays(collection)
            .into_iter()
            .filter_map(ChartRecord::as_radar)
            .collect()
    }

    /// Values of the stat labelled `label` in each compared chart that has one.
    #[must_use]
    pub fn comparison_values(&self, collection: &ChartCollection, label: &str) -> Vec<ComparisonValue> {
        self.overlays(collection)
            .into_iter()
            .filter_map(|chart| {
                let data = chart.as_radar()?;
                let stat = data.stats().iter().find(|stat| stat.label == label)?;
                Some(ComparisonValue {
                    chart_id: chart.id.clone(),
                    value: stat.value,
                    color: data.color().to_owned(),
                })
            })
            .collect()
    }
}
