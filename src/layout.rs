//! Marker layout for plotting records on a U.S. map.
//!
//! This produces plain data (positions, colors, tooltips); drawing it is left
//! to whatever geo renderer consumes the JSON.

use crate::filter::StateFilter;
use crate::states::StateVocabulary;
use crate::types::{Record, StateCode};
use indexmap::IndexMap;
use serde::Serialize;
use std::f64::consts::PI;

/// Qualitative 12-color palette (ColorBrewer Set3)
pub const PALETTE: &[&str] = &[
    "#8DD3C7", "#FFFFB3", "#BEBADA", "#FB8072", "#80B1D3", "#FDB462", "#B3DE69", "#FCCDE5",
    "#D9D9D9", "#BC80BD", "#CCEBC5", "#FFED6F",
];

/// Distance in degrees between a state's centroid and the markers around it
pub const SPREAD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub organization: String,
    pub state: StateCode,
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub show_in_legend: bool,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub organization: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapLayout {
    pub markers: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
}

/// Assign each distinct organization a palette color by first appearance.
///
/// Colors repeat once there are more organizations than palette entries.
pub fn assign_colors(records: &[Record]) -> IndexMap<String, &'static str> {
    let mut colors = IndexMap::new();
    for record in records {
        if !colors.contains_key(&record.organization) {
            let color = PALETTE[colors.len() % PALETTE.len()];
            colors.insert(record.organization.clone(), color);
        }
    }
    colors
}

/// Position of item `index` out of `count` markers sharing one centroid
pub fn radial_offset(latitude: f64, longitude: f64, index: usize, count: usize) -> (f64, f64) {
    let angle = 2.0 * PI * index as f64 / count.max(1) as f64;
    (
        latitude + SPREAD * angle.sin(),
        longitude + SPREAD * angle.cos(),
    )
}

/// Lay out one marker per (organization, state) pair
pub fn build_markers(
    records: &[Record],
    vocabulary: &StateVocabulary,
    filter: &StateFilter,
) -> MapLayout {
    let colors = assign_colors(records);

    // state -> records mentioning it, both in first-seen order
    let mut groups: IndexMap<&StateCode, Vec<&Record>> = IndexMap::new();
    for record in records {
        for state in &record.states {
            if vocabulary.contains(state.as_str()) {
                groups.entry(state).or_default().push(record);
            }
        }
    }

    let mut layout = MapLayout::default();
    for (state, items) in groups {
        if !filter.allows_state(state) {
            continue;
        }
        let Some(centroid) = vocabulary.get(state.as_str()) else {
            continue;
        };

        for (i, record) in items.iter().enumerate() {
            let (latitude, longitude) =
                radial_offset(centroid.latitude, centroid.longitude, i, items.len());
            let color = colors
                .get(&record.organization)
                .copied()
                .unwrap_or(PALETTE[0]);

            let show_in_legend = !layout
                .legend
                .iter()
                .any(|entry| entry.organization == record.organization);
            if show_in_legend {
                layout.legend.push(LegendEntry {
                    organization: record.organization.clone(),
                    color,
                });
            }

            layout.markers.push(Marker {
                organization: record.organization.clone(),
                state: state.clone(),
                latitude,
                longitude,
                color,
                show_in_legend,
                tooltip: format!(
                    "{}<br>{}<br>{}",
                    record.organization, state, record.description
                ),
            });
        }
    }

    layout
}
