//! State vocabulary and the recognizer that finds postal codes in free text.

use crate::error::{Error, Result};
use crate::types::{Centroid, StateCode};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Approximate centroids of the 50 U.S. states as `(code, latitude, longitude)`
const US_STATE_CENTROIDS: &[(&str, f64, f64)] = &[
    ("AL", 32.7794, -86.8287),
    ("AK", 64.0685, -152.2782),
    ("AZ", 34.2744, -111.6602),
    ("AR", 34.8938, -92.4426),
    ("CA", 36.1700, -119.7462),
    ("CO", 39.0646, -105.3272),
    ("CT", 41.6219, -72.7273),
    ("DE", 38.9896, -75.5050),
    ("FL", 28.6305, -82.4497),
    ("GA", 32.6415, -83.4426),
    ("HI", 20.2927, -156.3737),
    ("ID", 44.3509, -114.6130),
    ("IL", 40.0417, -89.1965),
    ("IN", 39.8942, -86.2816),
    ("IA", 42.0751, -93.4960),
    ("KS", 38.4937, -98.3804),
    ("KY", 37.5347, -85.3021),
    ("LA", 31.0689, -91.9968),
    ("ME", 45.3695, -69.2428),
    ("MD", 39.0550, -76.7909),
    ("MA", 42.2596, -71.8083),
    ("MI", 44.3467, -85.4102),
    ("MN", 46.2807, -94.3053),
    ("MS", 32.7364, -89.6678),
    ("MO", 38.3566, -92.4580),
    ("MT", 47.0527, -109.6333),
    ("NE", 41.5378, -99.7951),
    ("NV", 39.3289, -116.6312),
    ("NH", 43.6805, -71.5811),
    ("NJ", 40.1907, -74.6728),
    ("NM", 34.4071, -106.1126),
    ("NY", 42.9538, -75.5268),
    ("NC", 35.5557, -79.3877),
    ("ND", 47.4501, -100.4659),
    ("OH", 40.2862, -82.7937),
    ("OK", 35.5889, -97.4943),
    ("OR", 43.9336, -120.5583),
    ("PA", 40.8781, -77.7996),
    ("RI", 41.6762, -71.5562),
    ("SC", 33.9169, -80.8964),
    ("SD", 44.4443, -100.2263),
    ("TN", 35.8580, -86.3505),
    ("TX", 31.4757, -99.3312),
    ("UT", 39.3055, -111.6703),
    ("VT", 44.0687, -72.6658),
    ("VA", 37.5215, -78.8537),
    ("WA", 47.3826, -120.4472),
    ("WV", 38.6409, -80.6227),
    ("WI", 44.6243, -89.9941),
    ("WY", 42.9957, -107.5512),
];

/// Read-only mapping from postal code to centroid, kept in table order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StateVocabulary {
    entries: IndexMap<StateCode, Centroid>,
}

impl StateVocabulary {
    /// The built-in 50-state table, initialized on first use
    pub fn us_states() -> &'static StateVocabulary {
        static US_STATES: OnceLock<StateVocabulary> = OnceLock::new();
        US_STATES.get_or_init(|| StateVocabulary {
            entries: US_STATE_CENTROIDS
                .iter()
                .map(|(code, lat, lon)| (StateCode(code.to_string()), Centroid::new(*lat, *lon)))
                .collect(),
        })
    }

    /// Build a vocabulary from arbitrary entries, checking code shape and coordinates
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Centroid)>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for (code, centroid) in entries {
            let code = StateCode::new(code)?;
            if !(-90.0..=90.0).contains(&centroid.latitude)
                || !(-180.0..=180.0).contains(&centroid.longitude)
            {
                return Err(Error::Config(format!(
                    "Centroid for {} is out of range: ({}, {})",
                    code, centroid.latitude, centroid.longitude
                )));
            }
            map.insert(code, centroid);
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, code: &str) -> Option<Centroid> {
        self.entries.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Look up the vocabulary's own copy of a code
    pub fn code(&self, code: &str) -> Option<&StateCode> {
        self.entries.get_key_value(code).map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateCode, &Centroid)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StateVocabulary {
    fn default() -> Self {
        Self::us_states().clone()
    }
}

/// Find every vocabulary code that appears in `line` as a whole token.
///
/// Tokens are maximal runs of alphanumeric characters and matching is
/// case-sensitive, so `IN` in "active IN the field" counts as Indiana while
/// `in` and `Ohio` never match anything.
pub fn recognize_states(line: &str, vocabulary: &StateVocabulary) -> BTreeSet<StateCode> {
    line.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() == 2)
        .filter_map(|token| vocabulary.code(token))
        .cloned()
        .collect()
}
