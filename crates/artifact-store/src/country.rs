//! Per-Country Reference Table

use crate::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Reference statistics for one country
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountryStats {
    pub population_2022: f64,
    pub estimated_total_users: f64,
}

/// Row shape of `countries.csv`
#[derive(Debug, Deserialize)]
struct CountryRow {
    country: String,
    population_2022: f64,
    estimated_total_users: f64,
}

/// Static reference table keyed by country name. Loaded once at process
/// start, immutable thereafter.
#[derive(Debug, Clone)]
pub struct CountryReference {
    rows: HashMap<String, CountryStats>,
}

impl CountryReference {
    /// Build from in-memory rows. Duplicate country names keep the first
    /// row, matching the lookup semantics the model was trained against.
    pub fn from_rows(rows: impl IntoIterator<Item = (String, CountryStats)>) -> Self {
        let mut map = HashMap::new();
        for (country, stats) in rows {
            map.entry(country).or_insert(stats);
        }
        Self { rows: map }
    }

    /// Load the reference table from a CSV file with header
    /// `country,population_2022,estimated_total_users`
    pub fn from_csv(path: &Path) -> Result<Self, ArtifactError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| ArtifactError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: CountryRow = result.map_err(|e| ArtifactError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            rows.push((row.country, CountryStats {
                population_2022: row.population_2022,
                estimated_total_users: row.estimated_total_users,
            }));
        }

        Ok(Self::from_rows(rows))
    }

    /// Typed lookup for one country, None if absent
    pub fn get(&self, country: &str) -> Option<&CountryStats> {
        self.rows.get(country)
    }

    /// Country names sorted alphabetically, for display layers
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows.keys().cloned().collect();
        names.sort();
        names
    }

    /// Country names in arbitrary order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
