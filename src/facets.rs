use std::collections::HashSet;

use crate::models::{Internship, WORK_FROM_HOME};

/// A multi-select attribute whose choices come from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Profiles,
    Locations,
}

impl Facet {
    pub fn name(self) -> &'static str {
        match self {
            Facet::Profiles => "profiles",
            Facet::Locations => "locations",
        }
    }
}

/// Distinct profile and location names seen in a raw collection, in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub profiles: Vec<String>,
    pub locations: Vec<String>,
}

impl Facets {
    /// One pass over the unfiltered collection. Values are kept exactly as
    /// spelled in the data; blanks and the WFH marker are skipped.
    pub fn extract(records: &[Internship]) -> Self {
        let mut facets = Facets::default();
        let mut seen_profiles: HashSet<&str> = HashSet::new();
        let mut seen_locations: HashSet<&str> = HashSet::new();

        for record in records {
            let profile = record.profile_name.as_str();
            if !profile.trim().is_empty() && seen_profiles.insert(profile) {
                facets.profiles.push(profile.to_string());
            }

            for location in &record.location_names {
                let location = location.as_str();
                if location.trim().is_empty() || location == WORK_FROM_HOME {
                    continue;
                }
                if seen_locations.insert(location) {
                    facets.locations.push(location.to_string());
                }
            }
        }

        facets
    }

    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Profiles => &self.profiles,
            Facet::Locations => &self.locations,
        }
    }

    /// Values containing `query`, case-insensitively. An empty query matches all.
    pub fn suggest(&self, facet: Facet, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.values(facet)
            .iter()
            .filter(|value| value.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    /// The facet's spelling of `candidate`, matched case-insensitively.
    pub fn lookup(&self, facet: Facet, candidate: &str) -> Option<&str> {
        let candidate = candidate.to_lowercase();
        self.values(facet)
            .iter()
            .find(|value| value.to_lowercase() == candidate)
            .map(String::as_str)
    }

    /// Decide whether `candidate` may join `selected`.
    ///
    /// Accepted only if it names a facet value and is not already selected,
    /// both case-insensitively. Returns the facet's spelling on success.
    pub fn accept(&self, facet: Facet, selected: &[String], candidate: &str) -> Option<&str> {
        let value = self.lookup(facet, candidate)?;
        let lower = value.to_lowercase();
        if selected.iter().any(|s| s.to_lowercase() == lower) {
            return None;
        }
        Some(value)
    }
}
