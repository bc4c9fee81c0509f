use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::CatalogError;
use crate::models::{Internship, Snapshot};

// --- Provider trait ---

/// Supplies a raw listing collection: either the whole collection or an
/// explicit failure.
pub trait Provider {
    fn fetch(&self) -> Result<Vec<Internship>, CatalogError>;
    fn describe(&self) -> String;
}

/// Parse a feed payload into records, in `internship_ids` order.
pub fn parse_snapshot(json: &str) -> Result<Vec<Internship>, CatalogError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    snapshot.into_records()
}

/// A snapshot stored on disk in the feed's JSON shape.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Provider for SnapshotFile {
    fn fetch(&self) -> Result<Vec<Internship>, CatalogError> {
        let json = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records = parse_snapshot(&json)?;
        info!(path = %self.path.display(), records = records.len(), "snapshot loaded");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Tries `primary`, and on failure serves `fallback` instead.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Provider, F: Provider> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Provider, F: Provider> Provider for WithFallback<P, F> {
    fn fetch(&self) -> Result<Vec<Internship>, CatalogError> {
        self.primary.fetch().or_else(|err| {
            warn!(
                primary = %self.primary.describe(),
                fallback = %self.fallback.describe(),
                error = %err,
                "primary source failed, using fallback"
            );
            self.fallback.fetch()
        })
    }

    fn describe(&self) -> String {
        format!("{} (fallback: {})", self.primary.describe(), self.fallback.describe())
    }
}

/// A fixed, already-loaded collection.
pub struct InMemory(pub Vec<Internship>);

impl Provider for InMemory {
    fn fetch(&self) -> Result<Vec<Internship>, CatalogError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory listings", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "internship_ids": [11, 10],
        "internships_meta": {
            "10": {"id": 10, "title": "SEO Intern", "company_name": "Acme", "profile_name": "SEO"},
            "11": {"id": 11, "title": "Design Intern", "company_name": "Studio", "profile_name": "Design"}
        }
    }"#;

    #[test]
    fn test_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("internships.json");
        fs::write(&path, FEED).unwrap();

        let records = SnapshotFile::new(path.clone()).fetch().unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![11, 10]);
    }

    #[test]
    fn test_snapshot_file_missing() {
        let provider = SnapshotFile::new("/nonexistent/internships.json");
        let err = provider.fetch().unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/nonexistent/internships.json")));

        let message = err.to_string();
        assert!(message.contains("/nonexistent/internships.json"), "{message}");
        assert!(message.contains("No such file"), "{message}");
    }

    #[test]
    fn test_malformed_snapshot() {
        let err = parse_snapshot("{").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
        assert!(err.to_string().contains("EOF"), "{err}");
    }

    #[test]
    fn test_fallback_used_on_failure() {
        let fallback = InMemory(parse_snapshot(FEED).unwrap());
        let provider = WithFallback::new(SnapshotFile::new("/nonexistent.json"), fallback);
        assert_eq!(provider.fetch().unwrap().len(), 2);
    }

    #[test]
    fn test_fallback_not_used_on_success() {
        let primary = InMemory(Vec::new());
        let fallback = InMemory(parse_snapshot(FEED).unwrap());
        let provider = WithFallback::new(primary, fallback);
        assert!(provider.fetch().unwrap().is_empty());
    }
}
