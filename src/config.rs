use std::path::PathBuf;

use crate::provider::{Provider, SnapshotFile, WithFallback};

pub const ENV_SNAPSHOT: &str = "INTERNFILTER_SNAPSHOT";
pub const ENV_LOG: &str = "INTERNFILTER_LOG";
pub const SNAPSHOT_FILE: &str = "internships.json";

/// Where listings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub snapshot: PathBuf,
    pub fallback: Option<PathBuf>,
}

impl Config {
    /// An explicit path wins; otherwise the per-user data directory.
    pub fn resolve(snapshot: Option<PathBuf>, fallback: Option<PathBuf>) -> Self {
        Self {
            snapshot: snapshot.unwrap_or_else(Self::default_snapshot_path),
            fallback,
        }
    }

    fn default_snapshot_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "internfilter") {
            proj_dirs.data_dir().join(SNAPSHOT_FILE)
        } else {
            PathBuf::from(SNAPSHOT_FILE)
        }
    }

    pub fn provider(&self) -> Box<dyn Provider> {
        let primary = SnapshotFile::new(self.snapshot.clone());
        match &self.fallback {
            Some(fallback) => Box::new(WithFallback::new(primary, SnapshotFile::new(fallback.clone()))),
            None => Box::new(primary),
        }
    }
}
