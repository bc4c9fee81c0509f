use std::path::PathBuf;
use thiserror::Error;

/// Failures while obtaining a listing collection.
///
/// Filtering and facet extraction never fail; only loading does.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed listing data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("internship {0} is listed but has no record")]
    MissingRecord(i64),

    #[error("provider failed: {0}")]
    Provider(String),
}

impl CatalogError {
    /// The snapshot path this error occurred at, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_message_carries_cause() {
        let err = CatalogError::Io {
            path: PathBuf::from("data/internships.json"),
            source: Error::new(ErrorKind::PermissionDenied, "access denied"),
        };
        assert_eq!(
            err.to_string(),
            "cannot read snapshot data/internships.json: access denied"
        );
    }

    #[test]
    fn test_malformed_message_carries_cause() {
        let cause = serde_json::from_str::<Vec<i64>>("[1,").unwrap_err();
        let err = CatalogError::from(cause);
        assert!(err.to_string().starts_with("malformed listing data: "), "{err}");
        assert!(err.to_string().contains("line 1"), "{err}");
    }
}
