use thiserror::Error;

/// Failure of one tracking ingestion attempt.
///
/// Individual undecodable lines are not errors; they are counted in
/// [`crate::ingest::IngestStats`].
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted stream: git-lfs pointer found in the first {probe_len} bytes")]
    CorruptedStream { probe_len: usize },
}

impl IngestError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            IngestError::Io(_) => true,
            IngestError::CorruptedStream { .. } => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum EventLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupted_stream_is_not_recoverable() {
        let err = IngestError::CorruptedStream { probe_len: 50 };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("50 bytes"));

        let io = IngestError::from(std::io::Error::new(std::io::ErrorKind::Other, "reset"));
        assert!(io.is_recoverable());
    }
}
