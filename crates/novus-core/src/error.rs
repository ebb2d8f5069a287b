use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Duplicate duty baseline for zone {0}")]
    DuplicateZone(u16),

    #[error("Duplicate relic entry for item {0}")]
    DuplicateRelic(u32),

    #[error("Invalid catalog entry: {0}")]
    InvalidCatalog(String),

    #[error("Failed to record light bonus for zone {zone_id}: {message}")]
    RecordFailed { zone_id: u16, message: String },

    #[error("Failed to write widget text on node {node_id}: {message}")]
    WidgetWriteFailed { node_id: u64, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let err2 = Error::DuplicateZone(1036);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = Error::RecordFailed {
            zone_id: 1036,
            message: "closed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to record light bonus for zone 1036: closed"
        );

        let err = Error::WidgetWriteFailed {
            node_id: 4008,
            message: "addon closed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write widget text on node 4008: addon closed"
        );
    }
}
