//! Engine error types
//!
//! Missing datasets are never errors (the loader substitutes defaults).
//! The only conditions surfaced to callers are caller bugs and broken inputs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Region name is not in the dataset registry
    #[error("region '{0}' not found")]
    RegionNotFound(String),

    /// Scoring configuration failed to load or is inconsistent
    #[error("invalid scoring configuration: {0}")]
    Config(String),

    /// A dataset file exists but its columns could not be interpreted
    #[error("dataset '{name}': {message}")]
    Dataset { name: String, message: String },
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = EngineError::RegionNotFound("Atlantis".to_string());
        assert_eq!(err.to_string(), "region 'Atlantis' not found");
    }
}
