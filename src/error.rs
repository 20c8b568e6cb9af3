//! Error types for ingest and the cleaning pipeline.
//!
//! The core is strict: any of these aborts the whole batch. Binary-level code
//! wraps them in `anyhow` with extra context.

use thiserror::Error;

/// An instrument lacks the provider record needed to resolve its product type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("instrument {instrument} has no record for provider {provider}")]
pub struct ResolutionError {
    pub instrument: String,
    pub provider: String,
}

/// The product-type and score mappings disagree on instrument membership.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("instrument {instrument} is missing from the {missing_from} mapping")]
pub struct JoinError {
    pub instrument: String,
    pub missing_from: &'static str,
}

/// Failures while turning raw bytes into disclosure records.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("required column '{0}' not found in input")]
    MissingColumn(String),

    #[error("archive contains no CSV file")]
    NoCsvInArchive,

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of a cleaning run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_names_instrument_and_provider() {
        let err = ResolutionError {
            instrument: "LU0000000001".to_string(),
            provider: "20050".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("LU0000000001"));
        assert!(msg.contains("20050"));
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: PipelineError = JoinError {
            instrument: "CH0000000001".to_string(),
            missing_from: "scores",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "instrument CH0000000001 is missing from the scores mapping"
        );
    }
}
