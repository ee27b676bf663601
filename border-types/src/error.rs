//! Error types for the border exchange gateway.

use crate::domain::{BorderFailure, FetchStage};

/// Failures talking to, or making sense of, an upstream provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed upstream data: {0}")]
    Malformed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found during {stage}: {identifier}")]
    NotFound {
        stage: FetchStage,
        identifier: String,
    },

    #[error("{stage} failed for '{identifier}': {source}")]
    Upstream {
        stage: FetchStage,
        identifier: String,
        source: UpstreamError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Attaches the failing stage and identifier to an upstream error.
    ///
    /// Only the origin comes from the caller, so only origin-lookup errors
    /// are client-side. A border that is missing from the directory, or
    /// listed with an empty code, means the directory contradicts itself,
    /// which is an upstream failure.
    pub fn at_stage(stage: FetchStage, identifier: impl Into<String>, err: UpstreamError) -> Self {
        let identifier = identifier.into();
        match (stage, err) {
            (FetchStage::OriginLookup, UpstreamError::InvalidQuery(msg)) => {
                AppError::BadRequest(msg)
            }
            (FetchStage::OriginLookup, UpstreamError::NotFound(_)) => {
                AppError::NotFound { stage, identifier }
            }
            (stage, UpstreamError::InvalidQuery(msg)) => AppError::Upstream {
                stage,
                identifier,
                source: UpstreamError::Malformed(msg),
            },
            (stage, source) => AppError::Upstream {
                stage,
                identifier,
                source,
            },
        }
    }

    /// The stage the error is attributed to, if any.
    pub fn stage(&self) -> Option<FetchStage> {
        match self {
            AppError::NotFound { stage, .. } | AppError::Upstream { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The identifier the failing call was made for, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            AppError::NotFound { identifier, .. } | AppError::Upstream { identifier, .. } => {
                Some(identifier)
            }
            _ => None,
        }
    }
}

impl From<BorderFailure> for AppError {
    fn from(failure: BorderFailure) -> Self {
        AppError::at_stage(failure.stage, failure.border_code, failure.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_not_found_is_not_found() {
        let err = AppError::at_stage(
            FetchStage::OriginLookup,
            "Atlantis",
            UpstreamError::NotFound("Atlantis".into()),
        );
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.identifier(), Some("Atlantis"));
    }

    #[test]
    fn test_border_not_found_is_upstream_failure() {
        let err = AppError::at_stage(
            FetchStage::BorderLookup,
            "XXX",
            UpstreamError::NotFound("XXX".into()),
        );
        assert!(matches!(err, AppError::Upstream { .. }));
        assert_eq!(err.stage(), Some(FetchStage::BorderLookup));
    }

    #[test]
    fn test_invalid_query_is_bad_request() {
        let err = AppError::at_stage(
            FetchStage::OriginLookup,
            "",
            UpstreamError::InvalidQuery("empty".into()),
        );
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_empty_border_code_is_upstream_failure() {
        let err: AppError = BorderFailure {
            index: 0,
            border_code: String::new(),
            stage: FetchStage::BorderLookup,
            error: UpstreamError::InvalidQuery("country identifier cannot be empty".into()),
        }
        .into();
        assert!(matches!(
            err,
            AppError::Upstream {
                stage: FetchStage::BorderLookup,
                source: UpstreamError::Malformed(_),
                ..
            }
        ));
    }

    #[test]
    fn test_border_failure_keeps_stage_and_code() {
        let err: AppError = BorderFailure {
            index: 2,
            border_code: "DEU".into(),
            stage: FetchStage::RateFetch,
            error: UpstreamError::Unavailable("timeout".into()),
        }
        .into();
        assert_eq!(err.stage(), Some(FetchStage::RateFetch));
        assert_eq!(err.identifier(), Some("DEU"));
    }

    #[test]
    fn test_upstream_message_names_stage_and_identifier() {
        let err = AppError::at_stage(
            FetchStage::RateFetch,
            "GBP",
            UpstreamError::Unavailable("HTTP 503".into()),
        );
        assert_eq!(
            err.to_string(),
            "rate fetch failed for 'GBP': Upstream unavailable: HTTP 503"
        );
    }
}
