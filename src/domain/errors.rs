//! Domain errors for the industry index service.

use thiserror::Error;

use super::models::DocumentShapeError;

/// Domain-level errors raised by the loader and surfaced through the query layer.
///
/// Absence (unknown industry, company or rank) is never an error here; query
/// operations return `Option` or empty collections for that.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The upstream fetch failed: transport error, non-2xx status, or a body
    /// that is not a well-formed index document.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A caller-supplied argument was malformed or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Short machine-readable code used in HTTP error bodies.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }
}

impl From<DocumentShapeError> for DomainError {
    fn from(err: DocumentShapeError) -> Self {
        Self::UpstreamUnavailable(format!("malformed index document: {err}"))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::UpstreamUnavailable(format!("index document is not valid JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::UpstreamUnavailable("boom".to_string()).code(),
            "UPSTREAM_UNAVAILABLE"
        );
        assert_eq!(
            DomainError::InvalidArgument("limit".to_string()).code(),
            "INVALID_ARGUMENT"
        );
    }

    #[test]
    fn test_shape_error_maps_to_upstream_unavailable() {
        let err: DomainError = DocumentShapeError::NotAnObject.into();
        assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
        assert!(err.to_string().contains("malformed index document"));
    }
}
