//! Error types for data-quality validation.

use thiserror::Error;

/// Result type alias for quality validation.
pub type QualityResultOf<T> = Result<T, QualityError>;

/// Violations of the documented mandatory constraints that the type
/// definitions alone cannot enforce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QualityError {
    /// A data-quality record must carry at least one report or a lineage.
    #[error("data quality record has neither reports nor lineage")]
    MissingReports,

    /// Every quality element must carry at least one result.
    #[error("quality element '{element}' has no results")]
    EmptyResults { element: String },
}
