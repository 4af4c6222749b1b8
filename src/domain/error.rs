//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// The tree store itself is total: structural misses degrade to no-ops and
/// never surface as errors. The only domain error is textual path input
/// that cannot be parsed at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid path '{input}': {reason}")]
    InvalidPath { input: String, reason: String },
}
