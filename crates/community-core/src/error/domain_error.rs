//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::MemberId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Data inconsistency (skip and continue where possible)
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    // =========================================================================
    // Uniqueness violations
    // =========================================================================
    #[error("Badge name already defined: {0}")]
    DuplicateBadgeName(String),

    // =========================================================================
    // Infrastructure
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    /// Get an error code string for logs and reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::DuplicateBadgeName(_) => "DUPLICATE_BADGE_NAME",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Referenced record missing or malformed
    pub fn is_data_inconsistency(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_) | Self::EventNotFound(_) | Self::InvalidData(_)
        )
    }

    /// Storage-level uniqueness rejection. Repeat check-ins and grants are
    /// not errors: the stores report them as `false` / `None`.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateBadgeName(_))
    }

    /// Transient I/O failure that a retry may clear
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
