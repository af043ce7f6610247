//! Service layer error types

use community_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or store failure
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    /// Get the error code for logs and reports
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
        }
    }

    /// Referenced member or event is missing, or stored data is malformed
    pub fn is_data_inconsistency(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_data_inconsistency())
    }

    /// Transient store failure
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_transient())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
