//! Access Control Error Codes
//!
//! Range: 0x0100 - 0x01FF
//! Format: ACCESS_ERROR_<SPECIFIC>
//!
//! Each error also carries the identifier external consumers match on
//! (client libraries, explorers, test harnesses). Those names are part of
//! the public interface and must not change.

use thiserror::Error;

use crate::config::ACCESS_ERROR_RANGE_START;
use crate::crypto::Principal;

pub const ACCESS_ERROR_UNAUTHORIZED: u64 = ACCESS_ERROR_RANGE_START;
pub const ACCESS_ERROR_ENFORCED_PAUSE: u64 = ACCESS_ERROR_RANGE_START + 0x01;
pub const ACCESS_ERROR_EXPECTED_PAUSE: u64 = ACCESS_ERROR_RANGE_START + 0x02;
pub const ACCESS_ERROR_INVALID_ARGUMENT: u64 = ACCESS_ERROR_RANGE_START + 0x03;

/// Access control result type
pub type AccessResult<T> = Result<T, AccessError>;

/// Failures raised by the ownership guard and the pause gate
///
/// All of them are caller faults: retrying the same call against the same
/// state fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Caller is not the current owner
    #[error("account {0} is not the owner")]
    Unauthorized(Principal),

    /// Operation requires the gate to be active but it is paused
    #[error("operation rejected: contract is paused")]
    EnforcedPause,

    /// Operation requires the gate to be paused but it is active
    #[error("operation rejected: contract is not paused")]
    ExpectedPause,

    /// Zero principal given where an owner is required
    #[error("invalid owner {0}")]
    InvalidArgument(Principal),
}

impl AccessError {
    /// Numeric code of the error
    pub fn code(&self) -> u64 {
        match self {
            AccessError::Unauthorized(_) => ACCESS_ERROR_UNAUTHORIZED,
            AccessError::EnforcedPause => ACCESS_ERROR_ENFORCED_PAUSE,
            AccessError::ExpectedPause => ACCESS_ERROR_EXPECTED_PAUSE,
            AccessError::InvalidArgument(_) => ACCESS_ERROR_INVALID_ARGUMENT,
        }
    }

    /// External identifier of the error
    pub fn name(&self) -> &'static str {
        match self {
            AccessError::Unauthorized(_) => "OwnableUnauthorizedAccount",
            AccessError::EnforcedPause => "EnforcedPause",
            AccessError::ExpectedPause => "ExpectedPause",
            AccessError::InvalidArgument(_) => "OwnableInvalidOwner",
        }
    }
}

impl From<AccessError> for u64 {
    fn from(err: AccessError) -> u64 {
        err.code()
    }
}
