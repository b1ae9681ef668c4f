//! Error types for the key scanner
//!
//! This module defines errors for configuration building ([`BuilderError`])
//! and for the scan loop and factory reset ([`Error`]).
//!
//! Every [`Error`] is fatal for the task that observes it. Nothing here is
//! retried: the scan task ends on [`Error::QueueReceive`], and the factory
//! reset stops at the first failing step without restarting the device.
//!
//! ## Example
//!
//! ```
//! use reset_key::{Builder, BuilderError};
//!
//! let result = Builder::new().thresholds_us(5_000_000, 1_000_000).build();
//! assert!(matches!(result, Err(BuilderError::InvalidThresholds { .. })));
//! ```

use core::fmt::Debug;

/// Errors raised by the scan loop and the factory-reset sequence
///
/// Generic over the collaborator error type so callers can still match on
/// the platform's own error (an `EspError` on target, a mock error in tests).
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Receiving from the edge queue failed or timed out
    QueueReceive(E),
    /// Persisted Wi-Fi configuration could not be erased
    WifiConfigErase(E),
    /// No OTA data partition exists in the partition table
    PartitionNotFound,
    /// Erasing the OTA data partition failed
    PartitionErase(E),
    /// Persisted account-binding state could not be erased
    AccountReset(E),
}

impl<E: Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::QueueReceive(e) => write!(f, "Edge queue receive failed: {e:?}"),
            Error::WifiConfigErase(e) => write!(f, "Wi-Fi config erase failed: {e:?}"),
            Error::PartitionNotFound => write!(f, "OTA data partition not found"),
            Error::PartitionErase(e) => write!(f, "OTA data partition erase failed: {e:?}"),
            Error::AccountReset(e) => write!(f, "Account binding reset failed: {e:?}"),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// The medium threshold must be strictly below the long threshold
    InvalidThresholds {
        /// Medium press lower bound requested (µs)
        medium_after_us: u64,
        /// Long press lower bound requested (µs)
        long_after_us: u64,
    },
    /// The edge queue needs room for at least one edge
    ZeroQueueCapacity,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::InvalidThresholds {
                medium_after_us,
                long_after_us,
            } => write!(
                f,
                "Invalid thresholds: medium {medium_after_us}us must be below long {long_after_us}us"
            ),
            BuilderError::ZeroQueueCapacity => write!(f, "Edge queue capacity must be non-zero"),
        }
    }
}

impl core::error::Error for BuilderError {}
