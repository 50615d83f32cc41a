//! Error types for open-space-hub-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Input report payload had the wrong length — transport or firmware bug.
    /// The offending report is dropped; the session keeps streaming.
    #[error("malformed report: expected {expected}-byte payload, got {actual}")]
    MalformedReport { expected: usize, actual: usize },

    /// Opening the device failed (permission denied, busy, or removed
    /// between selection and open).
    #[error("failed to open device: {0}")]
    OpenFailed(String),

    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Device not found during enumeration.
    #[error("device not found: {0}")]
    DeviceNotFound(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
