//! Error taxonomy for the payment/receipt core
//!
//! Every variant is recoverable by user action; none is fatal to the
//! process. Controllers report these and land back in a well-defined
//! state so the same step can be retried.

use netplus_printer::PrintError;
use thiserror::Error;

/// Core error types
#[derive(Debug, Error)]
pub enum PosError {
    /// Amount text did not parse as a positive decimal
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The remote settlement call failed; no receipt was produced
    #[error("Settlement failed: {0}")]
    SettlementFailed(String),

    /// The platform refused a required device permission
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Printer discovery came back empty
    #[error("No printers found")]
    NoDevicesFound,

    /// Connecting to the selected printer failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Sending the receipt to the printer failed
    #[error("Print failed: {0}")]
    PrintFailed(String),

    /// A chat/SMS deep link could not be built or opened
    #[error("Could not open link: {0}")]
    LinkOpenFailed(String),

    /// Operation invoked from a state where it is not legal
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

/// Result type for core operations
pub type PosResult<T> = Result<T, PosError>;

impl From<PrintError> for PosError {
    fn from(e: PrintError) -> Self {
        match e {
            PrintError::PermissionDenied(m) => PosError::PermissionDenied(m),
            PrintError::NoDevicesFound => PosError::NoDevicesFound,
            PrintError::ConnectionFailed(m) => PosError::ConnectionFailed(m),
            PrintError::PrintFailed(m) => PosError::PrintFailed(m),
            PrintError::Io(e) => PosError::PrintFailed(e.to_string()),
        }
    }
}
