//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// The platform refused the Bluetooth scan/connect capability
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Discovery finished without finding any device
    #[error("No printers found")]
    NoDevicesFound,

    /// Connecting to a selected device failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Streaming a document to the printer failed
    #[error("Print failed: {0}")]
    PrintFailed(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
