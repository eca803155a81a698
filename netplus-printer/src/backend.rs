//! Printer backend capability
//!
//! One workflow, two mutually incompatible output channels. The session
//! controller in the application crate holds exactly one `PrinterBackend`
//! and never branches on the concrete type.

use crate::error::PrintResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Discovered printer hardware identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterDevice {
    /// Display name shown during selection
    pub device_name: String,
    /// Native MAC-like address used to connect
    pub address: String,
}

impl PrinterDevice {
    pub fn new(device_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            address: address.into(),
        }
    }
}

/// A receipt ready for dispatch, in both renderings
///
/// The BLE backend consumes the markup rendering; the intent backend wraps
/// the plain-text rendering in ESC/POS. Both come from one canonical
/// receipt value, so the dialect carries no business meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub markup: String,
    pub plain_text: String,
}

/// Trait for printer backends
///
/// Lifecycle per session: `discover` → `connect` → `print` (repeatable).
/// Implementations report `PermissionDenied`, `NoDevicesFound`,
/// `ConnectionFailed` or `PrintFailed`; they never panic on device errors.
#[async_trait]
pub trait PrinterBackend: Send + Sync {
    /// Request any platform permissions the channel needs, then enumerate
    /// available devices
    async fn discover(&self) -> PrintResult<Vec<PrinterDevice>>;

    /// Open a connection to the given device
    async fn connect(&self, device: &PrinterDevice) -> PrintResult<()>;

    /// Stream a receipt document to the connected device
    async fn print(&self, doc: &PrintDocument) -> PrintResult<()>;
}

/// Platform capability for handing a URI to the operating system
///
/// Used by the intent backend (`rawbt:` payloads) and by the application
/// crate for chat/SMS deep links. The external application's success is
/// invisible; only the launch itself can fail.
#[async_trait]
pub trait UriLauncher: Send + Sync {
    async fn launch(&self, uri: &str) -> Result<(), String>;
}
