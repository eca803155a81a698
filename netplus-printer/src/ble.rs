//! BLE thermal printer backend
//!
//! Drives a platform Bluetooth adapter: permissions first, then paired
//! device enumeration, connection by inner MAC address, and a single
//! structured write per print. The adapter itself is a capability trait so
//! the protocol stays testable without hardware.

use crate::backend::{PrintDocument, PrinterBackend, PrinterDevice};
use crate::error::{PrintError, PrintResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Options forwarded to the BLE printer driver with every print call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlePrintOptions {
    pub beep: bool,
    pub cut: bool,
    pub tailing_line: bool,
    pub encoding: String,
    pub codepage: u8,
    pub col_width: usize,
}

impl Default for BlePrintOptions {
    fn default() -> Self {
        Self {
            beep: true,
            cut: false,
            tailing_line: true,
            encoding: "UTF-8".to_string(),
            codepage: 0,
            col_width: 32,
        }
    }
}

/// Platform Bluetooth adapter capability
///
/// The concrete implementation lives in platform glue (mobile shell);
/// this crate only defines the protocol against it.
#[async_trait]
pub trait BleAdapter: Send + Sync {
    /// Request Bluetooth scan/connect permissions from the platform.
    /// Denial is a normal, expected failure, not a crash condition.
    async fn request_permissions(&self) -> PrintResult<()>;

    /// Enumerate paired thermal printers
    async fn list_devices(&self) -> PrintResult<Vec<PrinterDevice>>;

    /// Connect to a printer by its inner MAC address
    async fn connect(&self, address: &str) -> PrintResult<()>;

    /// Stream a structured markup payload to the connected printer
    async fn write(&self, payload: &str, options: &BlePrintOptions) -> PrintResult<()>;
}

/// BLE printer backend
pub struct BlePrinterBackend {
    adapter: Box<dyn BleAdapter>,
    options: BlePrintOptions,
}

impl BlePrinterBackend {
    pub fn new(adapter: Box<dyn BleAdapter>) -> Self {
        Self {
            adapter,
            options: BlePrintOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BlePrintOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl PrinterBackend for BlePrinterBackend {
    #[instrument(skip(self))]
    async fn discover(&self) -> PrintResult<Vec<PrinterDevice>> {
        self.adapter.request_permissions().await?;

        let devices = self.adapter.list_devices().await?;
        if devices.is_empty() {
            return Err(PrintError::NoDevicesFound);
        }

        info!(count = devices.len(), "BLE printers discovered");
        Ok(devices)
    }

    #[instrument(skip(self), fields(device = %device.device_name, address = %device.address))]
    async fn connect(&self, device: &PrinterDevice) -> PrintResult<()> {
        self.adapter
            .connect(&device.address)
            .await
            .map_err(|e| PrintError::ConnectionFailed(e.to_string()))?;

        info!("connected to BLE printer");
        Ok(())
    }

    #[instrument(skip(self, doc), fields(payload_len = doc.markup.len()))]
    async fn print(&self, doc: &PrintDocument) -> PrintResult<()> {
        // The whole tagged document goes out as one structured payload;
        // the driver interprets alignment/line/feed directives itself.
        self.adapter
            .write(&doc.markup, &self.options)
            .await
            .map_err(|e| PrintError::PrintFailed(e.to_string()))?;

        info!("receipt sent to BLE printer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeAdapter {
        deny_permissions: bool,
        devices: Vec<PrinterDevice>,
        fail_connect: bool,
        fail_write: bool,
        written: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl BleAdapter for FakeAdapter {
        async fn request_permissions(&self) -> PrintResult<()> {
            if self.deny_permissions {
                Err(PrintError::PermissionDenied("BLUETOOTH_SCAN".to_string()))
            } else {
                Ok(())
            }
        }

        async fn list_devices(&self) -> PrintResult<Vec<PrinterDevice>> {
            Ok(self.devices.clone())
        }

        async fn connect(&self, _address: &str) -> PrintResult<()> {
            if self.fail_connect {
                Err(PrintError::ConnectionFailed("unreachable".to_string()))
            } else {
                Ok(())
            }
        }

        async fn write(&self, payload: &str, _options: &BlePrintOptions) -> PrintResult<()> {
            if self.fail_write {
                return Err(PrintError::PrintFailed("tx dropped".to_string()));
            }
            self.written.lock().unwrap().push(payload.to_string());
            Ok(())
        }
    }

    fn doc() -> PrintDocument {
        PrintDocument {
            markup: "<Printout>\n</Printout>".to_string(),
            plain_text: "RECEIPT".to_string(),
        }
    }

    #[tokio::test]
    async fn test_discover_empty_is_no_devices() {
        let backend = BlePrinterBackend::new(Box::new(FakeAdapter::default()));
        let result = backend.discover().await;
        assert!(matches!(result, Err(PrintError::NoDevicesFound)));
    }

    #[tokio::test]
    async fn test_discover_permission_denied() {
        let backend = BlePrinterBackend::new(Box::new(FakeAdapter {
            deny_permissions: true,
            devices: vec![PrinterDevice::new("MTP-II", "66:11:22:33:44:55")],
            ..Default::default()
        }));
        let result = backend.discover().await;
        assert!(matches!(result, Err(PrintError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn test_print_sends_markup_rendering() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let backend = BlePrinterBackend::new(Box::new(FakeAdapter {
            devices: vec![PrinterDevice::new("MTP-II", "66:11:22:33:44:55")],
            written: Arc::clone(&written),
            ..Default::default()
        }));

        let devices = backend.discover().await.unwrap();
        backend.connect(&devices[0]).await.unwrap();
        backend.print(&doc()).await.unwrap();

        let sent = written.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], doc().markup);
    }

    #[tokio::test]
    async fn test_write_failure_maps_to_print_failed() {
        let backend = BlePrinterBackend::new(Box::new(FakeAdapter {
            devices: vec![PrinterDevice::new("MTP-II", "66:11:22:33:44:55")],
            fail_write: true,
            ..Default::default()
        }));
        let result = backend.print(&doc()).await;
        assert!(matches!(result, Err(PrintError::PrintFailed(_))));
    }

    #[tokio::test]
    async fn test_connect_failure_maps_to_connection_failed() {
        let backend = BlePrinterBackend::new(Box::new(FakeAdapter {
            devices: vec![PrinterDevice::new("MTP-II", "66:11:22:33:44:55")],
            fail_connect: true,
            ..Default::default()
        }));
        let device = PrinterDevice::new("MTP-II", "66:11:22:33:44:55");
        let result = backend.connect(&device).await;
        assert!(matches!(result, Err(PrintError::ConnectionFailed(_))));
    }
}
