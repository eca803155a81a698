//! Intent-based printer backend
//!
//! Delegates printing to a separate installed helper application. The
//! receipt body is wrapped in raw ESC/POS, base64-encoded and handed to
//! the helper through a fixed URI scheme. We have no visibility into the
//! helper's own success; only the URI launch can fail here.

use crate::backend::{PrintDocument, PrinterBackend, PrinterDevice, UriLauncher};
use crate::error::{PrintError, PrintResult};
use crate::escpos::EscPosBuilder;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{info, instrument};

/// URI prefix understood by the RawBT helper application
pub const RAWBT_SCHEME: &str = "rawbt:base64,";

/// Intent printer backend
pub struct IntentPrinterBackend {
    launcher: Box<dyn UriLauncher>,
    width: usize,
}

impl IntentPrinterBackend {
    /// Create a backend with the given paper width in characters
    pub fn new(launcher: Box<dyn UriLauncher>, width: usize) -> Self {
        Self { launcher, width }
    }

    /// Build the raw ESC/POS sequence for a plain-text receipt body:
    /// initialize, centered bold separator header, left-aligned body,
    /// three trailing line feeds, full cut.
    pub fn build_escpos(&self, plain_text: &str) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);
        b.center().bold().sep_double().bold_off().left();
        for line in plain_text.lines() {
            b.line(line);
        }
        b.newline().newline().newline();
        b.cut();
        b.build()
    }

    /// Frame ESC/POS bytes as a launchable URI
    pub fn build_uri(&self, escpos: &[u8]) -> String {
        format!("{}{}", RAWBT_SCHEME, STANDARD.encode(escpos))
    }
}

#[async_trait]
impl PrinterBackend for IntentPrinterBackend {
    /// No permissions and no hardware scan on this path; the helper
    /// application is the single logical device.
    async fn discover(&self) -> PrintResult<Vec<PrinterDevice>> {
        Ok(vec![PrinterDevice::new("RawBT print service", "rawbt")])
    }

    /// Nothing to hold open; the connection is established per URI launch.
    async fn connect(&self, _device: &PrinterDevice) -> PrintResult<()> {
        Ok(())
    }

    #[instrument(skip(self, doc), fields(body_len = doc.plain_text.len()))]
    async fn print(&self, doc: &PrintDocument) -> PrintResult<()> {
        let escpos = self.build_escpos(&doc.plain_text);
        let uri = self.build_uri(&escpos);

        info!(bytes = escpos.len(), "dispatching print intent");
        self.launcher
            .launch(&uri)
            .await
            .map_err(PrintError::PrintFailed)
    }
}
