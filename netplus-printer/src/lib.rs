//! # netplus-printer
//!
//! Receipt printing library - low-level output channels only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - The tagged receipt-markup dialect for BLE thermal printers
//! - The BLE printer backend (permissions, discovery, connect, stream)
//! - The intent backend (base64 ESC/POS handed to a helper app via URI)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Receipt rendering and payment flow → netplus-core
//!
//! ## Example
//!
//! ```ignore
//! use netplus_printer::{EscPosBuilder, IntentPrinterBackend, PrinterBackend};
//!
//! let backend = IntentPrinterBackend::new(Box::new(launcher), 32);
//! let devices = backend.discover().await?;
//! backend.connect(&devices[0]).await?;
//! backend.print(&document).await?;
//! ```

mod backend;
mod ble;
mod error;
mod escpos;
mod intent;
mod markup;

// Re-exports
pub use backend::{PrintDocument, PrinterBackend, PrinterDevice, UriLauncher};
pub use ble::{BleAdapter, BlePrintOptions, BlePrinterBackend};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use intent::{IntentPrinterBackend, RAWBT_SCHEME};
pub use markup::MarkupBuilder;
