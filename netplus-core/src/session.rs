//! Print session state machine
//!
//! One session drives exactly one printer backend, selected when the
//! session is created. Every operation checks the current state first and
//! fails with `InvalidState` instead of reaching the backend, so illegal
//! transitions cannot happen by construction. Because operations take
//! `&mut self`, two overlapping calls of the same kind cannot be issued,
//! and a result can never land on a dismissed session: the exclusive
//! borrow serializes everything without locks.

use crate::error::{PosError, PosResult};
use crate::models::Receipt;
use netplus_printer::{PrinterBackend, PrinterDevice};
use tracing::{info, instrument, warn};

/// Session states. `Discovering`, `Connecting` and `Printing` are held
/// across the corresponding await; observers polling between operations
/// see the settled states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Discovering,
    AwaitingSelection,
    Connecting,
    Connected,
    Printing,
}

/// Orchestrates backend selection, connection lifecycle and printing
pub struct PrintSessionController {
    backend: Box<dyn PrinterBackend>,
    state: SessionState,
    devices: Vec<PrinterDevice>,
    bound: Option<PrinterDevice>,
}

impl PrintSessionController {
    /// Bind a session to one backend for its whole lifetime. Switching
    /// backends means starting a new session.
    pub fn new(backend: Box<dyn PrinterBackend>) -> Self {
        Self {
            backend,
            state: SessionState::Idle,
            devices: Vec::new(),
            bound: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Devices found by the last discovery
    pub fn devices(&self) -> &[PrinterDevice] {
        &self.devices
    }

    /// The device this session is connected to, if any
    pub fn bound_device(&self) -> Option<&PrinterDevice> {
        self.bound.as_ref()
    }

    /// Request permissions and enumerate devices. Legal from `Idle`; on
    /// success the session waits in `AwaitingSelection` for `select`.
    #[instrument(skip(self))]
    pub async fn discover(&mut self) -> PosResult<&[PrinterDevice]> {
        if self.state != SessionState::Idle {
            return Err(PosError::InvalidState("discover is only legal from Idle"));
        }

        self.state = SessionState::Discovering;
        match self.backend.discover().await {
            Ok(devices) if devices.is_empty() => {
                warn!("discovery returned no devices");
                self.state = SessionState::Idle;
                Err(PosError::NoDevicesFound)
            }
            Ok(devices) => {
                info!(count = devices.len(), "printers discovered");
                self.devices = devices;
                self.state = SessionState::AwaitingSelection;
                Ok(&self.devices)
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e.into())
            }
        }
    }

    /// Connect to one of the discovered devices. On failure the selection
    /// is discarded and the caller must re-discover; there is no automatic
    /// retry.
    #[instrument(skip(self), fields(device = %device.device_name))]
    pub async fn select(&mut self, device: PrinterDevice) -> PosResult<()> {
        if self.state != SessionState::AwaitingSelection {
            return Err(PosError::InvalidState(
                "select is only legal while awaiting selection",
            ));
        }

        self.state = SessionState::Connecting;
        match self.backend.connect(&device).await {
            Ok(()) => {
                info!("printer connected");
                self.bound = Some(device);
                self.state = SessionState::Connected;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "connection failed");
                self.devices.clear();
                self.bound = None;
                self.state = SessionState::Idle;
                Err(PosError::ConnectionFailed(e.to_string()))
            }
        }
    }

    /// Stream a receipt to the bound device. Legal only from `Connected`.
    /// A failed print leaves the session `Connected` so the exact same
    /// step can be retried without re-discovery.
    #[instrument(skip(self, receipt))]
    pub async fn print(&mut self, receipt: &Receipt) -> PosResult<()> {
        if self.state != SessionState::Connected {
            return Err(PosError::InvalidState("print is only legal when connected"));
        }

        self.state = SessionState::Printing;
        let result = self.backend.print(&receipt.to_document()).await;
        self.state = SessionState::Connected;

        match result {
            Ok(()) => {
                info!("receipt printed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "print failed, printer stays connected");
                Err(PosError::PrintFailed(e.to_string()))
            }
        }
    }

    /// Drop interest in this session from any state. The bound device and
    /// device list are discarded; in-flight device I/O is not aborted, its
    /// late completion simply has nowhere to land.
    pub fn dismiss(&mut self) {
        self.devices.clear();
        self.bound = None;
        self.state = SessionState::Idle;
    }
}
