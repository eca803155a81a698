//! # netplus-core
//!
//! Receipt generation and dispatch core for the Net+ collection app.
//!
//! Given a completed payment, this crate renders a deterministic receipt
//! and delivers it through one of several output channels: a BLE thermal
//! printer, an intent-based helper application, or chat/SMS deep links.
//!
//! ## Scope
//!
//! This crate handles WHAT happens around a payment:
//! - Domain models (customer, payment request/result, receipt)
//! - Receipt formatting (markup + plain-text renderings)
//! - Deep-link building for chat and SMS sharing
//! - The print session state machine over a [`netplus_printer::PrinterBackend`]
//! - The payment flow state machine (validate → confirm → settle → receipt)
//! - The settlement service HTTP client
//!
//! Presentation (screens, buttons, navigation) sits above this crate and
//! only calls the operations each state exposes. Payment authorization and
//! persistence stay on the remote settlement service.

pub mod config;
pub mod error;
pub mod flow;
pub mod links;
pub mod models;
pub mod profile;
pub mod receipt;
pub mod session;
pub mod settlement;

// Re-exports
pub use config::Config;
pub use error::{PosError, PosResult};
pub use flow::{FlowState, PaymentFlowController, UserDecision};
pub use links::LinkBuilder;
pub use models::{
    Customer, IssuerProfile, PaymentMethod, PaymentRequest, PaymentResult, Receipt,
};
pub use profile::{issuer_profile, MemoryProfileStore, ProfileStore};
pub use receipt::format_receipt;
pub use session::{PrintSessionController, SessionState};
pub use settlement::{HttpSettlementApi, SettlementApi};
