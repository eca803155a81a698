//! Payment flow state machine
//!
//! Drives one customer interaction end to end: amount validation, an
//! explicit confirmation gate, a single at-most-once settlement call, and
//! receipt generation. Settlement failure lands back in `Editing` with no
//! receipt produced; retry is a fresh user-initiated confirmation, never
//! an automatic re-issue (duplicate charges on transient failures are the
//! thing this machine exists to prevent).

use crate::error::{PosError, PosResult};
use crate::links::LinkBuilder;
use crate::models::{Customer, PaymentMethod, PaymentRequest, Receipt};
use crate::profile::{issuer_profile, ProfileStore};
use crate::receipt::format_receipt;
use crate::settlement::SettlementApi;
use netplus_printer::UriLauncher;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

/// Outcome of the blocking yes/no confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDecision {
    Confirm,
    Cancel,
}

/// Flow states. `Settling` is only reachable through an explicit
/// `UserDecision::Confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Editing,
    Confirming,
    Settling,
    ReceiptReady,
    Done,
}

/// End-to-end payment flow controller
pub struct PaymentFlowController {
    api: Box<dyn SettlementApi>,
    profiles: Box<dyn ProfileStore>,
    links: LinkBuilder,
    state: FlowState,
    customer: Option<Customer>,
    pending: Option<PaymentRequest>,
    receipt: Option<Receipt>,
}

impl PaymentFlowController {
    pub fn new(
        api: Box<dyn SettlementApi>,
        profiles: Box<dyn ProfileStore>,
        links: LinkBuilder,
    ) -> Self {
        Self {
            api,
            profiles,
            links,
            state: FlowState::Editing,
            customer: None,
            pending: None,
            receipt: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// The receipt, once settlement succeeded
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// Load the customer this flow collects for
    #[instrument(skip(self))]
    pub async fn load_customer(&mut self, customer_id: &str) -> PosResult<&Customer> {
        let customer = self.api.fetch_customer(customer_id).await?;
        info!(name = %customer.name, "customer loaded");
        Ok(self.customer.insert(customer))
    }

    /// Parse amount text as a positive decimal
    pub fn validate(amount_text: &str) -> PosResult<Decimal> {
        let trimmed = amount_text.trim();
        let amount: Decimal = trimmed
            .parse()
            .map_err(|_| PosError::InvalidAmount(trimmed.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(PosError::InvalidAmount(trimmed.to_string()));
        }
        Ok(amount)
    }

    /// Validate the entered amount and move to the confirmation gate.
    /// Returns the prompt the presentation layer shows.
    pub fn begin_confirmation(
        &mut self,
        amount_text: &str,
        method: PaymentMethod,
    ) -> PosResult<String> {
        if self.state != FlowState::Editing {
            return Err(PosError::InvalidState(
                "confirmation can only start while editing",
            ));
        }
        let customer = self
            .customer
            .as_ref()
            .ok_or(PosError::InvalidState("no customer loaded"))?;

        let amount = Self::validate(amount_text)?;
        self.pending = Some(PaymentRequest {
            customer_id: customer.id.clone(),
            amount_paid: amount,
            payment_method: method,
        });
        self.state = FlowState::Confirming;
        Ok(format!("Pay ₹{} via {}?", amount_text.trim(), method))
    }

    /// Resolve the confirmation gate. `Cancel` returns to `Editing` with
    /// no side effect; no settlement call happens without `Confirm`.
    pub fn resolve_confirmation(&mut self, decision: UserDecision) -> PosResult<()> {
        if self.state != FlowState::Confirming {
            return Err(PosError::InvalidState("nothing awaiting confirmation"));
        }
        match decision {
            UserDecision::Confirm => {
                self.state = FlowState::Settling;
            }
            UserDecision::Cancel => {
                self.pending = None;
                self.state = FlowState::Editing;
            }
        }
        Ok(())
    }

    /// Issue the single settlement call and build the receipt.
    ///
    /// At-most-once: on any failure the pending request is discarded and
    /// the flow returns to `Editing`; the remote balance is unchanged and
    /// no receipt exists.
    #[instrument(skip(self))]
    pub async fn settle(&mut self) -> PosResult<&Receipt> {
        if self.state != FlowState::Settling {
            return Err(PosError::InvalidState("settlement was not confirmed"));
        }
        let request = self
            .pending
            .take()
            .ok_or(PosError::InvalidState("no pending payment"))?;
        let customer = self
            .customer
            .as_ref()
            .ok_or(PosError::InvalidState("no customer loaded"))?;

        let result = match self.api.settle(&request).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "settlement failed, returning to editing");
                self.state = FlowState::Editing;
                return Err(e);
            }
        };

        let issuer = issuer_profile(self.profiles.as_ref());
        let receipt = format_receipt(customer, &request, &result, &issuer)?;

        info!(new_balance = %result.new_balance, "receipt ready");
        self.state = FlowState::ReceiptReady;
        Ok(self.receipt.insert(receipt))
    }

    /// WhatsApp deep link for the current receipt
    pub fn chat_link(&self) -> PosResult<String> {
        let (customer, receipt) = self.sharable()?;
        self.links.chat_link(&customer.mobile, &receipt.plain_text)
    }

    /// SMS deep link for the current receipt
    pub fn sms_link(&self) -> PosResult<String> {
        let (customer, receipt) = self.sharable()?;
        self.links.sms_link(&customer.mobile, &receipt.plain_text)
    }

    /// Open the chat link through the platform
    pub async fn open_chat(&self, launcher: &dyn UriLauncher) -> PosResult<()> {
        let uri = self.chat_link()?;
        launcher.launch(&uri).await.map_err(PosError::LinkOpenFailed)
    }

    /// Open the SMS link through the platform
    pub async fn open_sms(&self, launcher: &dyn UriLauncher) -> PosResult<()> {
        let uri = self.sms_link()?;
        launcher.launch(&uri).await.map_err(PosError::LinkOpenFailed)
    }

    /// Close out a completed flow
    pub fn finish(&mut self) -> PosResult<()> {
        if self.state != FlowState::ReceiptReady {
            return Err(PosError::InvalidState("no receipt to finish with"));
        }
        self.state = FlowState::Done;
        Ok(())
    }

    fn sharable(&self) -> PosResult<(&Customer, &Receipt)> {
        if self.state != FlowState::ReceiptReady {
            return Err(PosError::InvalidState("no receipt is ready"));
        }
        let customer = self
            .customer
            .as_ref()
            .ok_or(PosError::InvalidState("no customer loaded"))?;
        let receipt = self
            .receipt
            .as_ref()
            .ok_or(PosError::InvalidState("no receipt is ready"))?;
        Ok((customer, receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentResult;
    use crate::profile::MemoryProfileStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeSettlement {
        fail_settle: bool,
        settle_calls: Arc<AtomicUsize>,
    }

    impl FakeSettlement {
        fn new() -> Self {
            Self {
                fail_settle: false,
                settle_calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                fail_settle: true,
                settle_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl SettlementApi for FakeSettlement {
        async fn fetch_customer(&self, customer_id: &str) -> PosResult<Customer> {
            Ok(Customer {
                id: customer_id.to_string(),
                name: "Asha Verma".to_string(),
                mobile: "9876543210".to_string(),
                address: "12 MG Road".to_string(),
                box_numbers: vec!["A1".to_string(), "B2".to_string()],
                previous_balance: Decimal::new(1250, 0),
                current_month_payment: Decimal::ZERO,
            })
        }

        async fn settle(&self, _request: &PaymentRequest) -> PosResult<PaymentResult> {
            self.settle_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_settle {
                return Err(PosError::SettlementFailed("connection reset".to_string()));
            }
            Ok(PaymentResult {
                new_balance: Decimal::new(1000, 0),
                date: "01-01-2024".to_string(),
                time: "10:00".to_string(),
            })
        }
    }

    fn controller(api: FakeSettlement) -> PaymentFlowController {
        PaymentFlowController::new(
            Box::new(api),
            Box::new(MemoryProfileStore::new()),
            LinkBuilder::new("91"),
        )
    }

    #[test]
    fn test_validate_accepts_positive_decimals() {
        assert_eq!(
            PaymentFlowController::validate("250").unwrap(),
            Decimal::new(250, 0)
        );
        assert_eq!(
            PaymentFlowController::validate(" 5.50 ").unwrap(),
            Decimal::new(550, 2)
        );
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        for text in ["0", "-10", "abc", "", "1.2.3"] {
            let result = PaymentFlowController::validate(text);
            assert!(
                matches!(result, Err(PosError::InvalidAmount(_))),
                "expected InvalidAmount for {:?}",
                text
            );
        }
    }

    #[tokio::test]
    async fn test_full_flow_to_receipt() {
        let mut flow = controller(FakeSettlement::new());
        flow.load_customer("c1").await.unwrap();

        let prompt = flow
            .begin_confirmation("250", PaymentMethod::Cash)
            .unwrap();
        assert_eq!(prompt, "Pay ₹250 via Cash?");
        assert_eq!(flow.state(), FlowState::Confirming);

        flow.resolve_confirmation(UserDecision::Confirm).unwrap();
        let receipt = flow.settle().await.unwrap();
        assert!(receipt.plain_text.contains("Amount Paid : ₹250.00"));
        assert!(receipt.plain_text.contains("Current Outstanding : ₹1000.00"));
        assert_eq!(flow.state(), FlowState::ReceiptReady);
    }

    #[tokio::test]
    async fn test_cancel_makes_no_settlement_call() {
        let api = FakeSettlement::new();
        let calls = Arc::clone(&api.settle_calls);
        let mut flow = controller(api);
        flow.load_customer("c1").await.unwrap();

        flow.begin_confirmation("250", PaymentMethod::GPay).unwrap();
        flow.resolve_confirmation(UserDecision::Cancel).unwrap();

        assert_eq!(flow.state(), FlowState::Editing);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(matches!(
            flow.settle().await,
            Err(PosError::InvalidState(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_settlement_failure_returns_to_editing_without_receipt() {
        let api = FakeSettlement::failing();
        let calls = Arc::clone(&api.settle_calls);
        let mut flow = controller(api);
        flow.load_customer("c1").await.unwrap();

        flow.begin_confirmation("250", PaymentMethod::Cash).unwrap();
        flow.resolve_confirmation(UserDecision::Confirm).unwrap();

        let result = flow.settle().await;
        assert!(matches!(result, Err(PosError::SettlementFailed(_))));
        assert_eq!(flow.state(), FlowState::Editing);
        assert!(flow.receipt().is_none());
        // At-most-once: the failed call is not re-issued automatically
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            flow.settle().await,
            Err(PosError::InvalidState(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_amount_blocks_confirmation() {
        let mut flow = controller(FakeSettlement::new());
        flow.load_customer("c1").await.unwrap();

        let result = flow.begin_confirmation("-5", PaymentMethod::Cash);
        assert!(matches!(result, Err(PosError::InvalidAmount(_))));
        assert_eq!(flow.state(), FlowState::Editing);
    }

    #[tokio::test]
    async fn test_share_links_from_receipt_ready() {
        let mut flow = controller(FakeSettlement::new());
        flow.load_customer("c1").await.unwrap();
        flow.begin_confirmation("250", PaymentMethod::Cash).unwrap();
        flow.resolve_confirmation(UserDecision::Confirm).unwrap();
        flow.settle().await.unwrap();

        let chat = flow.chat_link().unwrap();
        assert!(chat.starts_with("https://wa.me/919876543210?text="));
        let sms = flow.sms_link().unwrap();
        assert!(sms.starts_with("sms:919876543210?body="));

        // Independent, repeatable, non-exclusive
        assert_eq!(flow.chat_link().unwrap(), chat);
        assert_eq!(flow.state(), FlowState::ReceiptReady);
    }

    #[tokio::test]
    async fn test_links_before_receipt_fail() {
        let mut flow = controller(FakeSettlement::new());
        flow.load_customer("c1").await.unwrap();
        assert!(matches!(
            flow.chat_link(),
            Err(PosError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_finish_closes_the_flow() {
        let mut flow = controller(FakeSettlement::new());
        flow.load_customer("c1").await.unwrap();
        flow.begin_confirmation("250", PaymentMethod::Cash).unwrap();
        flow.resolve_confirmation(UserDecision::Confirm).unwrap();
        flow.settle().await.unwrap();

        flow.finish().unwrap();
        assert_eq!(flow.state(), FlowState::Done);
    }
}
