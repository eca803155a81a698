//! Settlement service client
//!
//! The remote service records payments and owns the customer ledger.
//! This core treats it as a black box: one POST per settlement, no local
//! retry (at-most-once — retry is a distinct user-initiated action), and
//! the returned balance is authoritative.

use crate::config::Config;
use crate::error::{PosError, PosResult};
use crate::models::{Customer, PaymentRequest, PaymentResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument};

/// Remote collaborator the payment flow settles against
#[async_trait]
pub trait SettlementApi: Send + Sync {
    async fn fetch_customer(&self, customer_id: &str) -> PosResult<Customer>;
    async fn settle(&self, request: &PaymentRequest) -> PosResult<PaymentResult>;
}

#[derive(Debug, Deserialize)]
struct CustomerEnvelope {
    customer: Customer,
}

/// HTTP implementation against the deployed settlement backend
pub struct HttpSettlementApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSettlementApi {
    pub fn new(config: &Config) -> PosResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PosError::SettlementFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.settlement_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SettlementApi for HttpSettlementApi {
    #[instrument(skip(self))]
    async fn fetch_customer(&self, customer_id: &str) -> PosResult<Customer> {
        let url = format!("{}/api/customer/{}", self.base_url, customer_id);

        let envelope: CustomerEnvelope = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PosError::SettlementFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| PosError::SettlementFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| PosError::SettlementFailed(e.to_string()))?;

        Ok(envelope.customer)
    }

    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    async fn settle(&self, request: &PaymentRequest) -> PosResult<PaymentResult> {
        let url = format!("{}/api/receipt", self.base_url);

        let result: PaymentResult = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| PosError::SettlementFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| PosError::SettlementFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| PosError::SettlementFailed(e.to_string()))?;

        info!(new_balance = %result.new_balance, "payment settled");
        Ok(result)
    }
}
