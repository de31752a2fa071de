//! The read operations exposed to the transport layer.

use serde::Serialize;

use crate::aggregate::{self, CustomerSummary, EnrichedTransaction};
use crate::clock::{Clock, SystemClock};
use crate::error::{RewardsError, RewardsResult};
use crate::identity::{ensure_customer_id, ensure_transaction_id};
use crate::points::calculate_points;
use crate::store::DataStore;
use crate::types::{EntityId, Points};
use crate::window::{self, DEFAULT_LOOKBACK_MONTHS};

/// One row of a customer's windowed transaction history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub transaction_id: EntityId,
    pub amount: f64,
    pub date: String,
    pub points: Points,
}

/// A single customer's identity plus their windowed history, in ledger
/// order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    pub customer_id: EntityId,
    pub customer_name: String,
    pub transactions: Vec<TransactionDetail>,
}

/// The query façade. Owns the dataset cache and the clock; every
/// operation reads through the cache, so edits to the backing store
/// show up on the next request.
pub struct RewardsService {
    store: DataStore,
    clock: Box<dyn Clock>,
}

impl RewardsService {
    pub fn new(store: DataStore) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    /// Pin "now" — used by tests and replay tooling.
    pub fn with_clock(store: DataStore, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Reward summaries for every customer over the trailing window.
    /// Fails only when the backing store does.
    pub fn customer_points(
        &self,
        months_back: Option<u32>,
    ) -> RewardsResult<Vec<CustomerSummary>> {
        let data = self.store.load()?;
        let recent = window::filter_recent(
            &data.transactions,
            months_back.unwrap_or(DEFAULT_LOOKBACK_MONTHS),
            self.clock.now_utc(),
        );
        Ok(aggregate::summarize(&data.customers, &recent))
    }

    /// Windowed transaction history for one customer.
    ///
    /// Existence is checked against the full customer collection by
    /// stored id; only the returned transactions are windowed.
    pub fn customer_transactions(
        &self,
        customer_id: &str,
        months_back: Option<u32>,
    ) -> RewardsResult<CustomerDetail> {
        let data = self.store.load()?;

        let customer = data
            .customers
            .iter()
            .find(|c| c.id.as_deref() == Some(customer_id))
            .ok_or_else(|| RewardsError::CustomerNotFound {
                customer_id: customer_id.to_string(),
            })?;

        let recent = window::filter_recent(
            &data.transactions,
            months_back.unwrap_or(DEFAULT_LOOKBACK_MONTHS),
            self.clock.now_utc(),
        );

        let transactions = recent
            .into_iter()
            .filter(|t| t.transaction.customer_id.as_deref() == Some(customer_id))
            .map(|t| TransactionDetail {
                transaction_id: ensure_transaction_id(&t.transaction),
                amount: t.transaction.amount,
                date: t.transaction.date,
                points: calculate_points(t.transaction.amount),
            })
            .collect();

        Ok(CustomerDetail {
            customer_id: ensure_customer_id(customer),
            customer_name: customer.name.clone(),
            transactions,
        })
    }

    /// Every transaction in the ledger, enriched, no time window.
    pub fn all_transactions(&self) -> RewardsResult<Vec<EnrichedTransaction>> {
        let data = self.store.load()?;
        Ok(aggregate::enrich_all(&data.customers, &data.transactions))
    }
}
