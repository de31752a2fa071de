//! Per-customer rollup and ledger-wide enrichment.
//!
//! RULES:
//!   - Source records are never mutated; every view is built fresh.
//!   - Output order follows input order. Sorting belongs to the
//!     presentation layer.
//!   - An orphaned transaction aggregates under nobody and enriches
//!     with `customer: None`; it is not an error.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::dataset::{Customer, Transaction};
use crate::identity::{ensure_customer_id, ensure_transaction_id};
use crate::points::calculate_points;
use crate::types::{EntityId, Points, YearMonth};
use crate::window::FilteredTransaction;

/// Points and spend accumulated inside one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    pub points: Points,
    pub amount_spent: f64,
}

/// One customer's rollup over the filtered window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub customer_id: EntityId,
    pub name: String,
    pub total_points: Points,
    pub total_amount_spent: f64,
    pub monthly_points: BTreeMap<YearMonth, MonthlyBreakdown>,
}

/// A raw transaction joined to its computed points and owning customer.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedTransaction {
    pub id: EntityId,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub amount: f64,
    pub date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub points: Points,
    /// `None` when the transaction is orphaned.
    pub customer: Option<Customer>,
}

/// Roll the filtered window up per customer, preserving customer order.
/// A customer with no matching transactions still yields a summary with
/// zero totals and an empty breakdown.
pub fn summarize(
    customers: &[Customer],
    filtered: &[FilteredTransaction],
) -> Vec<CustomerSummary> {
    customers
        .iter()
        .map(|customer| {
            // Resolve once; a synthesized id must not be re-derived.
            let customer_id = ensure_customer_id(customer);
            let mut summary = CustomerSummary {
                customer_id,
                name: customer.name.clone(),
                total_points: 0,
                total_amount_spent: 0.0,
                monthly_points: BTreeMap::new(),
            };

            for txn in filtered {
                if txn.transaction.customer_id.as_deref()
                    != Some(summary.customer_id.as_str())
                {
                    continue;
                }
                let points = calculate_points(txn.transaction.amount);
                summary.total_points += points;
                summary.total_amount_spent += txn.transaction.amount;

                let month = summary
                    .monthly_points
                    .entry(txn.year_month.clone())
                    .or_default();
                month.points += points;
                month.amount_spent += txn.transaction.amount;
            }

            summary
        })
        .collect()
}

/// Join every raw transaction (no time window) to its points and
/// customer record, preserving all original fields.
pub fn enrich_all(
    customers: &[Customer],
    transactions: &[Transaction],
) -> Vec<EnrichedTransaction> {
    let by_id: HashMap<&str, &Customer> = customers
        .iter()
        .filter_map(|c| c.id.as_deref().map(|id| (id, c)))
        .collect();

    transactions
        .iter()
        .map(|txn| EnrichedTransaction {
            id: ensure_transaction_id(txn),
            customer_id: txn.customer_id.clone(),
            amount: txn.amount,
            date: txn.date.clone(),
            extra: txn.extra.clone(),
            points: calculate_points(txn.amount),
            customer: txn
                .customer_id
                .as_deref()
                .and_then(|id| by_id.get(id))
                .map(|&c| c.clone()),
        })
        .collect()
}
