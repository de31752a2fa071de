//! Identity normalization — every customer and transaction gets a
//! stable, non-empty string id, synthesized when the stored record
//! lacks one.
//!
//! Synthesis is random: two calls on an id-less record diverge. Callers
//! resolve an id once per materialized view and reuse the value.

use uuid::Uuid;

use crate::dataset::{Customer, Transaction};
use crate::types::EntityId;

fn ensure_id(id: Option<&str>) -> EntityId {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

pub fn ensure_customer_id(customer: &Customer) -> EntityId {
    ensure_id(customer.id.as_deref())
}

pub fn ensure_transaction_id(transaction: &Transaction) -> EntityId {
    ensure_id(transaction.id.as_deref())
}
