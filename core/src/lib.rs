//! Loyalty rewards core — windows, scores, and rolls up a purchase
//! ledger per customer and per calendar month.
//!
//! PIPELINE (fixed order):
//!   store (load + cache) → identity → window filter → points → rollup
//!
//! RULES:
//!   - Only store.rs touches the backing store.
//!   - Source records are never mutated; every view is derived fresh.
//!   - One bad transaction date drops that record, never the request.

pub mod aggregate;
pub mod clock;
pub mod dataset;
pub mod error;
pub mod identity;
pub mod points;
pub mod service;
pub mod store;
pub mod types;
pub mod window;
