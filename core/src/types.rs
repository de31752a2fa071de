//! Shared primitive types used across the rewards pipeline.

/// A stable, unique identifier for a customer or transaction.
pub type EntityId = String;

/// A UTC calendar bucket label, formatted `YYYY-MM`.
pub type YearMonth = String;

/// Reward points. Always a non-negative integer.
pub type Points = u64;
