//! The raw `{customers, transactions}` record set as stored.
//!
//! Identifiers in the source document may arrive as JSON strings or
//! numbers; both deserialize to their canonical string form, so every
//! later comparison is plain string equality.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Stored identifier, canonicalized. `None` when the record carries
    /// no usable id; the identity normalizer synthesizes one downstream.
    #[serde(default, deserialize_with = "canonical_id_opt")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "canonical_id_opt")]
    pub id: Option<String>,
    /// Foreign key to `Customer.id`. Not required to resolve — an
    /// orphaned transaction flows through the pipeline unmatched.
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "canonical_id_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_id: Option<String>,
    /// A record with no amount earns nothing rather than failing the
    /// load; only a missing collection is malformed.
    #[serde(default)]
    pub amount: f64,
    /// Raw date string. Parsed (and possibly dropped) by the window
    /// filter, never rejected at load time.
    #[serde(default)]
    pub date: String,
    /// Any additional fields of the source record, carried through so
    /// enriched views keep the original shape.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The whole dataset. Always loaded and replaced as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
}

fn canonical_id_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(canonical_string))
}

/// String ids pass through; numeric ids become their decimal form.
/// Anything else counts as missing.
fn canonical_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
