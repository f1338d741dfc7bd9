//! Frontend Models
//!
//! Data structures matching the remote object store's records.

use serde::{Deserialize, Serialize};

/// Perishable inventory item.
///
/// `date_added`, `days_until_expiration` and `out_of_date` are derived by the
/// backend pipeline after a write; they are never sent by the client and only
/// show up on a later read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FridgeItem {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    pub date_added: Option<String>,
    pub use_by: Option<String>,
    pub days_until_expiration: Option<i32>,
    pub out_of_date: Option<bool>,
}

/// Recipe record.
///
/// `ingredients` and `procedure` have been stored inconsistently across
/// backend versions (JSON array string, bracket-quoted list, plain text), so
/// they are kept as raw strings here and run through `parse` for display.
/// `cleaned_ingredients` is backend-derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: Option<String>,
    #[serde(alias = "link_")]
    pub link: Option<String>,
    pub ingredients: Option<String>,
    pub cleaned_ingredients: Option<String>,
    pub procedure: Option<String>,
}

/// One entry of a recommendation run, as returned by the external
/// recommendation service and as persisted in the local cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestion {
    pub name: String,
    pub ingredients_text: String,
    pub shopping_list_text: String,
    pub procedures_serialized: String,
    pub link: Option<String>,
}

/// Expiry bucket of a fridge item, derived from `days_until_expiration`.
///
/// Variant order is the sort priority: expired items first, then near-expiry,
/// then everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExpiryStatus {
    Expired,
    NearExpiry,
    Good,
}

impl ExpiryStatus {
    pub fn of(days_until_expiration: Option<i32>) -> Self {
        match days_until_expiration {
            Some(d) if d < 0 => ExpiryStatus::Expired,
            Some(d) if d <= 2 => ExpiryStatus::NearExpiry,
            _ => ExpiryStatus::Good,
        }
    }

    /// CSS class used by the item cards.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::NearExpiry => "near-expiry",
            ExpiryStatus::Good => "good",
        }
    }
}

impl FridgeItem {
    pub fn expiry_status(&self) -> ExpiryStatus {
        ExpiryStatus::of(self.days_until_expiration)
    }
}
