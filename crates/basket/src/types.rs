use serde::{Deserialize, Serialize};

fn default_qty() -> u32 {
    1
}

/// Ephemeral local list entry. Identity is the lower-cased name; there is no
/// server id because the list never round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub name: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: String,
}

/// Persisted cart entry as the server returns it. Identity is the
/// server-assigned id (some backend routes spell it `_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_qty")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// An unknown price renders as a dash, never as `₹0`. It still counts as 0
/// in totals.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format!("₹{p}"),
        _ => "₹-".to_string(),
    }
}
