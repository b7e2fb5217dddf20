//! Structural classification of apply responses.
//!
//! The backend returns an untagged union: an array of item-like objects,
//! `{removed: item}`, `{cleared: true}`, `{undone: item}`, small action
//! objects, or a bare item. There is no discriminant field, so the shape is
//! probed in a fixed order and converted to tagged [`ListOp`]s here, at the
//! boundary. Nothing downstream ever sees the untagged value.

use serde_json::Value;
use tracing::{debug, warn};

/// Lenient item fields pulled out of a backend object. Quantity falls back
/// across both spellings, then to 1; a missing price stays unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPatch {
    pub name: String,
    pub qty: u32,
    pub price: Option<f64>,
    pub category: String,
}

impl ItemPatch {
    fn from_value(v: &Value) -> Option<Self> {
        let obj = v.as_object()?;
        let name = obj.get("name").and_then(Value::as_str)?;
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            qty: qty_field(v).unwrap_or(1),
            price: obj.get("price").and_then(Value::as_f64),
            category: obj
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// One reconciler mutation, applied in classified order.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOp {
    Upsert(ItemPatch),
    Remove(String),
    SetQty(String, i64),
    Clear,
}

fn qty_field(v: &Value) -> Option<u32> {
    let raw = v.get("quantity").or_else(|| v.get("qty"))?;
    raw.as_u64()
        .or_else(|| raw.as_f64().map(|f| f.max(0.0) as u64))
        .map(|q| q.min(u32::MAX as u64) as u32)
}

fn qty_signed(v: &Value) -> Option<i64> {
    let raw = v.get("quantity").or_else(|| v.get("qty"))?;
    raw.as_i64().or_else(|| raw.as_f64().map(|f| f as i64))
}

fn name_of(v: &Value) -> Option<&str> {
    v.get("name").and_then(Value::as_str).filter(|n| !n.is_empty())
}

/// Classify a raw apply response into ordered reconciler ops.
///
/// Top-level probing order: array → `removed` → `cleared` → `undone` → treat
/// the whole response as a single element. Array elements are classified
/// individually, in received order.
pub fn classify_response(raw: &Value) -> Vec<ListOp> {
    if let Some(items) = raw.as_array() {
        return items.iter().flat_map(classify_element).collect();
    }

    if let Some(obj) = raw.as_object() {
        if let Some(removed) = obj.get("removed") {
            return match name_of(removed) {
                Some(name) => vec![ListOp::Remove(name.to_string())],
                None => {
                    warn!(shape = %raw, "removed payload without a name");
                    vec![]
                }
            };
        }

        // Presence of the key is the signal; the backend sends `true` but
        // the contract only promises the key exists.
        if obj.contains_key("cleared") {
            return vec![ListOp::Clear];
        }

        if let Some(undone) = obj.get("undone") {
            return match name_of(undone) {
                Some(name) => vec![ListOp::Remove(name.to_string())],
                None => {
                    debug!(shape = %raw, "undone payload not item-shaped, ignoring");
                    vec![]
                }
            };
        }
    }

    classify_element(raw)
}

fn classify_element(v: &Value) -> Vec<ListOp> {
    let Some(obj) = v.as_object() else {
        warn!(shape = %v, "unclassified apply response element");
        return vec![];
    };

    if let Some(action) = obj.get("action").and_then(Value::as_str) {
        return match (action, name_of(v)) {
            ("add", Some(name)) => vec![ListOp::Upsert(ItemPatch {
                name: name.to_string(),
                qty: qty_field(v).unwrap_or(1),
                price: obj.get("price").and_then(Value::as_f64),
                category: String::new(),
            })],
            ("remove", Some(name)) => vec![ListOp::Remove(name.to_string())],
            ("update_qty", Some(name)) => match qty_signed(v) {
                Some(qty) => vec![ListOp::SetQty(name.to_string(), qty)],
                None => {
                    warn!(shape = %v, "update_qty without a quantity");
                    vec![]
                }
            },
            _ => {
                warn!(shape = %v, "unclassified action object");
                vec![]
            }
        };
    }

    if obj.get("type").and_then(Value::as_str) == Some("clear") {
        return vec![ListOp::Clear];
    }

    match ItemPatch::from_value(v) {
        Some(patch) => vec![ListOp::Upsert(patch)],
        None => {
            warn!(shape = %v, "unclassified apply response element");
            vec![]
        }
    }
}
