use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Classified user goal from parsed speech. The set is open-ended: the
/// backend may introduce intents this client has never seen, and they must
/// survive a round-trip unmodified.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum Intent {
    #[strum(serialize = "add_item")]
    AddItem,
    #[strum(serialize = "remove_item")]
    RemoveItem,
    #[strum(serialize = "update_quantity")]
    UpdateQuantity,
    #[strum(serialize = "unknown")]
    Unknown,
    #[strum(default)]
    Other(String),
}

impl Serialize for Intent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // infallible: the default arm absorbs every unknown string
        Ok(s.parse().unwrap_or(Intent::Other(s)))
    }
}

impl Default for Intent {
    fn default() -> Self {
        Intent::Unknown
    }
}

/// Accepts a string or a number; anything else is treated as absent. The
/// backend is not consistent about which it sends for ids and quantities.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub quantity: Option<String>,
}

/// Raw match element as the parse endpoint returns it: every field may arrive
/// under either of two names. Only [`ProductMatch`] leaves this module.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatchWire {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, rename = "productId", deserialize_with = "lenient_string")]
    product_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    product: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    manufacturer: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    cat: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default, rename = "pricePerUnit")]
    price_per_unit: Option<f64>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    similarity: Option<f64>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Normalized candidate product. Produced from [`MatchWire`] on parse
/// ingestion; the alias precedence mirrors the backend contract
/// (`id` over `productId`, `name` over `product`, and so on) and is applied
/// unconditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub score: f64,
}

impl From<MatchWire> for ProductMatch {
    fn from(w: MatchWire) -> Self {
        Self {
            id: w.id.or(w.product_id),
            name: non_empty(w.name).or(non_empty(w.product)).unwrap_or_default(),
            brand: non_empty(w.brand).or(non_empty(w.manufacturer)),
            category: non_empty(w.category).or(non_empty(w.cat)),
            price: w.price.or(w.price_per_unit),
            score: w.score.or(w.similarity).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ParseRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ParseResponseWire {
    #[serde(default)]
    intent: Intent,
    #[serde(default, rename = "intentScore")]
    intent_score: f64,
    #[serde(default)]
    entities: Entities,
    #[serde(default)]
    matches: Vec<MatchWire>,
}

/// Structured parse result, owned by the command processor until applied or
/// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub intent: Intent,
    #[serde(rename = "intentScore", default)]
    pub intent_score: f64,
    #[serde(default)]
    pub entities: Entities,
    #[serde(default)]
    pub matches: Vec<ProductMatch>,
}

impl From<ParseResponseWire> for ParsedIntent {
    fn from(w: ParseResponseWire) -> Self {
        Self {
            intent: w.intent,
            intent_score: w.intent_score,
            entities: w.entities,
            matches: w.matches.into_iter().map(ProductMatch::from).collect(),
        }
    }
}

/// Minimal body for the apply endpoint: intent, entities, and either the one
/// match the user chose or the full normalized list, re-serialized to the
/// wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyRequest {
    pub intent: Intent,
    pub entities: Entities,
    pub matches: Vec<ProductMatch>,
}

impl ApplyRequest {
    pub fn new(parsed: &ParsedIntent, chosen: Option<&ProductMatch>) -> Self {
        let matches = match chosen {
            Some(m) => vec![m.clone()],
            None => parsed.matches.clone(),
        };
        Self {
            intent: parsed.intent.clone(),
            entities: parsed.entities.clone(),
            matches,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CartEnvelope {
    #[serde(default)]
    pub items: Vec<vc_basket::CartItem>,
}

/// Payload for adding a catalog product to the cart. The server assigns the
/// cart-row id.
#[derive(Debug, Clone, Serialize)]
pub struct NewCartItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id", deserialize_with = "lenient_string", default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_normalization_prefers_canonical_spellings() {
        let wire: MatchWire = serde_json::from_value(json!({
            "id": "a1", "productId": "b2",
            "name": "Milk", "product": "Ignored",
            "brand": "Amul", "manufacturer": "Ignored",
            "category": "dairy", "cat": "ignored",
            "price": 52, "pricePerUnit": 99,
            "score": 0.8, "similarity": 0.1
        }))
        .unwrap();
        let m = ProductMatch::from(wire);
        assert_eq!(m.id.as_deref(), Some("a1"));
        assert_eq!(m.name, "Milk");
        assert_eq!(m.brand.as_deref(), Some("Amul"));
        assert_eq!(m.category.as_deref(), Some("dairy"));
        assert_eq!(m.price, Some(52.0));
        assert_eq!(m.score, 0.8);
    }

    #[test]
    fn match_normalization_falls_back_to_alternate_spellings() {
        let wire: MatchWire = serde_json::from_value(json!({
            "productId": "p9",
            "product": "Chips",
            "pricePerUnit": 20,
            "similarity": 0.9
        }))
        .unwrap();
        let m = ProductMatch::from(wire);
        assert_eq!(m.id.as_deref(), Some("p9"));
        assert_eq!(m.name, "Chips");
        assert_eq!(m.brand, None);
        assert_eq!(m.category, None);
        assert_eq!(m.price, Some(20.0));
        assert_eq!(m.score, 0.9);
    }

    #[test]
    fn empty_name_falls_through_to_product() {
        let wire: MatchWire =
            serde_json::from_value(json!({"name": "", "product": "Bread"})).unwrap();
        let m = ProductMatch::from(wire);
        assert_eq!(m.name, "Bread");
    }

    #[test]
    fn zero_price_is_kept_not_defaulted() {
        // `price ?? pricePerUnit` semantics: 0 is a real price.
        let wire: MatchWire =
            serde_json::from_value(json!({"name": "Promo", "price": 0, "pricePerUnit": 30}))
                .unwrap();
        assert_eq!(ProductMatch::from(wire).price, Some(0.0));
    }

    #[test]
    fn missing_everything_defaults_defensively() {
        let wire: MatchWire = serde_json::from_value(json!({})).unwrap();
        let m = ProductMatch::from(wire);
        assert_eq!(m.id, None);
        assert_eq!(m.name, "");
        assert_eq!(m.price, None);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let wire: MatchWire =
            serde_json::from_value(json!({"productId": 42, "name": "Rice"})).unwrap();
        assert_eq!(ProductMatch::from(wire).id.as_deref(), Some("42"));
    }

    #[test]
    fn unknown_intents_round_trip() {
        let intent: Intent = serde_json::from_value(json!("substitute_item")).unwrap();
        assert_eq!(intent, Intent::Other("substitute_item".to_string()));
        assert_eq!(serde_json::to_value(&intent).unwrap(), json!("substitute_item"));
    }

    #[test]
    fn known_intents_parse_to_variants() {
        let intent: Intent = serde_json::from_value(json!("add_item")).unwrap();
        assert_eq!(intent, Intent::AddItem);
        assert_eq!(intent.to_string(), "add_item");
    }

    #[test]
    fn apply_request_restricts_to_chosen_match() {
        let parsed = ParsedIntent {
            intent: Intent::AddItem,
            intent_score: 0.9,
            entities: Entities::default(),
            matches: vec![
                ProductMatch {
                    id: Some("p1".into()),
                    name: "A".into(),
                    brand: None,
                    category: None,
                    price: None,
                    score: 0.5,
                },
                ProductMatch {
                    id: Some("p2".into()),
                    name: "B".into(),
                    brand: None,
                    category: None,
                    price: None,
                    score: 0.4,
                },
            ],
        };
        let chosen = parsed.matches[1].clone();
        let req = ApplyRequest::new(&parsed, Some(&chosen));
        assert_eq!(req.matches.len(), 1);
        assert_eq!(req.matches[0].id.as_deref(), Some("p2"));

        let req = ApplyRequest::new(&parsed, None);
        assert_eq!(req.matches.len(), 2);
    }

    #[test]
    fn parse_response_missing_fields_default() {
        let wire: ParseResponseWire = serde_json::from_value(json!({})).unwrap();
        let parsed = ParsedIntent::from(wire);
        assert_eq!(parsed.intent, Intent::Unknown);
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn entities_quantity_accepts_numbers() {
        let e: Entities =
            serde_json::from_value(json!({"product": "milk", "quantity": 2})).unwrap();
        assert_eq!(e.quantity.as_deref(), Some("2"));
    }
}
