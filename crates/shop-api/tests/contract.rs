use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shop_api::{
    AuthApi, CartSync, Intent, NewCartItem, ProductsApi, ReqwestClient, VoiceApi,
};

async fn client(server: &MockServer) -> ReqwestClient {
    ReqwestClient::new(server.uri()).expect("mock server uri is a valid base")
}

#[tokio::test]
async fn parse_normalizes_alias_ridden_matches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/voice/parse"))
        .and(body_json(json!({"text": "two packet chips add"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "intent": "add_item",
            "intentScore": 0.92,
            "entities": {"product": "chips", "quantity": "2"},
            "matches": [
                {"productId": "p9", "product": "Chips", "pricePerUnit": 20, "similarity": 0.9},
                {"id": "p3", "name": "Banana Chips", "brand": "Local", "price": 35, "score": 0.4}
            ]
        })))
        .mount(&server)
        .await;

    let api = VoiceApi::new(client(&server).await);
    let parsed = api.parse("two packet chips add").await.unwrap();

    assert_eq!(parsed.intent, Intent::AddItem);
    assert_eq!(parsed.matches.len(), 2);

    let top = &parsed.matches[0];
    assert_eq!(top.id.as_deref(), Some("p9"));
    assert_eq!(top.name, "Chips");
    assert_eq!(top.brand, None);
    assert_eq!(top.category, None);
    assert_eq!(top.price, Some(20.0));
    assert_eq!(top.score, 0.9);

    assert_eq!(parsed.matches[1].brand.as_deref(), Some("Local"));
}

#[tokio::test]
async fn parse_defaults_missing_matches_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/voice/parse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"intent": "unknown"})),
        )
        .mount(&server)
        .await;

    let parsed = VoiceApi::new(client(&server).await)
        .parse("mumble")
        .await
        .unwrap();
    assert_eq!(parsed.intent, Intent::Unknown);
    assert!(parsed.matches.is_empty());
}

#[tokio::test]
async fn non_2xx_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/voice/parse"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})),
        )
        .mount(&server)
        .await;

    let err = VoiceApi::new(client(&server).await)
        .parse("hello")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid token");
}

#[tokio::test]
async fn non_2xx_without_message_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/voice/apply"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = VoiceApi::new(client(&server).await);
    let parsed = shop_api::ParsedIntent {
        intent: Intent::AddItem,
        intent_score: 1.0,
        entities: Default::default(),
        matches: vec![],
    };
    let err = api
        .apply(&shop_api::ApplyRequest::new(&parsed, None))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Request failed");
}

#[tokio::test]
async fn bearer_token_is_attached_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(query_param("userId", "u1"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let http = client(&server).await.with_token("tok-123");
    let mut sync = CartSync::new(http);
    sync.load("u1").await.unwrap();
    assert!(sync.cart().is_empty());
}

#[tokio::test]
async fn cart_mutations_replace_local_state_with_server_items() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "c1", "name": "Milk", "price": 52, "quantity": 1},
                {"id": "c2", "name": "Bread", "price": 40, "quantity": 2}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/cart/c1"))
        .and(body_json(json!({"quantity": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "c1", "name": "Milk", "price": 55, "quantity": 2},
                {"id": "c2", "name": "Bread", "price": 40, "quantity": 2}
            ]
        })))
        .mount(&server)
        .await;

    let mut sync = CartSync::new(client(&server).await);
    sync.add(&NewCartItem {
        name: "Milk".into(),
        price: Some(52.0),
        quantity: 1,
        brand: None,
        category: None,
        unit: None,
    })
    .await
    .unwrap();
    assert_eq!(sync.cart().items().len(), 2);
    assert_eq!(sync.cart().total(), 132.0);

    // server repriced the row; local state follows the response exactly
    sync.increment("c1").await.unwrap();
    assert_eq!(sync.cart().find("c1").unwrap().price, Some(55.0));
    assert_eq!(sync.cart().total(), 190.0);
}

#[tokio::test]
async fn cart_delete_204_drops_the_row_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "c1", "name": "Milk", "price": 52, "quantity": 1}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/c1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut sync = CartSync::new(client(&server).await);
    sync.add(&NewCartItem {
        name: "Milk".into(),
        price: Some(52.0),
        quantity: 1,
        brand: None,
        category: None,
        unit: None,
    })
    .await
    .unwrap();
    sync.remove("c1").await.unwrap();
    assert!(sync.cart().is_empty());
}

#[tokio::test]
async fn decrement_at_quantity_one_removes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "c1", "name": "Milk", "price": 52, "quantity": 1}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut sync = CartSync::new(client(&server).await);
    sync.load("u1").await.unwrap();
    sync.decrement("c1").await.unwrap();
    assert!(sync.cart().is_empty());
}

#[tokio::test]
async fn products_search_encodes_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/search"))
        .and(query_param("query", "brown bread"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "p1", "name": "Brown Bread", "price": 40}
        ])))
        .mount(&server)
        .await;

    let products = ProductsApi::new(client(&server).await)
        .search("brown bread")
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Brown Bread");
}

#[tokio::test]
async fn login_returns_the_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "asha", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "tok-9"})),
        )
        .mount(&server)
        .await;

    let auth = AuthApi::new(client(&server).await);
    let resp = auth.login("asha", "pw").await.unwrap();
    assert_eq!(resp.token.as_deref(), Some("tok-9"));
}
