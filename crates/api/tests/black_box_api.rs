use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use storefront_api::app::services::build_in_memory_services;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory backend, bound to an ephemeral port.
        let services = Arc::new(build_in_memory_services());
        let app = storefront_api::app::build_app_with_services(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api/v1", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn root_url(&self) -> String {
        // Strip the API prefix to reach root-level routes like /health.
        self.base_url.trim_end_matches("/api/v1").to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn sample_product(name: &str, brand: &str, category: &str) -> serde_json::Value {
    json!({
        "name": name,
        "brand": brand,
        "price_cents": 149_900,
        "inventory": 25,
        "description": "a thing",
        "category": { "name": category }
    })
}

async fn add_product(
    client: &reqwest::Client,
    base_url: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/product", base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_lives_at_root() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.root_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn add_then_fetch_product_by_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = add_product(
        &client,
        &srv.base_url,
        sample_product("Noise Cancelling Headphones", "Acme", "Audio"),
    )
    .await;

    assert_eq!(body["message"], "Product added");
    let data = &body["data"];
    assert_eq!(data["name"], "Noise Cancelling Headphones");
    assert_eq!(data["brand"], "Acme");
    assert_eq!(data["category"], "Audio");
    assert_eq!(data["price_cents"], 149_900);
    let id = data["id"].as_str().unwrap().to_string();

    let res = client
        .get(format!("{}/product/id/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["data"]["id"], id.as_str());
    assert_eq!(fetched["data"]["name"], "Noise Cancelling Headphones");
}

#[tokio::test]
async fn add_product_rejects_blank_name() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/product", srv.base_url))
        .json(&sample_product("   ", "Acme", "Audio"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn get_unknown_product_is_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/product/id/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_product_id_is_400() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/product/id/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = add_product(
        &client,
        &srv.base_url,
        sample_product("Mechanical Keyboard", "Acme", "Peripherals"),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/product/id/{}/update", srv.base_url, id))
        .json(&json!({ "price_cents": 99_900 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product updated");
    assert_eq!(body["data"]["price_cents"], 99_900);
    // Untouched fields survive the patch.
    assert_eq!(body["data"]["name"], "Mechanical Keyboard");
    assert_eq!(body["data"]["brand"], "Acme");
    assert_eq!(body["data"]["category"], "Peripherals");
}

#[tokio::test]
async fn update_rejects_negative_inventory() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = add_product(
        &client,
        &srv.base_url,
        sample_product("Monitor", "Acme", "Displays"),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/product/id/{}/update", srv.base_url, id))
        .json(&json!({ "inventory": -5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/product/id/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["inventory"], 25);
}

#[tokio::test]
async fn update_to_unknown_category_is_404_and_changes_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = add_product(
        &client,
        &srv.base_url,
        sample_product("Desk Lamp", "Lumen", "Lighting"),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/product/id/{}/update", srv.base_url, id))
        .json(&json!({ "name": "Desk Lamp v2", "category": { "name": "NoSuchCategory" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/product/id/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Desk Lamp");
    assert_eq!(body["data"]["category"], "Lighting");
}

#[tokio::test]
async fn delete_product_then_fetch_is_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = add_product(
        &client,
        &srv.base_url,
        sample_product("USB Hub", "Acme", "Peripherals"),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/product/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product deleted");

    let res = client
        .get(format!("{}/product/id/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_product_is_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!(
            "{}/product/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_and_filter_products() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add_product(
        &client,
        &srv.base_url,
        sample_product("Trail Shoe", "Strider", "Footwear"),
    )
    .await;
    add_product(
        &client,
        &srv.base_url,
        sample_product("Road Shoe", "Strider", "Footwear"),
    )
    .await;
    add_product(
        &client,
        &srv.base_url,
        sample_product("Rain Jacket", "Peak", "Outerwear"),
    )
    .await;

    let res = client
        .get(format!("{}/product", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let res = client
        .get(format!("{}/product/brand?brand=Strider", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let res = client
        .get(format!("{}/product/category?category=Outerwear", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Rain Jacket");

    let res = client
        .get(format!(
            "{}/product/category-and-brand?category=Footwear&brandName=Strider",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let res = client
        .get(format!(
            "{}/product/brand-and-name?brandName=Strider&productName=Trail Shoe",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let res = client
        .get(format!(
            "{}/product/count?brand=Strider&name=Road Shoe",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Total products:");
    assert_eq!(body["data"], 1);
}

#[tokio::test]
async fn empty_filter_result_is_200_with_empty_list() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/product/name?name=Nothing", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn products_in_same_category_share_one_category() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add_product(
        &client,
        &srv.base_url,
        sample_product("Phone A", "Acme", "Phones"),
    )
    .await;
    add_product(
        &client,
        &srv.base_url,
        sample_product("Phone B", "Acme", "Phones"),
    )
    .await;

    let res = client
        .get(format!("{}/product/category?category=Phones", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["category"], "Phones");
    }
}
