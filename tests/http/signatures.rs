use guestbook::{Signature, SignatureId, SignatureStore};
use serde_json::{json, Value};

use crate::support::{start_seeded, start_server};

#[tokio::test]
async fn list_signatures() {
    let (base, _store) = start_seeded(vec![
        Signature::new(1, "Ada Lovelace"),
        Signature::new(2, "Alan Turing").with_message("hello"),
    ])
    .await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/signatures")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": { "signatures": [
                { "id": 1, "name": "Ada Lovelace" },
                { "id": 2, "name": "Alan Turing", "message": "hello" },
            ] }
        })
    );
}

#[tokio::test]
async fn create_get_delete_round_trip() {
    let base = start_server(SignatureStore::new()).await;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(format!("{base}/signatures"))
        .json(&json!({ "name": "Noddy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    let signature = body["data"]["signature"].clone();
    assert_eq!(signature["name"], "Noddy");
    let id = signature["id"].as_u64().expect("numeric id");

    // Get
    let resp = client
        .get(format!("{base}/signatures/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["signature"], signature);

    // Delete
    let resp = client
        .delete(format!("{base}/signatures/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "success" }));

    // Gone
    let resp = client
        .get(format!("{base}/signatures/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": "fail",
            "data": { "id": "Could not find a signature with that identifier" }
        })
    );
}

#[tokio::test]
async fn create_without_name_returns_400() {
    let (base, store) = start_seeded(Vec::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/signatures"))
        .json(&json!({ "naem": "Noddy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["data"]["name"], "A string value for name is required");
    assert!(store.is_empty());
}

#[tokio::test]
async fn create_with_empty_body_returns_400() {
    let base = start_server(SignatureStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/signatures"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "A string value for name is required");
}

#[tokio::test]
async fn json_body_without_content_type_is_accepted() {
    let (base, store) = start_seeded(Vec::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/signatures"))
        .body(r#"{"name":"Noddy"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(store.get_all()[0].name, "Noddy");
}

#[tokio::test]
async fn malformed_json_returns_error_envelope() {
    let base = start_server(SignatureStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/signatures"))
        .header("content-type", "application/json")
        .body("{\"name\":")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body["data"]["body"].is_string());
}

#[tokio::test]
async fn update_merges_fields() {
    let (base, store) = start_seeded(vec![Signature::new(5, "Apple")]).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/signatures/5"))
        .json(&json!({ "message": "hi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["data"]["signature"],
        json!({ "id": 5, "name": "Apple", "message": "hi" })
    );
    assert_eq!(
        store.find_by_id(SignatureId(5)),
        Some(Signature::new(5, "Apple").with_message("hi"))
    );
}

#[tokio::test]
async fn update_missing_returns_404() {
    let base = start_server(SignatureStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/signatures/123"))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let (base, _store) = start_seeded(vec![Signature::new(1, "Ada")]).await;
    let client = reqwest::Client::new();

    for method in [reqwest::Method::GET, reqwest::Method::DELETE] {
        let resp = client
            .request(method, format!("{base}/signatures/abc"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }
}

#[tokio::test]
async fn delete_missing_returns_404() {
    let (base, store) = start_seeded(vec![Signature::new(1, "Ada")]).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/signatures/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base = start_server(SignatureStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/nonexistent")).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let base = start_server(SignatureStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/signatures"))
        .header("origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
