mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn liveness_route_answers_with_plain_text() {
    let app = app();
    let res = get(&app, "/").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text, "Inside the server");
}

#[tokio::test]
async fn created_gift_is_returned_with_both_identifiers() {
    let app = app();

    let created = post(&app, "/api/gifts", json!({ "name": "Lamp" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    assert_eq!(body["name"], "Lamp");
    let document_id = body["_id"].as_str().unwrap().to_string();
    assert_eq!(body["id"], document_id.as_str());

    let fetched = get(&app, &format!("/api/gifts/{}", document_id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), body);
}

#[tokio::test]
async fn client_supplied_id_is_used_for_lookup() {
    let app = app();

    let created = post(
        &app,
        "/api/gifts",
        json!({
            "id": "872",
            "name": "Cubicle Storage Cabinet",
            "category": "Office",
            "condition": "Like New",
            "age_days": 1001,
            "age_years": 2.7,
            "description": "Dark grey cabinet",
            "image": "/images/872.jpeg",
            "posted_by": "u_872",
            "zipcode": "10001",
            "date_added": 1699056000
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    assert_eq!(body["id"], "872");
    assert_ne!(body["_id"], "872");

    let fetched = get(&app, "/api/gifts/872").await;
    assert_eq!(fetched.status, StatusCode::OK);
    let gift = fetched.json();
    assert_eq!(gift["condition"], "Like New");
    assert_eq!(gift["age_days"], 1001);
    assert_eq!(gift["zipcode"], "10001");
    assert_eq!(gift, body);
}

#[tokio::test]
async fn duplicate_client_id_is_rejected() {
    let app = app();
    post(&app, "/api/gifts", json!({ "id": "1", "name": "Lamp" })).await;
    let dup = post(&app, "/api/gifts", json!({ "id": "1", "name": "Rug" })).await;
    assert_eq!(dup.status, StatusCode::BAD_REQUEST);
    assert!(dup.json()["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn unknown_gift_is_not_found() {
    let app = app();
    let res = get(&app, "/api/gifts/does-not-exist").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["error"], "Gift not found");
}

#[tokio::test]
async fn invalid_payloads_are_rejected_before_persistence() {
    let app = app();

    for payload in [
        json!({}),
        json!({ "name": "  " }),
        json!({ "name": "Sofa", "category": "Garage" }),
        json!({ "name": "Sofa", "condition": "Broken" }),
        json!({ "name": "Sofa", "age_years": -2 }),
        json!({ "name": 42 }),
    ] {
        let res = post(&app, "/api/gifts", payload.clone()).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert!(res.json()["error"].is_string());
    }

    let list = get(&app, "/api/gifts").await;
    assert_eq!(list.json(), json!([]));
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/gifts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let res = app.oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_fields_are_not_stored() {
    let app = app();
    let created = post(
        &app,
        "/api/gifts",
        json!({ "name": "Lamp", "$where": "sleep(1000)", "owner_override": true }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    assert!(body.get("$where").is_none());
    assert!(body.get("owner_override").is_none());
}

#[tokio::test]
async fn list_returns_every_created_gift() {
    let app = app();
    for name in ["Lamp", "Rug", "Kettle"] {
        post(&app, "/api/gifts", json!({ "name": name })).await;
    }

    let res = get(&app, "/api/gifts").await;
    assert_eq!(res.status, StatusCode::OK);
    let names: Vec<String> = res
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Lamp", "Rug", "Kettle"]);
}
