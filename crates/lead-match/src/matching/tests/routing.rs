use super::common::*;
use axum::extract::{Path, Query, State};
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::matching::ranking::RankingOptions;
use crate::matching::router::{self, CustomerQuery};
use crate::matching::{CustomerId, MatchRequest, MatchService};

async fn post_json(router: axum::Router, uri: &str, body: Value) -> axum::response::Response {
    router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).expect("serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes")
}

async fn get(router: axum::Router, uri: &str) -> axum::response::Response {
    router
        .oneshot(
            Request::get(uri)
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes")
}

#[tokio::test]
async fn match_route_accepts_new_leads() {
    let (service, _, _) = build_service();
    let router = match_router_with_service(service);

    let response = post_json(
        router,
        "/api/v1/match",
        json!({ "customer_data": serde_json::to_value(submission()).expect("serializes") }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], true);
    assert_eq!(payload["total_properties"], 3);
    assert_eq!(payload["matches"][0]["rank"], 1);
    assert_eq!(payload["matches"][0]["property"]["id"], "p-1");
    assert_eq!(payload["matches"][0]["score"]["overall"], 95);
    assert_eq!(
        payload["affordability"]["recommendation"],
        "You can afford up to 2.9M AED purchase (14,000 AED/month)"
    );
}

#[tokio::test]
async fn match_route_rejects_empty_requests() {
    let (service, _, _) = build_service();
    let response = post_json(match_router_with_service(service), "/api/v1/match", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], false);
    assert_eq!(payload["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn generate_handler_returns_unprocessable_for_intake_error() {
    let (service, _, _) = build_service();
    let mut submission = submission();
    submission.name = String::new();

    let response = router::generate_handler::<MemoryCatalog, MemoryStore, MemoryCustomers>(
        State(Arc::new(service)),
        Json(MatchRequest {
            customer_data: Some(submission),
            ..MatchRequest::default()
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn generate_handler_returns_internal_error_when_store_is_offline() {
    let service = Arc::new(MatchService::new(
        Arc::new(MemoryCatalog::with_listings(catalog())),
        Arc::new(UnavailableStore),
        Arc::new(MemoryCustomers::with_customer(customer_record("cust-omar"))),
        RankingOptions::default(),
    ));

    let response = router::generate_handler::<MemoryCatalog, UnavailableStore, MemoryCustomers>(
        State(service),
        Json(MatchRequest {
            customer_id: Some(CustomerId("cust-omar".to_string())),
            ..MatchRequest::default()
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn refresh_requires_customer_id() {
    let (service, _, _) = build_service();

    let response = router::refresh_handler::<MemoryCatalog, MemoryStore, MemoryCustomers>(
        State(Arc::new(service)),
        Query(CustomerQuery { customer_id: None }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_route_reports_unknown_customers() {
    let (service, _, _) = build_service();
    let response = get(
        match_router_with_service(service),
        "/api/v1/match?customer_id=cust-missing",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], "CUSTOMER_NOT_FOUND");
}

#[tokio::test]
async fn history_route_lists_persisted_matches() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service
        .generate(MatchRequest {
            customer_id: Some(CustomerId("cust-omar".to_string())),
            ..MatchRequest::default()
        })
        .expect("matches generated");

    let response = router::history_handler::<MemoryCatalog, MemoryStore, MemoryCustomers>(
        State(service),
        Query(CustomerQuery {
            customer_id: Some("cust-omar".to_string()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 3);
    assert_eq!(payload["matches"][0]["property_id"], "p-1");
    assert_eq!(payload["matches"][0]["status"], "pending");
}

#[tokio::test]
async fn affordability_route_returns_assessment() {
    let (service, _, _) = build_service();
    let response = post_json(
        match_router_with_service(service),
        "/api/v1/affordability",
        json!({ "monthly_income": 50_000, "intent": "rent" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["affordability"]["max_rent_price"], 15_000);
    assert_eq!(payload["affordability"]["is_affordable"], true);
}

#[tokio::test]
async fn listings_route_applies_query_filters() {
    let (service, _, _) = build_service();
    let response = get(
        match_router_with_service(service),
        "/api/v1/properties?status=available&listing_type=sale&min_bedrooms=2&max_price=3000000",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 2);
    assert_eq!(payload["properties"][0]["id"], "p-1");
    assert_eq!(payload["properties"][1]["id"], "p-2");
}

#[tokio::test]
async fn listing_handler_returns_not_found() {
    let (service, _, _) = build_service();

    let response = router::listing_handler::<MemoryCatalog, MemoryStore, MemoryCustomers>(
        State(Arc::new(service)),
        Path("p-404".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], "NOT_FOUND");
}

#[tokio::test]
async fn market_route_reports_community_stats() {
    let (service, _, _) = build_service();
    let response = get(match_router_with_service(service), "/api/v1/analytics/market").await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["summary"]["total_listings"], 4);
    assert_eq!(
        payload["market_intelligence"]["Arabian Ranches"]["trend"],
        "up"
    );
}
