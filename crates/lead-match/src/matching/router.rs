use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::affordability::calculate_affordability;
use super::domain::{CustomerId, CustomerIntent, PropertyId};
use super::repository::{CustomerDirectory, ListingFilter, MatchStore, PropertyCatalog};
use super::service::{MatchRequest, MatchService, MatchServiceError};

type SharedService<C, S, D> = Arc<MatchService<C, S, D>>;

/// Router builder exposing matching, catalog and analytics endpoints.
pub fn match_router<C, S, D>(service: SharedService<C, S, D>) -> Router
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/match",
            post(generate_handler::<C, S, D>).get(refresh_handler::<C, S, D>),
        )
        .route("/api/v1/match/history", get(history_handler::<C, S, D>))
        .route("/api/v1/affordability", post(affordability_handler))
        .route("/api/v1/properties", get(listings_handler::<C, S, D>))
        .route(
            "/api/v1/properties/:property_id",
            get(listing_handler::<C, S, D>),
        )
        .route("/api/v1/analytics/market", get(market_handler::<C, S, D>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerQuery {
    #[serde(default)]
    pub(crate) customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AffordabilityRequest {
    pub(crate) monthly_income: f64,
    pub(crate) intent: CustomerIntent,
    #[serde(default)]
    pub(crate) existing_monthly_debt: f64,
}

fn error_response(status: StatusCode, message: String, code: &'static str) -> Response {
    let payload = json!({
        "success": false,
        "error": message,
        "code": code,
    });
    (status, Json(payload)).into_response()
}

fn service_error_response(error: MatchServiceError) -> Response {
    let status = match &error {
        MatchServiceError::MissingCustomer => StatusCode::BAD_REQUEST,
        MatchServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchServiceError::CustomerNotFound(_)
        | MatchServiceError::PropertyNotFound(_)
        | MatchServiceError::NoProperties => StatusCode::NOT_FOUND,
        MatchServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.to_string(), error.code())
}

fn missing_customer_id() -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        "customer_id is required".to_string(),
        "INVALID_REQUEST",
    )
}

pub(crate) async fn generate_handler<C, S, D>(
    State(service): State<SharedService<C, S, D>>,
    Json(request): Json<MatchRequest>,
) -> Response
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    match service.generate(request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn refresh_handler<C, S, D>(
    State(service): State<SharedService<C, S, D>>,
    Query(query): Query<CustomerQuery>,
) -> Response
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    let Some(customer_id) = query.customer_id else {
        return missing_customer_id();
    };

    match service.refresh(&CustomerId(customer_id)) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn history_handler<C, S, D>(
    State(service): State<SharedService<C, S, D>>,
    Query(query): Query<CustomerQuery>,
) -> Response
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    let Some(customer_id) = query.customer_id else {
        return missing_customer_id();
    };

    let customer_id = CustomerId(customer_id);
    match service.history(&customer_id) {
        Ok(matches) => {
            let payload = json!({
                "success": true,
                "customer_id": customer_id,
                "total": matches.len(),
                "matches": matches,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn affordability_handler(Json(request): Json<AffordabilityRequest>) -> Response {
    let result = calculate_affordability(
        request.monthly_income,
        request.intent,
        request.existing_monthly_debt,
    );
    let payload = json!({
        "success": true,
        "affordability": result,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn listings_handler<C, S, D>(
    State(service): State<SharedService<C, S, D>>,
    Query(filter): Query<ListingFilter>,
) -> Response
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    match service.listings(&filter) {
        Ok(properties) => {
            let payload = json!({
                "success": true,
                "total": properties.len(),
                "properties": properties,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn listing_handler<C, S, D>(
    State(service): State<SharedService<C, S, D>>,
    Path(property_id): Path<String>,
) -> Response
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    match service.listing(&PropertyId(property_id)) {
        Ok(property) => {
            let payload = json!({
                "success": true,
                "property": property,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn market_handler<C, S, D>(
    State(service): State<SharedService<C, S, D>>,
) -> Response
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    match service.market_overview() {
        Ok(overview) => {
            let payload = json!({
                "success": true,
                "summary": overview.summary,
                "market_intelligence": overview.communities,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}
