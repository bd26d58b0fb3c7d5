//! Route, position, alert and profile handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};

use super::error::ApiError;
use super::identity::expired_cookie;
use super::types::{
    LastRouteResponse, LoginRequest, MessageResponse, PositionAccepted, PositionRequest,
    PositionResponse, ProfileResponse, RouteRequest, RouteResponse, SaveLocationRequest,
};
use super::ServerState;
use crate::routing::{self, parse_coordinate, resolve};
use crate::session::{self, SessionKey, TrackError};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn health() -> &'static str {
    "OK"
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub async fn login(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<ProfileResponse> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let name = non_blank(req.name);
    let email = non_blank(req.email);

    state
        .sessions
        .set_profile(&key, name.clone(), email.clone())
        .await;

    Ok(Json(ProfileResponse { name, email }))
}

pub async fn plan_route(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> ApiResult<RouteResponse> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let provider = state.provider.as_ref();

    let (origin, destination) = tokio::join!(
        resolve(provider, &req.current),
        resolve(provider, &req.destination)
    );
    let (origin, destination) = match (origin, destination) {
        (Ok(origin), Ok(destination)) => (origin, destination),
        (origin, destination) => {
            let errors = [origin.err(), destination.err()].into_iter().flatten().collect();
            return Err(ApiError::Unresolved(errors));
        }
    };

    let route = routing::plan(provider, origin, destination).await?;
    state.sessions.set_route(&key, destination, &route).await;

    log::debug!(
        "Session {key}: route {origin} -> {destination}, {} km",
        route.distance_km
    );
    Ok(Json(RouteResponse::from(route)))
}

pub async fn last_route(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
) -> Json<LastRouteResponse> {
    let session = state.sessions.snapshot(&key).await;
    Json(LastRouteResponse {
        route_coords: session
            .last_route_coords
            .unwrap_or_default()
            .iter()
            .map(|c| c.to_pair())
            .collect(),
        destination: session.destination.map(|c| c.to_pair()),
    })
}

async fn accept_sample(
    state: &ServerState,
    key: &SessionKey,
    lat: f64,
    lng: f64,
) -> ApiResult<PositionAccepted> {
    let result = session::track(&state.sessions, key, lat, lng).await?;
    Ok(Json(PositionAccepted {
        status: "ok",
        distance_to_destination_meters: result.distance_to_destination,
        timestamp: result.timestamp,
    }))
}

pub async fn save_position(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
    payload: Result<Json<PositionRequest>, JsonRejection>,
) -> ApiResult<PositionAccepted> {
    let Json(req) = payload.map_err(|e| TrackError::InvalidSample(e.body_text()))?;
    accept_sample(&state, &key, req.lat, req.lng).await
}

pub async fn save_location(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
    payload: Result<Json<SaveLocationRequest>, JsonRejection>,
) -> ApiResult<PositionAccepted> {
    let Json(req) = payload.map_err(|e| TrackError::InvalidSample(e.body_text()))?;
    let location = req
        .location
        .ok_or_else(|| TrackError::InvalidSample("missing location".to_string()))?;
    let position =
        parse_coordinate(&location).map_err(|e| TrackError::InvalidSample(e.to_string()))?;
    accept_sample(&state, &key, position.lat(), position.lng()).await
}

pub async fn current_position(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
) -> ApiResult<PositionResponse> {
    let fix = state
        .sessions
        .snapshot(&key)
        .await
        .position
        .ok_or(ApiError::NoPosition)?;
    Ok(Json(PositionResponse::new(fix.coordinate, fix.at)))
}

pub async fn send_alert(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
) -> ApiResult<MessageResponse> {
    let session = state.sessions.snapshot(&key).await;
    let receipt = state.alerts.dispatch(&session).await?;
    log::debug!(
        "Session {key}: alert handed to {} at {}",
        receipt.recipient, receipt.timestamp
    );
    Ok(Json(MessageResponse::new("Panic alert sent successfully!")))
}

pub async fn end_session(
    State(state): State<Arc<ServerState>>,
    Extension(key): Extension<SessionKey>,
) -> impl IntoResponse {
    let existed = state.sessions.forget(&key).await;
    log::debug!(
        "Session {key} ended (existed: {existed}), {} active",
        state.sessions.len().await
    );
    (
        AppendHeaders([(SET_COOKIE, expired_cookie())]),
        Json(MessageResponse::new("Session ended")),
    )
}
