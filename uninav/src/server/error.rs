//! Mapping of handler failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::{ErrorList, MessageResponse, PositionRejected};
use crate::alert::DispatchError;
use crate::routing::{ResolveError, RouteError};
use crate::session::TrackError;

/// Handler failures, each rendered as the JSON body its endpoint promises.
#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    Unresolved(Vec<ResolveError>),
    Route(RouteError),
    Sample(TrackError),
    NoPosition,
    Dispatch(DispatchError),
}

impl From<RouteError> for ApiError {
    fn from(e: RouteError) -> Self {
        Self::Route(e)
    }
}

impl From<TrackError> for ApiError {
    fn from(e: TrackError) -> Self {
        Self::Sample(e)
    }
}

impl From<DispatchError> for ApiError {
    fn from(e: DispatchError) -> Self {
        Self::Dispatch(e)
    }
}

fn error_list(headline: &str, details: impl IntoIterator<Item = String>) -> Json<ErrorList> {
    Json(ErrorList {
        errors: std::iter::once(headline.to_string()).chain(details).collect(),
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, error_list("Invalid request.", [message])).into_response()
            }
            Self::Unresolved(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                error_list(
                    "Could not recognize one of the locations.",
                    errors.iter().map(ToString::to_string),
                ),
            )
                .into_response(),
            Self::Route(e) => {
                let status = match e {
                    RouteError::NoPath => StatusCode::UNPROCESSABLE_ENTITY,
                    RouteError::Upstream(_) | RouteError::InvalidGeometry(_) => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, error_list("Error fetching directions.", [e.to_string()])).into_response()
            }
            Self::Sample(e) => (
                StatusCode::BAD_REQUEST,
                Json(PositionRejected {
                    status: "error",
                    message: e.to_string(),
                }),
            )
                .into_response(),
            Self::NoPosition => (
                StatusCode::NOT_FOUND,
                Json(MessageResponse::new("No position recorded for this session")),
            )
                .into_response(),
            Self::Dispatch(e) => {
                let status = match e {
                    DispatchError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    DispatchError::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
                };
                let body = MessageResponse::new(format!("Error sending alert: {e}"));
                (status, Json(body)).into_response()
            }
        }
    }
}
