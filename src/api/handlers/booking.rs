//! Booking endpoint handlers: get, create, change room.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{BookingIdResponse, BookingRequest, BookingResponse};
use crate::api::extract::{ValidJson, ValidPath};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::{BookingId, RoomId};
use crate::error::{BookingError, ErrorResponse};

/// `GET /booking` — The caller's booking.
///
/// # Errors
///
/// Returns [`BookingError`] when the caller has no booking.
#[utoipa::path(
    get,
    path = "/booking",
    tag = "Booking",
    summary = "Get the caller's booking",
    description = "Returns the booking held by the authenticated user, with its room.",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User has no booking", body = ErrorResponse),
    )
)]
pub async fn get_booking(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state.booking_service.get_booking(user_id).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// `POST /booking` — Book a room.
///
/// # Errors
///
/// Returns [`BookingError`] on a missing room or enrollment, an occupied
/// room, or an ineligible ticket.
#[utoipa::path(
    post,
    path = "/booking",
    tag = "Booking",
    summary = "Book a room",
    description = "Books the room for the authenticated user. The room must exist and be free, and the user's ticket must be paid, in person, and include hotel.",
    security(("bearer_auth" = [])),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Room booked", body = BookingIdResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Room occupied or ticket ineligible", body = ErrorResponse),
        (status = 404, description = "Room or enrollment not found", body = ErrorResponse),
    )
)]
pub async fn create_booking(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    ValidJson(req): ValidJson<BookingRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let booking_id = state
        .booking_service
        .book_room(user_id, RoomId::new(req.room_id))
        .await?;
    Ok(Json(BookingIdResponse::from(booking_id)))
}

/// `PUT /booking/{bookingId}` — Move a booking to another room.
///
/// # Errors
///
/// Returns [`BookingError`] on a missing room, an occupied room, or a
/// booking that does not belong to the caller.
#[utoipa::path(
    put,
    path = "/booking/{bookingId}",
    tag = "Booking",
    summary = "Change the room of a booking",
    description = "Moves the caller's booking to another free room.",
    security(("bearer_auth" = [])),
    params(
        ("bookingId" = i32, Path, description = "Booking identifier"),
    ),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking moved", body = BookingIdResponse),
        (status = 400, description = "Invalid body or path", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Room occupied or booking not owned", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn update_booking(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    ValidPath(booking_id): ValidPath<i32>,
    ValidJson(req): ValidJson<BookingRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let booking_id = state
        .booking_service
        .change_room(user_id, BookingId::new(booking_id), RoomId::new(req.room_id))
        .await?;
    Ok(Json(BookingIdResponse::from(booking_id)))
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/booking", get(get_booking).post(create_booking))
        .route("/booking/{bookingId}", put(update_booking))
}
