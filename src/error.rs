//! Booking error types with HTTP status code mapping.
//!
//! [`BookingError`] is the central error type. Each variant maps to a
//! specific HTTP status code and structured JSON error response. Business
//! rule failures carry a reason so that logs and messages stay precise while
//! the status contract stays coarse (404 / 403).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{BookingId, RoomId, UserId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3001,
///     "message": "forbidden: room 4 is already booked"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Resource whose absence caused a [`BookingError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundKind {
    /// Requested room does not exist.
    #[error("room {0} not found")]
    Room(RoomId),
    /// User has no booking.
    #[error("no booking for user {0}")]
    UserBooking(UserId),
    /// Booking row vanished between check and write.
    #[error("booking {0} not found")]
    Booking(BookingId),
    /// User is not enrolled in the event.
    #[error("no enrollment for user {0}")]
    Enrollment(UserId),
}

/// Business rule that rejected a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenReason {
    /// Another booking already references the room.
    #[error("room {0} is already booked")]
    RoomOccupied(RoomId),
    /// Enrollment has no ticket.
    #[error("no ticket for enrollment")]
    TicketMissing,
    /// Ticket exists but is not paid.
    #[error("ticket is not paid")]
    TicketNotPaid,
    /// Ticket is for remote attendance.
    #[error("ticket is remote")]
    TicketRemote,
    /// Ticket type does not include a hotel room.
    #[error("ticket does not include hotel")]
    TicketWithoutHotel,
    /// Booking does not exist or belongs to another user.
    #[error("booking {0} does not belong to the requesting user")]
    BookingNotOwned(BookingId),
}

impl ForbiddenReason {
    /// Returns the numeric error code for this reason.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::RoomOccupied(_) => 3001,
            Self::TicketMissing => 3002,
            Self::TicketNotPaid => 3003,
            Self::TicketRemote => 3004,
            Self::TicketWithoutHotel => 3005,
            Self::BookingNotOwned(_) => 3006,
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category             | HTTP Status               |
/// |-----------|----------------------|---------------------------|
/// | 1000–1999 | Request / auth       | 400 / 401                 |
/// | 2000–2999 | Not found            | 404 Not Found             |
/// | 3000–3999 | Business rule        | 403 Forbidden             |
/// | 5000–5999 | Server               | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Request body or path failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing, malformed, or unknown bearer token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A required resource does not exist.
    #[error("not found: {0}")]
    NotFound(NotFoundKind),

    /// A booking rule rejected the request.
    #[error("forbidden: {0}")]
    Forbidden(ForbiddenReason),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthorized(_) => 1401,
            Self::NotFound(NotFoundKind::Room(_)) => 2001,
            Self::NotFound(NotFoundKind::UserBooking(_) | NotFoundKind::Booking(_)) => 2002,
            Self::NotFound(NotFoundKind::Enrollment(_)) => 2003,
            Self::Forbidden(reason) => reason.error_code(),
            Self::PersistenceError(_) => 5001,
            Self::Internal(_) => 5000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for BookingError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for BookingError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
