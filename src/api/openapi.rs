//! OpenAPI document for the REST surface.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{BookingIdResponse, BookingRequest, BookingResponse, RoomDto};
use super::handlers::{booking, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "booking-gateway",
        description = "Hotel room reservations for event ticket holders."
    ),
    paths(
        booking::get_booking,
        booking::create_booking,
        booking::update_booking,
        system::health_handler,
    ),
    components(schemas(
        BookingRequest,
        BookingIdResponse,
        BookingResponse,
        RoomDto,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Booking", description = "Room bookings of the authenticated user"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` security scheme referenced by the booking
/// endpoints.
#[derive(Debug)]
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
