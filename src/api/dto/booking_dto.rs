//! Booking request and response DTOs.
//!
//! Field names are camelCase on the wire; the embedded room is keyed
//! `Room`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookingId, BookingWithRoom, Room};

/// Request body for `POST /booking` and `PUT /booking/{bookingId}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Room to book or move to. Integral floats such as `2.0` are accepted.
    #[serde(deserialize_with = "integral_i32")]
    pub room_id: i32,
}

/// Reads a JSON number with no fractional part that fits in `i32`.
fn integral_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let whole = number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    });
    whole
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| {
            <D::Error as serde::de::Error>::custom(format!("expected an integer id, got {number}"))
        })
}

/// Response body for `POST /booking` and `PUT /booking/{bookingId}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    /// Identifier of the created or moved booking.
    pub booking_id: i32,
}

impl From<BookingId> for BookingIdResponse {
    fn from(id: BookingId) -> Self {
        Self {
            booking_id: id.get(),
        }
    }
}

/// Room as embedded in [`BookingResponse`].
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    /// Room identifier.
    pub id: i32,
    /// Room label.
    pub name: String,
    /// Number of guests the room sleeps.
    pub capacity: i32,
    /// Owning hotel.
    pub hotel_id: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.get(),
            name: room.name,
            capacity: room.capacity,
            hotel_id: room.hotel_id.get(),
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

/// Response body for `GET /booking`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    /// Booking identifier.
    pub id: i32,
    /// The booked room.
    #[serde(rename = "Room")]
    pub room: RoomDto,
}

impl From<BookingWithRoom> for BookingResponse {
    fn from(booking: BookingWithRoom) -> Self {
        Self {
            id: booking.id.get(),
            room: booking.room.into(),
        }
    }
}
