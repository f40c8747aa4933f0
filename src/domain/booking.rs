//! Hotels, rooms, and the bookings that occupy them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, HotelId, RoomId, UserId};

/// A hotel offered to event attendees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    /// Row identifier.
    pub id: HotelId,
    /// Display name.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A bookable room inside a [`Hotel`].
///
/// `capacity` is informational: availability is decided by whether any
/// booking references the room, not by head count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Row identifier.
    pub id: RoomId,
    /// Room label (e.g. `"101"`).
    pub name: String,
    /// Number of guests the room sleeps.
    pub capacity: i32,
    /// Hotel the room belongs to.
    pub hotel_id: HotelId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A reservation linking one user to one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Row identifier.
    pub id: BookingId,
    /// User holding the reservation.
    pub user_id: UserId,
    /// Reserved room.
    pub room_id: RoomId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last room change.
    pub updated_at: DateTime<Utc>,
}

/// A booking together with its room, as returned to the booking owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithRoom {
    /// Booking identifier.
    pub id: BookingId,
    /// The reserved room.
    pub room: Room,
}
