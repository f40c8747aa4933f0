//! In-memory store for tests and persistence-disabled deployments.
//!
//! All tables live behind a single [`tokio::sync::RwLock`]. Reads share the
//! lock; every write takes it exclusively, which makes the occupancy check
//! inside [`BookingStore::create_booking`] atomic with the insert.
//!
//! Identifiers are assigned like a serial column: one past the largest key
//! currently in the table.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BookingStore;
use crate::domain::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, Hotel, HotelId, Room, RoomId,
    Session, SessionId, Ticket, TicketId, TicketStatus, TicketType, TicketTypeId, TicketWithType,
    User, UserId,
};
use crate::error::{BookingError, ForbiddenReason, NotFoundKind};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    sessions: BTreeMap<SessionId, Session>,
    hotels: BTreeMap<HotelId, Hotel>,
    rooms: BTreeMap<RoomId, Room>,
    bookings: BTreeMap<BookingId, Booking>,
    enrollments: BTreeMap<EnrollmentId, Enrollment>,
    ticket_types: BTreeMap<TicketTypeId, TicketType>,
    tickets: BTreeMap<TicketId, Ticket>,
}

/// Next serial key for a table keyed by `K`.
fn next_key<K, V>(table: &BTreeMap<K, V>) -> i32
where
    K: Copy,
    i32: From<K>,
{
    table
        .keys()
        .next_back()
        .map_or(1, |last| i32::from(*last).saturating_add(1))
}

impl Tables {
    fn occupant(&self, room_id: RoomId, except: Option<BookingId>) -> Option<&Booking> {
        self.bookings
            .values()
            .find(|b| b.room_id == room_id && Some(b.id) != except)
    }
}

/// [`BookingStore`] kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user.
    pub async fn insert_user(&self, email: &str) -> User {
        let mut tables = self.tables.write().await;
        let user = User {
            id: UserId::new(next_key(&tables.users)),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        user
    }

    /// Opens a session for `user_id` under the given bearer token.
    pub async fn insert_session(&self, user_id: UserId, token: &str) -> Session {
        let mut tables = self.tables.write().await;
        let session = Session {
            id: SessionId::new(next_key(&tables.sessions)),
            user_id,
            token: token.to_string(),
            created_at: Utc::now(),
        };
        tables.sessions.insert(session.id, session.clone());
        session
    }

    /// Adds a hotel.
    pub async fn insert_hotel(&self, name: &str, image: &str) -> Hotel {
        let mut tables = self.tables.write().await;
        let hotel = Hotel {
            id: HotelId::new(next_key(&tables.hotels)),
            name: name.to_string(),
            image: image.to_string(),
            created_at: Utc::now(),
        };
        tables.hotels.insert(hotel.id, hotel.clone());
        hotel
    }

    /// Adds a room to `hotel_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] if the hotel does not exist.
    pub async fn insert_room(
        &self,
        hotel_id: HotelId,
        name: &str,
        capacity: i32,
    ) -> Result<Room, BookingError> {
        let mut tables = self.tables.write().await;
        if !tables.hotels.contains_key(&hotel_id) {
            return Err(BookingError::PersistenceError(format!(
                "hotel {hotel_id} does not exist"
            )));
        }
        let now = Utc::now();
        let room = Room {
            id: RoomId::new(next_key(&tables.rooms)),
            name: name.to_string(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        };
        tables.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    /// Enrolls `user_id` in the event.
    pub async fn insert_enrollment(&self, user_id: UserId) -> Enrollment {
        let mut tables = self.tables.write().await;
        let enrollment = Enrollment {
            id: EnrollmentId::new(next_key(&tables.enrollments)),
            user_id,
            created_at: Utc::now(),
        };
        tables.enrollments.insert(enrollment.id, enrollment.clone());
        enrollment
    }

    /// Adds a ticket type.
    pub async fn insert_ticket_type(
        &self,
        name: &str,
        price: i32,
        is_remote: bool,
        includes_hotel: bool,
    ) -> TicketType {
        let mut tables = self.tables.write().await;
        let ticket_type = TicketType {
            id: TicketTypeId::new(next_key(&tables.ticket_types)),
            name: name.to_string(),
            price,
            is_remote,
            includes_hotel,
        };
        tables.ticket_types.insert(ticket_type.id, ticket_type.clone());
        ticket_type
    }

    /// Issues a ticket of `ticket_type_id` under `enrollment_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] if the enrollment or the
    /// ticket type does not exist.
    pub async fn insert_ticket(
        &self,
        enrollment_id: EnrollmentId,
        ticket_type_id: TicketTypeId,
        status: TicketStatus,
    ) -> Result<Ticket, BookingError> {
        let mut tables = self.tables.write().await;
        if !tables.enrollments.contains_key(&enrollment_id) {
            return Err(BookingError::PersistenceError(format!(
                "enrollment {enrollment_id} does not exist"
            )));
        }
        if !tables.ticket_types.contains_key(&ticket_type_id) {
            return Err(BookingError::PersistenceError(format!(
                "ticket type {ticket_type_id} does not exist"
            )));
        }
        let ticket = Ticket {
            id: TicketId::new(next_key(&tables.tickets)),
            enrollment_id,
            ticket_type_id,
            status,
        };
        tables.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    /// Returns the number of bookings currently stored.
    pub async fn booking_count(&self) -> usize {
        self.tables.read().await.bookings.len()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn booking_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<BookingWithRoom>, BookingError> {
        let tables = self.tables.read().await;
        let found = tables
            .bookings
            .values()
            .find(|b| b.user_id == user_id)
            .and_then(|b| {
                tables.rooms.get(&b.room_id).map(|room| BookingWithRoom {
                    id: b.id,
                    room: room.clone(),
                })
            });
        Ok(found)
    }

    async fn room(&self, room_id: RoomId) -> Result<Option<Room>, BookingError> {
        Ok(self.tables.read().await.rooms.get(&room_id).cloned())
    }

    async fn booking_by_room(&self, room_id: RoomId) -> Result<Option<Booking>, BookingError> {
        Ok(self.tables.read().await.occupant(room_id, None).cloned())
    }

    async fn booking_of_user(
        &self,
        user_id: UserId,
        booking_id: BookingId,
    ) -> Result<Option<Booking>, BookingError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .get(&booking_id)
            .filter(|b| b.user_id == user_id)
            .cloned())
    }

    async fn enrollment_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Enrollment>, BookingError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .values()
            .find(|e| e.user_id == user_id)
            .cloned())
    }

    async fn ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<TicketWithType>, BookingError> {
        let tables = self.tables.read().await;
        let found = tables
            .tickets
            .values()
            .find(|t| t.enrollment_id == enrollment_id)
            .and_then(|t| {
                tables
                    .ticket_types
                    .get(&t.ticket_type_id)
                    .map(|tt| TicketWithType {
                        ticket: t.clone(),
                        ticket_type: tt.clone(),
                    })
            });
        Ok(found)
    }

    async fn create_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Booking, BookingError> {
        let mut tables = self.tables.write().await;
        if !tables.rooms.contains_key(&room_id) {
            return Err(BookingError::NotFound(NotFoundKind::Room(room_id)));
        }
        if !tables.users.contains_key(&user_id) {
            return Err(BookingError::PersistenceError(format!(
                "user {user_id} does not exist"
            )));
        }
        if tables.occupant(room_id, None).is_some() {
            return Err(BookingError::Forbidden(ForbiddenReason::RoomOccupied(
                room_id,
            )));
        }
        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(next_key(&tables.bookings)),
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        };
        tables.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_booking(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<Booking, BookingError> {
        let mut tables = self.tables.write().await;
        if !tables.rooms.contains_key(&room_id) {
            return Err(BookingError::NotFound(NotFoundKind::Room(room_id)));
        }
        if tables.occupant(room_id, Some(booking_id)).is_some() {
            return Err(BookingError::Forbidden(ForbiddenReason::RoomOccupied(
                room_id,
            )));
        }
        let booking = tables
            .bookings
            .get_mut(&booking_id)
            .ok_or(BookingError::NotFound(NotFoundKind::Booking(booking_id)))?;
        booking.room_id = room_id;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn session_user(&self, token: &str) -> Result<Option<UserId>, BookingError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .values()
            .find(|s| s.token == token)
            .map(|s| s.user_id))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), BookingError> {
        Ok(())
    }
}
