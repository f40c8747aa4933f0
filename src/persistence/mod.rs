//! Persistence layer: the narrow data-access interface used by the
//! booking service.
//!
//! [`BookingStore`] exposes only the reads and writes the booking flows
//! need. Two implementations exist: [`PostgresStore`] backed by
//! `sqlx::PgPool`, and [`MemoryStore`] used in tests and when persistence is
//! disabled.
//!
//! Both implementations enforce one booking per room at write time, so a
//! concurrent request that slips past the service-level availability check
//! still fails with [`crate::error::ForbiddenReason::RoomOccupied`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::domain::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, Room, RoomId, TicketWithType,
    UserId,
};
use crate::error::BookingError;

/// Storage capabilities required by the booking flows.
#[async_trait]
pub trait BookingStore: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the first booking held by `user_id`, joined with its room.
    async fn booking_by_user(&self, user_id: UserId)
    -> Result<Option<BookingWithRoom>, BookingError>;

    /// Returns the room with the given id.
    async fn room(&self, room_id: RoomId) -> Result<Option<Room>, BookingError>;

    /// Returns any booking currently referencing `room_id`.
    async fn booking_by_room(&self, room_id: RoomId) -> Result<Option<Booking>, BookingError>;

    /// Returns booking `booking_id` only if it belongs to `user_id`.
    async fn booking_of_user(
        &self,
        user_id: UserId,
        booking_id: BookingId,
    ) -> Result<Option<Booking>, BookingError>;

    /// Returns the enrollment of `user_id`.
    async fn enrollment_by_user(&self, user_id: UserId)
    -> Result<Option<Enrollment>, BookingError>;

    /// Returns the ticket bought under `enrollment_id`, joined with its type.
    async fn ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<TicketWithType>, BookingError>;

    /// Inserts a booking of `room_id` for `user_id`.
    async fn create_booking(&self, user_id: UserId, room_id: RoomId)
    -> Result<Booking, BookingError>;

    /// Moves booking `booking_id` to `room_id`.
    async fn update_booking(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<Booking, BookingError>;

    /// Returns the owner of the session carrying exactly `token`.
    async fn session_user(&self, token: &str) -> Result<Option<UserId>, BookingError>;

    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Checks that the backend can serve queries.
    async fn ping(&self) -> Result<(), BookingError>;
}
