//! Booking service: lookups, eligibility checks, and mutations.

use std::sync::Arc;

use crate::domain::eligibility::{room_availability, ticket_eligibility};
use crate::domain::{Booking, BookingId, BookingWithRoom, Room, RoomId, UserId};
use crate::error::{BookingError, ForbiddenReason, NotFoundKind};
use crate::persistence::BookingStore;

/// Orchestration layer for all booking operations.
///
/// Stateless coordinator over a [`BookingStore`]. The individual checks are
/// public so callers can compose them; [`BookingService::book_room`] and
/// [`BookingService::change_room`] run them in the required order and stop
/// at the first failure.
#[derive(Debug, Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    /// Creates a new `BookingService`.
    #[must_use]
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Returns the booking held by `user_id`, with its room.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundKind::UserBooking`] if the user has no booking.
    pub async fn get_booking(&self, user_id: UserId) -> Result<BookingWithRoom, BookingError> {
        self.store
            .booking_by_user(user_id)
            .await?
            .ok_or(BookingError::NotFound(NotFoundKind::UserBooking(user_id)))
    }

    /// Ensures the room exists.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundKind::Room`] if it does not.
    pub async fn find_room(&self, room_id: RoomId) -> Result<Room, BookingError> {
        self.store
            .room(room_id)
            .await?
            .ok_or(BookingError::NotFound(NotFoundKind::Room(room_id)))
    }

    /// Ensures no booking references the room.
    ///
    /// # Errors
    ///
    /// Returns [`ForbiddenReason::RoomOccupied`] if one does, even when it
    /// is the caller's own booking.
    pub async fn room_unable(&self, room_id: RoomId) -> Result<(), BookingError> {
        let occupant = self.store.booking_by_room(room_id).await?;
        room_availability(room_id, occupant.as_ref()).map_err(BookingError::Forbidden)
    }

    /// Ensures `booking_id` exists and belongs to `user_id`.
    ///
    /// A missing booking and a foreign booking are reported the same way.
    ///
    /// # Errors
    ///
    /// Returns [`ForbiddenReason::BookingNotOwned`] otherwise.
    pub async fn find_booking(
        &self,
        user_id: UserId,
        booking_id: BookingId,
    ) -> Result<Booking, BookingError> {
        self.store
            .booking_of_user(user_id, booking_id)
            .await?
            .ok_or(BookingError::Forbidden(ForbiddenReason::BookingNotOwned(
                booking_id,
            )))
    }

    /// Ensures the user's ticket grants a hotel room.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundKind::Enrollment`] if the user is not enrolled, or
    /// a ticket [`ForbiddenReason`] if the ticket is missing, unpaid, remote,
    /// or excludes the hotel.
    pub async fn verify_ticket(&self, user_id: UserId) -> Result<(), BookingError> {
        let enrollment = self
            .store
            .enrollment_by_user(user_id)
            .await?
            .ok_or(BookingError::NotFound(NotFoundKind::Enrollment(user_id)))?;

        let ticket = self.store.ticket_by_enrollment(enrollment.id).await?;
        ticket_eligibility(ticket.as_ref()).map_err(BookingError::Forbidden)
    }

    /// Inserts a booking without running any checks.
    ///
    /// # Errors
    ///
    /// Propagates store failures, including a concurrent booking of the
    /// same room.
    pub async fn create(&self, user_id: UserId, room_id: RoomId) -> Result<Booking, BookingError> {
        self.store.create_booking(user_id, room_id).await
    }

    /// Moves a booking without running any checks.
    ///
    /// # Errors
    ///
    /// Propagates store failures, including a concurrent booking of the
    /// target room.
    pub async fn update(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<Booking, BookingError> {
        self.store.update_booking(booking_id, room_id).await
    }

    /// Books `room_id` for `user_id`.
    ///
    /// Checks, in order: the room exists, the room is free, the user's
    /// ticket qualifies. Returns the new booking id.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`BookingError`].
    pub async fn book_room(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<BookingId, BookingError> {
        let result = async {
            self.find_room(room_id).await?;
            self.room_unable(room_id).await?;
            self.verify_ticket(user_id).await?;
            self.create(user_id, room_id).await
        }
        .await;

        match result {
            Ok(booking) => {
                tracing::info!(%user_id, %room_id, booking_id = %booking.id, "room booked");
                Ok(booking.id)
            }
            Err(e) => {
                tracing::debug!(%user_id, %room_id, error = %e, "booking rejected");
                Err(e)
            }
        }
    }

    /// Moves `booking_id` of `user_id` to `room_id`.
    ///
    /// Checks, in order: the target room exists, the target room is free,
    /// the booking belongs to the user. Room existence is therefore reported
    /// before ownership. Returns the booking id.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`BookingError`].
    pub async fn change_room(
        &self,
        user_id: UserId,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<BookingId, BookingError> {
        let result = async {
            self.find_room(room_id).await?;
            self.room_unable(room_id).await?;
            self.find_booking(user_id, booking_id).await?;
            self.update(booking_id, room_id).await
        }
        .await;

        match result {
            Ok(booking) => {
                tracing::info!(%user_id, %booking_id, %room_id, "booking moved");
                Ok(booking.id)
            }
            Err(e) => {
                tracing::debug!(%user_id, %booking_id, %room_id, error = %e, "room change rejected");
                Err(e)
            }
        }
    }
}
