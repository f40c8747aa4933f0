//! PostgreSQL implementation of the booking store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::BookingStore;
use crate::config::AppConfig;
use crate::domain::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, HotelId, Room, RoomId, Ticket,
    TicketId, TicketStatus, TicketType, TicketTypeId, TicketWithType, UserId,
};
use crate::error::{BookingError, ForbiddenReason, NotFoundKind};

type BookingRow = (i32, i32, i32, DateTime<Utc>, DateTime<Utc>);
type RoomRow = (i32, String, i32, i32, DateTime<Utc>, DateTime<Utc>);

const BOOKING_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

fn booking_from_row((id, user_id, room_id, created_at, updated_at): BookingRow) -> Booking {
    Booking {
        id: BookingId::new(id),
        user_id: UserId::new(user_id),
        room_id: RoomId::new(room_id),
        created_at,
        updated_at,
    }
}

fn room_from_row((id, name, capacity, hotel_id, created_at, updated_at): RoomRow) -> Room {
    Room {
        id: RoomId::new(id),
        name,
        capacity,
        hotel_id: HotelId::new(hotel_id),
        created_at,
        updated_at,
    }
}

fn db_error(e: &sqlx::Error) -> BookingError {
    BookingError::PersistenceError(e.to_string())
}

/// Maps a write failure, turning a violation of the one-booking-per-room
/// index into [`ForbiddenReason::RoomOccupied`].
fn write_error(e: &sqlx::Error, room_id: RoomId) -> BookingError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            BookingError::Forbidden(ForbiddenReason::RoomOccupied(room_id))
        }
        _ => db_error(e),
    }
}

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from configuration and applies pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] if the database is
    /// unreachable or a migration fails.
    pub async fn connect(config: &AppConfig) -> Result<Self, BookingError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| db_error(&e))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| BookingError::PersistenceError(e.to_string()))?;

        tracing::info!("database migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl BookingStore for PostgresStore {
    async fn booking_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<BookingWithRoom>, BookingError> {
        let row = sqlx::query_as::<_, (i32, i32, String, i32, i32, DateTime<Utc>, DateTime<Utc>)>(
            "SELECT b.id, r.id, r.name, r.capacity, r.hotel_id, r.created_at, r.updated_at \
             FROM bookings b JOIN rooms r ON r.id = b.room_id \
             WHERE b.user_id = $1 ORDER BY b.id LIMIT 1",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        Ok(row.map(
            |(booking_id, room_id, name, capacity, hotel_id, created_at, updated_at)| {
                BookingWithRoom {
                    id: BookingId::new(booking_id),
                    room: room_from_row((room_id, name, capacity, hotel_id, created_at, updated_at)),
                }
            },
        ))
    }

    async fn room(&self, room_id: RoomId) -> Result<Option<Room>, BookingError> {
        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, capacity, hotel_id, created_at, updated_at FROM rooms WHERE id = $1",
        )
        .bind(room_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        Ok(row.map(room_from_row))
    }

    async fn booking_by_room(&self, room_id: RoomId) -> Result<Option<Booking>, BookingError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = $1 LIMIT 1"
        ))
        .bind(room_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        Ok(row.map(booking_from_row))
    }

    async fn booking_of_user(
        &self,
        user_id: UserId,
        booking_id: BookingId,
    ) -> Result<Option<Booking>, BookingError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 AND user_id = $2"
        ))
        .bind(booking_id.get())
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        Ok(row.map(booking_from_row))
    }

    async fn enrollment_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Enrollment>, BookingError> {
        let row = sqlx::query_as::<_, (i32, i32, DateTime<Utc>)>(
            "SELECT id, user_id, created_at FROM enrollments WHERE user_id = $1",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        Ok(row.map(|(id, user_id, created_at)| Enrollment {
            id: EnrollmentId::new(id),
            user_id: UserId::new(user_id),
            created_at,
        }))
    }

    async fn ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<TicketWithType>, BookingError> {
        let row = sqlx::query_as::<_, (i32, i32, String, i32, String, i32, bool, bool)>(
            "SELECT t.id, t.enrollment_id, t.status, tt.id, tt.name, tt.price, tt.is_remote, tt.includes_hotel \
             FROM tickets t JOIN ticket_types tt ON tt.id = t.ticket_type_id \
             WHERE t.enrollment_id = $1 ORDER BY t.id LIMIT 1",
        )
        .bind(enrollment_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        let Some((id, enrollment_id, status, type_id, name, price, is_remote, includes_hotel)) =
            row
        else {
            return Ok(None);
        };
        let status: TicketStatus = status.parse().map_err(BookingError::PersistenceError)?;

        Ok(Some(TicketWithType {
            ticket: Ticket {
                id: TicketId::new(id),
                enrollment_id: EnrollmentId::new(enrollment_id),
                ticket_type_id: TicketTypeId::new(type_id),
                status,
            },
            ticket_type: TicketType {
                id: TicketTypeId::new(type_id),
                name,
                price,
                is_remote,
                includes_hotel,
            },
        }))
    }

    async fn create_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Booking, BookingError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "INSERT INTO bookings (user_id, room_id) VALUES ($1, $2) RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(user_id.get())
        .bind(room_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(&e, room_id))?;

        Ok(booking_from_row(row))
    }

    async fn update_booking(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<Booking, BookingError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings SET room_id = $2, updated_at = now() WHERE id = $1 \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking_id.get())
        .bind(room_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(&e, room_id))?;

        row.map(booking_from_row)
            .ok_or(BookingError::NotFound(NotFoundKind::Booking(booking_id)))
    }

    async fn session_user(&self, token: &str) -> Result<Option<UserId>, BookingError> {
        let row = sqlx::query_scalar::<_, i32>("SELECT user_id FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error(&e))?;

        Ok(row.map(UserId::new))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), BookingError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&e))?;
        Ok(())
    }
}
