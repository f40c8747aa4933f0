//! Domain layer: identifiers, rows, and the pure booking rules.
//!
//! Row types mirror the relational schema one-to-one. The rules in
//! [`eligibility`] operate on these rows without any I/O.

pub mod booking;
pub mod eligibility;
pub mod ids;
pub mod ticket;
pub mod user;

pub use booking::{Booking, BookingWithRoom, Hotel, Room};
pub use ids::{
    BookingId, EnrollmentId, HotelId, RoomId, SessionId, TicketId, TicketTypeId, UserId,
};
pub use ticket::{Enrollment, Ticket, TicketStatus, TicketType, TicketWithType};
pub use user::{Session, User};
