//! Event enrollments and the tickets attached to them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EnrollmentId, TicketId, TicketTypeId, UserId};

/// Payment state of a [`Ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Ticket reserved but not yet paid.
    Reserved,
    /// Ticket fully paid.
    Paid,
}

impl TicketStatus {
    /// Returns the status as stored in the `tickets.status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESERVED" => Ok(Self::Reserved),
            "PAID" => Ok(Self::Paid),
            other => Err(format!("unknown ticket status: {other}")),
        }
    }
}

/// Registration of a user for the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Row identifier.
    pub id: EnrollmentId,
    /// Enrolled user.
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Kind of ticket sold, with the flags that gate hotel access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    /// Row identifier.
    pub id: TicketTypeId,
    /// Display name.
    pub name: String,
    /// Price in whole currency units.
    pub price: i32,
    /// Online-only attendance.
    pub is_remote: bool,
    /// Whether the ticket grants a hotel room.
    pub includes_hotel: bool,
}

/// A ticket bought under an [`Enrollment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Row identifier.
    pub id: TicketId,
    /// Owning enrollment.
    pub enrollment_id: EnrollmentId,
    /// Ticket type.
    pub ticket_type_id: TicketTypeId,
    /// Payment state.
    pub status: TicketStatus,
}

/// A [`Ticket`] joined with its [`TicketType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketWithType {
    /// The ticket row.
    pub ticket: Ticket,
    /// The ticket's type.
    pub ticket_type: TicketType,
}
