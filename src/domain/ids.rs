//! Type-safe row identifiers.
//!
//! Every table is keyed by a serial `INTEGER`. Each key gets its own newtype
//! so that a [`RoomId`] can never be passed where a [`BookingId`] is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId
);
define_id!(
    /// Identifier of a login session.
    SessionId
);
define_id!(
    /// Identifier of a hotel.
    HotelId
);
define_id!(
    /// Identifier of a hotel room.
    RoomId
);
define_id!(
    /// Identifier of a room booking.
    BookingId
);
define_id!(
    /// Identifier of an event enrollment.
    EnrollmentId
);
define_id!(
    /// Identifier of a ticket type.
    TicketTypeId
);
define_id!(
    /// Identifier of a ticket.
    TicketId
);
