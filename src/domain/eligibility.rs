//! Pure booking rules.
//!
//! These functions take already-loaded rows and decide whether a booking is
//! allowed. They never touch the store, so the service layer can load data
//! however it likes and still apply exactly the same rules.

use super::booking::Booking;
use super::ticket::{TicketStatus, TicketWithType};
use super::RoomId;
use crate::error::ForbiddenReason;

/// Decides whether a ticket grants a hotel room.
///
/// A ticket qualifies only when it exists, is paid, is not remote, and its
/// type includes hotel access. Checks run in that order and the first failing
/// one is reported.
///
/// # Errors
///
/// Returns the [`ForbiddenReason`] of the first failing check.
pub fn ticket_eligibility(ticket: Option<&TicketWithType>) -> Result<(), ForbiddenReason> {
    let Some(ticket) = ticket else {
        return Err(ForbiddenReason::TicketMissing);
    };
    if ticket.ticket.status != TicketStatus::Paid {
        return Err(ForbiddenReason::TicketNotPaid);
    }
    if ticket.ticket_type.is_remote {
        return Err(ForbiddenReason::TicketRemote);
    }
    if !ticket.ticket_type.includes_hotel {
        return Err(ForbiddenReason::TicketWithoutHotel);
    }
    Ok(())
}

/// Decides whether a room can take a new booking given its current occupant.
///
/// Any existing booking makes the room unavailable, including a booking by
/// the same user on the same room.
///
/// # Errors
///
/// Returns [`ForbiddenReason::RoomOccupied`] when `occupant` is present.
pub fn room_availability(room_id: RoomId, occupant: Option<&Booking>) -> Result<(), ForbiddenReason> {
    match occupant {
        Some(_) => Err(ForbiddenReason::RoomOccupied(room_id)),
        None => Ok(()),
    }
}
