//! Service layer: business logic orchestration.
//!
//! [`BookingService`] applies the booking rules from
//! [`crate::domain::eligibility`] to data loaded through
//! [`crate::persistence::BookingStore`].

pub mod booking_service;

pub use booking_service::BookingService;
