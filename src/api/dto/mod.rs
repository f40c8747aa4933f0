//! Data Transfer Objects for REST request/response serialization.

pub mod booking_dto;

pub use booking_dto::*;
