//! # booking-gateway
//!
//! REST API for reserving hotel rooms tied to event tickets.
//!
//! A user holding a paid, in-person ticket that includes hotel access can
//! book one free room and later move that booking to another free room.
//! Every endpoint requires a bearer token backed by a stored session.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/) ── AuthUser extractor (auth/)
//!     │
//!     ├── BookingService (service/)
//!     ├── Eligibility rules (domain/)
//!     │
//!     └── BookingStore (persistence/)
//!           ├── PostgreSQL
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
