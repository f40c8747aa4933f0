//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::{Authenticator, TokenVerifier};
use crate::persistence::BookingStore;
use crate::service::BookingService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Booking service for all business logic.
    pub booking_service: Arc<BookingService>,
    /// Bearer token authentication.
    pub authenticator: Arc<Authenticator>,
    /// Backing store, probed by the health endpoint.
    pub store: Arc<dyn BookingStore>,
}

impl AppState {
    /// Wires the service and authenticator over a single store.
    #[must_use]
    pub fn new(store: Arc<dyn BookingStore>, verifier: TokenVerifier) -> Self {
        Self {
            booking_service: Arc::new(BookingService::new(Arc::clone(&store))),
            authenticator: Arc::new(Authenticator::new(verifier, Arc::clone(&store))),
            store,
        }
    }
}
