//! Shared helpers for HTTP integration tests.
//!
//! Each test spawns the real router on an ephemeral port over a fresh
//! [`MemoryStore`], then seeds rows directly through the store.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use booking_gateway::api;
use booking_gateway::app_state::AppState;
use booking_gateway::auth::TokenVerifier;
use booking_gateway::domain::{Room, TicketStatus, UserId};
use booking_gateway::persistence::{BookingStore, MemoryStore};

/// Secret shared by the server and the test token issuer.
pub const SECRET: &str = "integration-test-secret";

/// A running server plus direct access to its store.
pub struct TestApp {
    /// Base URL, e.g. `http://127.0.0.1:54321`.
    pub base_url: String,
    /// Backing store.
    pub store: Arc<MemoryStore>,
    /// Token issuer sharing the server's secret.
    pub verifier: TokenVerifier,
    /// HTTP client.
    pub client: reqwest::Client,
}

/// Starts the application on `127.0.0.1:0`.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let verifier = TokenVerifier::new(SECRET);
    let state = AppState::new(Arc::clone(&store) as Arc<dyn BookingStore>, verifier.clone());
    let app = api::build_app(state, Duration::from_secs(10));

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no local address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestApp {
        base_url: format!("http://{addr}"),
        store,
        verifier,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    /// Builds a URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Creates a user with an open session; returns the id and token.
    pub async fn login(&self, email: &str) -> (UserId, String) {
        let user = self.store.insert_user(email).await;
        let Ok(token) = self.verifier.issue(user.id) else {
            panic!("token signing failed");
        };
        self.store.insert_session(user.id, &token).await;
        (user.id, token)
    }

    /// Creates a user whose token verifies but has no session.
    pub async fn token_without_session(&self, email: &str) -> String {
        let user = self.store.insert_user(email).await;
        let Ok(token) = self.verifier.issue(user.id) else {
            panic!("token signing failed");
        };
        token
    }

    /// Creates a hotel with one room.
    pub async fn room(&self) -> Room {
        let hotel = self
            .store
            .insert_hotel("Driven Palace", "https://img.example/hotel.png")
            .await;
        let Ok(room) = self.store.insert_room(hotel.id, "101", 2).await else {
            panic!("room insert failed");
        };
        room
    }

    /// Enrolls `user_id` with a ticket of the given shape.
    pub async fn give_ticket(
        &self,
        user_id: UserId,
        status: TicketStatus,
        is_remote: bool,
        includes_hotel: bool,
    ) {
        let enrollment = self.store.insert_enrollment(user_id).await;
        let ticket_type = self
            .store
            .insert_ticket_type("Ticket", 300, is_remote, includes_hotel)
            .await;
        if self
            .store
            .insert_ticket(enrollment.id, ticket_type.id, status)
            .await
            .is_err()
        {
            panic!("ticket insert failed");
        }
    }

    /// Creates a logged-in user holding a paid in-person hotel ticket.
    pub async fn eligible_user(&self, email: &str) -> (UserId, String) {
        let (user_id, token) = self.login(email).await;
        self.give_ticket(user_id, TicketStatus::Paid, false, true).await;
        (user_id, token)
    }
}
