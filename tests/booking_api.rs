//! HTTP integration tests for the booking endpoints.
//!
//! Drives the real router over TCP with `reqwest`; the store is the
//! in-memory implementation seeded per test.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use booking_gateway::domain::TicketStatus;
use serde_json::{Value, json};

use common::{TestApp, spawn_app};

async fn json_body(response: reqwest::Response) -> Value {
    let Ok(body) = response.json::<Value>().await else {
        panic!("response is not JSON");
    };
    body
}

async fn get_booking(app: &TestApp, token: &str) -> reqwest::Response {
    let Ok(response) = app
        .client
        .get(app.url("/booking"))
        .bearer_auth(token)
        .send()
        .await
    else {
        panic!("request failed");
    };
    response
}

async fn post_booking(app: &TestApp, token: &str, body: &Value) -> reqwest::Response {
    let Ok(response) = app
        .client
        .post(app.url("/booking"))
        .bearer_auth(token)
        .json(body)
        .send()
        .await
    else {
        panic!("request failed");
    };
    response
}

async fn put_booking(app: &TestApp, token: &str, booking_id: &str, body: &Value) -> reqwest::Response {
    let Ok(response) = app
        .client
        .put(app.url(&format!("/booking/{booking_id}")))
        .bearer_auth(token)
        .json(body)
        .send()
        .await
    else {
        panic!("request failed");
    };
    response
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized_on_every_route() {
    let app = spawn_app().await;
    let requests = [
        app.client.get(app.url("/booking")),
        app.client.post(app.url("/booking")),
        app.client.put(app.url("/booking/0")),
    ];
    for request in requests {
        let Ok(response) = request.send().await else {
            panic!("request failed");
        };
        assert_eq!(response.status().as_u16(), 401);
    }
}

#[tokio::test]
async fn malformed_token_is_unauthorized() {
    let app = spawn_app().await;
    let response = get_booking(&app, "lorem").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn token_without_session_is_unauthorized() {
    let app = spawn_app().await;
    let token = app.token_without_session("ghost@example.com").await;

    assert_eq!(get_booking(&app, &token).await.status().as_u16(), 401);
    let body = json!({ "roomId": 1 });
    assert_eq!(post_booking(&app, &token, &body).await.status().as_u16(), 401);
    assert_eq!(put_booking(&app, &token, "0", &body).await.status().as_u16(), 401);
}

// ---------------------------------------------------------------------------
// GET /booking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_without_booking_is_not_found() {
    let app = spawn_app().await;
    let (_, token) = app.login("a@example.com").await;

    let response = get_booking(&app, &token).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn get_returns_booking_with_room() {
    let app = spawn_app().await;
    let (_, token) = app.eligible_user("a@example.com").await;
    let room = app.room().await;

    let created = post_booking(&app, &token, &json!({ "roomId": room.id.get() })).await;
    assert_eq!(created.status().as_u16(), 200);
    let booking_id = json_body(created).await["bookingId"].clone();

    let response = get_booking(&app, &token).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = json_body(response).await;
    assert_eq!(body["id"], booking_id);
    assert_eq!(body["Room"]["id"], room.id.get());
    assert_eq!(body["Room"]["name"], room.name);
    assert_eq!(body["Room"]["capacity"], room.capacity);
    assert_eq!(body["Room"]["hotelId"], room.hotel_id.get());
    assert!(body["Room"]["createdAt"].is_string());
    assert!(body["Room"]["updatedAt"].is_string());
}

// ---------------------------------------------------------------------------
// POST /booking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn post_with_invalid_body_is_bad_request() {
    let app = spawn_app().await;
    let (_, token) = app.eligible_user("a@example.com").await;

    for body in [json!({}), json!({ "roomId": "abc" }), json!({ "roomId": null })] {
        let response = post_booking(&app, &token, &body).await;
        assert_eq!(response.status().as_u16(), 400, "body {body}");
        let error = json_body(response).await;
        assert_eq!(error["error"]["code"], 1001);
    }
}

#[tokio::test]
async fn post_with_unknown_room_is_not_found() {
    let app = spawn_app().await;
    let (_, token) = app.eligible_user("a@example.com").await;

    let response = post_booking(&app, &token, &json!({ "roomId": 0 })).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn post_without_enrollment_is_not_found() {
    let app = spawn_app().await;
    let (_, token) = app.login("a@example.com").await;
    let room = app.room().await;

    let response = post_booking(&app, &token, &json!({ "roomId": room.id.get() })).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn post_without_ticket_is_forbidden() {
    let app = spawn_app().await;
    let (user_id, token) = app.login("a@example.com").await;
    app.store.insert_enrollment(user_id).await;
    let room = app.room().await;

    let response = post_booking(&app, &token, &json!({ "roomId": room.id.get() })).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn post_with_ineligible_ticket_is_forbidden() {
    let app = spawn_app().await;
    let cases = [
        ("unpaid@example.com", TicketStatus::Reserved, false, true),
        ("remote@example.com", TicketStatus::Paid, true, true),
        ("nohotel@example.com", TicketStatus::Paid, false, false),
    ];
    for (email, status, is_remote, includes_hotel) in cases {
        let (user_id, token) = app.login(email).await;
        app.give_ticket(user_id, status, is_remote, includes_hotel).await;
        let room = app.room().await;

        let response = post_booking(&app, &token, &json!({ "roomId": room.id.get() })).await;
        assert_eq!(response.status().as_u16(), 403, "{email}");
    }
    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn post_books_room_once() {
    let app = spawn_app().await;
    let (_, first) = app.eligible_user("u@example.com").await;
    let (_, second) = app.eligible_user("v@example.com").await;
    let room = app.room().await;
    let body = json!({ "roomId": room.id.get() });

    let response = post_booking(&app, &first, &body).await;
    assert_eq!(response.status().as_u16(), 200);
    let created = json_body(response).await;
    assert!(created["bookingId"].is_number());

    let response = post_booking(&app, &second, &body).await;
    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(app.store.booking_count().await, 1);
}

#[tokio::test]
async fn post_accepts_integral_float_room_id() {
    let app = spawn_app().await;
    let (_, token) = app.eligible_user("u@example.com").await;
    let room = app.room().await;

    let fractional = json!({ "roomId": f64::from(room.id.get()) + 0.5 });
    assert_eq!(post_booking(&app, &token, &fractional).await.status().as_u16(), 400);

    let whole = json!({ "roomId": f64::from(room.id.get()) });
    assert_eq!(post_booking(&app, &token, &whole).await.status().as_u16(), 200);

    let current = json_body(get_booking(&app, &token).await).await;
    assert_eq!(current["Room"]["id"], room.id.get());
}

#[tokio::test]
async fn post_for_own_booked_room_is_forbidden() {
    let app = spawn_app().await;
    let (_, token) = app.eligible_user("u@example.com").await;
    let room = app.room().await;
    let body = json!({ "roomId": room.id.get() });

    assert_eq!(post_booking(&app, &token, &body).await.status().as_u16(), 200);
    assert_eq!(post_booking(&app, &token, &body).await.status().as_u16(), 403);
}

// ---------------------------------------------------------------------------
// PUT /booking/{bookingId}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_with_invalid_body_is_bad_request() {
    let app = spawn_app().await;
    let (_, token) = app.login("a@example.com").await;

    let response = put_booking(&app, &token, "0", &json!({})).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn put_with_non_numeric_id_is_bad_request() {
    let app = spawn_app().await;
    let (_, token) = app.login("a@example.com").await;
    let room = app.room().await;

    let response = put_booking(&app, &token, "abc", &json!({ "roomId": room.id.get() })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn put_with_unknown_room_is_not_found_before_ownership() {
    let app = spawn_app().await;
    let (_, token) = app.login("a@example.com").await;

    let response = put_booking(&app, &token, "0", &json!({ "roomId": 0 })).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn put_to_occupied_room_is_forbidden() {
    let app = spawn_app().await;
    let (_, token) = app.eligible_user("a@example.com").await;
    let room = app.room().await;
    let created = post_booking(&app, &token, &json!({ "roomId": room.id.get() })).await;
    let booking_id = json_body(created).await["bookingId"].to_string();

    let response = put_booking(&app, &token, &booking_id, &json!({ "roomId": room.id.get() })).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn put_on_missing_booking_is_forbidden() {
    let app = spawn_app().await;
    let (_, token) = app.login("a@example.com").await;
    let room = app.room().await;

    let response = put_booking(&app, &token, "0", &json!({ "roomId": room.id.get() })).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn put_on_foreign_booking_is_forbidden() {
    let app = spawn_app().await;
    let (_, owner) = app.eligible_user("owner@example.com").await;
    let (_, intruder) = app.login("intruder@example.com").await;
    let booked = app.room().await;
    let free = app.room().await;

    let created = post_booking(&app, &owner, &json!({ "roomId": booked.id.get() })).await;
    let booking_id = json_body(created).await["bookingId"].to_string();

    let response = put_booking(&app, &intruder, &booking_id, &json!({ "roomId": free.id.get() })).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn put_moves_booking_and_releases_old_room() {
    let app = spawn_app().await;
    let (_, owner) = app.eligible_user("u@example.com").await;
    let (_, other) = app.eligible_user("v@example.com").await;
    let first = app.room().await;
    let second = app.room().await;

    let created = post_booking(&app, &owner, &json!({ "roomId": first.id.get() })).await;
    let booking_id = json_body(created).await["bookingId"].clone();

    let response = put_booking(
        &app,
        &owner,
        &booking_id.to_string(),
        &json!({ "roomId": second.id.get() }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json_body(response).await, json!({ "bookingId": booking_id }));

    let current = json_body(get_booking(&app, &owner).await).await;
    assert_eq!(current["Room"]["id"], second.id.get());

    let response = post_booking(&app, &other, &json!({ "roomId": first.id.get() })).await;
    assert_eq!(response.status().as_u16(), 200);
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_needs_no_token() {
    let app = spawn_app().await;
    let Ok(response) = app.client.get(app.url("/health")).send().await else {
        panic!("request failed");
    };
    assert_eq!(response.status().as_u16(), 200);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}
