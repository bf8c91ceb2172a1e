use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};

use jsonwebtoken::{EncodingKey, Header, encode};

use kindred_core::domain::{Charity, GeoPoint, Post};
use kindred_core::payment::MAX_AMOUNT_CENTS;
use kindred_core::ports::{BaseRepository, PaymentGateway};
use kindred_infra::{JwtConfig, JwtTokenService, MockPaymentGateway};

use super::{configure_routes, json_config, query_config};
use crate::state::AppState;

const SECRET: &str = "handler-test-secret";

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: SECRET.to_string(),
        ..JwtConfig::default()
    }
}

/// Tokens are minted by the auth provider; sign one the same way here.
fn bearer_with_roles(user_id: &str, roles: &[&str]) -> (header::HeaderName, String) {
    let claims = json!({
        "sub": user_id,
        "email": format!("{user_id}@example.com"),
        "roles": roles,
        "exp": (Utc::now() + TimeDelta::hours(1)).timestamp(),
        "iss": jwt_config().issuer,
    });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn bearer(user_id: &str) -> (header::HeaderName, String) {
    bearer_with_roles(user_id, &[])
}

fn state_with(payments: Arc<dyn PaymentGateway>) -> AppState {
    let tokens = Arc::new(JwtTokenService::new(jwt_config()));
    AppState::in_memory(payments, tokens)
}

/// Two charities: one at the origin point and one about 34 miles north.
async fn seed(state: &AppState) {
    let near = Charity::new("near", "Corner Pantry").located_at(GeoPoint::new(40.0, -75.0));
    let far = Charity::new("far", "Valley Shelter").located_at(GeoPoint::new(40.5, -75.0));
    let nowhere = Charity::new("nowhere", "Online Only");
    for charity in [near, far, nowhere] {
        state.charities.save(charity).await.unwrap();
    }

    let now = Utc::now();
    let posts = [
        Post::by_charity("near", "Shelves restocked").with_timestamp(now - TimeDelta::hours(2)),
        Post::by_charity("far", "Winter coats drive").with_timestamp(now - TimeDelta::hours(1)),
        Post::by_charity("nowhere", "Thanks everyone").with_timestamp(now),
        Post::by_user("u-1", "Donated today").with_timestamp(now),
    ];
    for post in posts {
        state.posts.save(post).await.unwrap();
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(json_config())
                .app_data(query_config())
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await
    };
}

fn post_charities(body: &Value) -> Vec<String> {
    body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["charity_id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[actix_rt::test]
async fn test_health() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn test_recent_feed_is_newest_first() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[3]["charity_id"], "near");
}

#[actix_rt::test]
async fn test_local_feed_with_device_location() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/feed/local?lat=40.0&lon=-75.0&radius=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(post_charities(&body), vec!["near"]);
    assert_eq!(body["radius_miles"], 5.0);
    let distances = body["distances"].as_object().unwrap();
    assert_eq!(distances.len(), 1);
    assert!(distances.values().all(|d| d.as_f64().unwrap() < 1e-9));

    let req = test::TestRequest::get()
        .uri("/api/feed/local?lat=40.0&lon=-75.0&radius=50")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(post_charities(&body), vec!["near", "far"]);
}

#[actix_rt::test]
async fn test_local_feed_without_location_is_empty() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/feed/local").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["posts"].as_array().unwrap().is_empty());
    assert!(body["location"].is_null());
    assert_eq!(body["radius_miles"], 50.0);
}

#[actix_rt::test]
async fn test_local_feed_uses_saved_profile() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/api/me/location")
        .insert_header(bearer("u-1"))
        .set_json(json!({"latitude": 40.5, "longitude": -75.0}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/api/me/radius")
        .insert_header(bearer("u-1"))
        .set_json(json!({"miles": 5}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/feed/local")
        .insert_header(bearer("u-1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(post_charities(&body), vec!["far"]);
    assert_eq!(body["radius_miles"], 5.0);
    assert_eq!(body["location"]["latitude"], 40.5);
}

#[actix_rt::test]
async fn test_local_feed_rejects_bad_query() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    let app = app!(state);

    for uri in [
        "/api/feed/local?lat=40.0",
        "/api/feed/local?lat=40.0&lon=-75.0&radius=-1",
        "/api/feed/local?lat=north&lon=-75.0",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_rt::test]
async fn test_follow_requires_auth() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/charities/near/follow")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_follow_then_following_feed() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/charities/far/follow")
        .insert_header(bearer("u-2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["follower_count"], 1);

    let req = test::TestRequest::post()
        .uri("/api/charities/far/follow")
        .insert_header(bearer("u-2"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/feed/following")
        .insert_header(bearer("u-2"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post_charities(&body), vec!["far"]);

    let req = test::TestRequest::delete()
        .uri("/api/charities/far/follow")
        .insert_header(bearer("u-2"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["following"], false);
    assert_eq!(body["follower_count"], 0);
}

#[actix_rt::test]
async fn test_unknown_charity_is_not_found() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/charities/missing").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri("/api/charities/missing/follow")
        .insert_header(bearer("u-1"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn test_radius_steps_are_clamped() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/api/me/radius")
        .insert_header(bearer("u-3"))
        .set_json(json!({"step": "increase"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["feed_radius_miles"], 60.0);

    let req = test::TestRequest::put()
        .uri("/api/me/radius")
        .insert_header(bearer("u-3"))
        .set_json(json!({"miles": 1000}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["feed_radius_miles"], 300.0);

    let req = test::TestRequest::put()
        .uri("/api/me/radius")
        .insert_header(bearer("u-3"))
        .set_json(json!({"miles": 8}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["feed_radius_miles"], 8.0);

    let req = test::TestRequest::put()
        .uri("/api/me/radius")
        .insert_header(bearer("u-3"))
        .set_json(json!({"step": "decrease"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["feed_radius_miles"], 5.0);

    let req = test::TestRequest::put()
        .uri("/api/me/radius")
        .insert_header(bearer("u-3"))
        .set_json(json!({"step": "sideways"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_rt::test]
async fn test_profile_created_on_first_visit() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(bearer("dana"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], "dana");
    assert_eq!(body["display_name"], "dana");
    assert_eq!(body["feed_radius_miles"], 50.0);
    assert!(body["location"].is_null());
}

#[actix_rt::test]
async fn test_location_out_of_range_rejected() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/api/me/location")
        .insert_header(bearer("u-1"))
        .set_json(json!({"latitude": 91.0, "longitude": 0.0}))
        .to_request();

    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_rt::test]
async fn test_create_payment_intent() {
    let gateway = Arc::new(MockPaymentGateway::new());
    let state = state_with(gateway.clone());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/payments/create-payment-intent")
        .set_json(json!({
            "amount": 2500,
            "payment_method_types": ["card"],
            "destination": "acct_123",
            "platformFeePercent": 10
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let id = body["payment_intent_id"].as_str().unwrap();
    assert!(id.starts_with("pi_mock_"));
    assert!(body["client_secret"].as_str().unwrap().starts_with(id));

    let requests = gateway.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].application_fee_amount(), Some(250));
}

#[actix_rt::test]
async fn test_payment_intent_invalid_amount() {
    let gateway = Arc::new(MockPaymentGateway::new());
    let state = state_with(gateway.clone());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/payments/create-payment-intent")
        .set_json(json!({"amount": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert!(gateway.requests().await.is_empty());
}

#[actix_rt::test]
async fn test_payment_intent_malformed_body_keeps_relay_shape() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/payments/create-payment-intent")
        .insert_header(header::ContentType::json())
        .set_payload("{\"amount\": \"lots\"}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert!(body["error"]["message"].is_string());
}

#[actix_rt::test]
async fn test_payment_intent_declined() {
    let state = state_with(Arc::new(MockPaymentGateway::declining(
        "Your card was declined.",
    )));
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/payments/create-payment-intent")
        .set_json(json!({"amount": 1000}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYMENT_REQUIRED);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["error"]["type"], "card_error");
    assert_eq!(body["error"]["message"], "Your card was declined.");
}

#[actix_rt::test]
async fn test_record_donation_and_history() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/donations")
        .insert_header(bearer("u-4"))
        .set_json(json!({
            "charity_id": "near",
            "amount_cents": 1500,
            "payment_intent_id": "pi_123"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::get()
        .uri("/api/me/donations")
        .insert_header(bearer("u-4"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let donations = body.as_array().unwrap();
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0]["amount_cents"], 1500);

    let req = test::TestRequest::get().uri("/api/charities/near").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_donated_cents"], 1500);
    assert_eq!(body["follower_count"], 0);
}

#[actix_rt::test]
async fn test_record_donation_rejects_bad_amount() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/donations")
        .insert_header(bearer("u-4"))
        .set_json(json!({
            "charity_id": "near",
            "amount_cents": -5,
            "payment_intent_id": "pi_123"
        }))
        .to_request();

    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_rt::test]
async fn test_record_donation_amount_above_cap() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    for amount in [i64::MAX, MAX_AMOUNT_CENTS + 1] {
        let req = test::TestRequest::post()
            .uri("/api/donations")
            .insert_header(bearer("u-4"))
            .set_json(json!({
                "charity_id": "near",
                "amount_cents": amount,
                "payment_intent_id": format!("pi_{amount}")
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST,
            "{amount}"
        );
    }

    let req = test::TestRequest::post()
        .uri("/api/donations")
        .insert_header(bearer("u-4"))
        .set_json(json!({
            "charity_id": "near",
            "amount_cents": MAX_AMOUNT_CENTS,
            "payment_intent_id": "pi_max"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::get().uri("/api/charities/near").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_donated_cents"], MAX_AMOUNT_CENTS);
}

#[actix_rt::test]
async fn test_repeated_payment_intent_is_conflict() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let donate = |user: &str| {
        test::TestRequest::post()
            .uri("/api/donations")
            .insert_header(bearer(user))
            .set_json(json!({
                "charity_id": "near",
                "amount_cents": 1000,
                "payment_intent_id": "pi_once"
            }))
            .to_request()
    };

    assert_eq!(
        test::call_service(&app, donate("u-4")).await.status(),
        StatusCode::CREATED
    );
    let resp = test::call_service(&app, donate("u-5")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 409);

    let req = test::TestRequest::get().uri("/api/charities/near").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_donated_cents"], 1000);

    let req = test::TestRequest::get()
        .uri("/api/me/donations")
        .insert_header(bearer("u-5"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_published_post_appears_in_feed() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer("u-6"))
        .set_json(json!({"content": "  Ran a bake sale  ", "image_url": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["user_id"], "u-6");
    assert_eq!(created["content"], "Ran a bake sale");
    assert!(created["charity_id"].is_null());
    assert!(created["image_url"].is_null());

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 5);
    assert_eq!(posts[0]["id"], created["id"]);
}

#[actix_rt::test]
async fn test_charity_post_requires_charity_role() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let publish = |roles: &[&str]| {
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer_with_roles("staff-1", roles))
            .set_json(json!({"content": "Pantry open late tonight", "charity_id": "near"}))
            .to_request()
    };

    let resp = test::call_service(&app, publish(&[])).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = test::call_service(&app, publish(&["charity:far"])).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(&app, publish(&["charity:near"])).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["charity_id"], "near");
    assert!(created["user_id"].is_null());

    let req = test::TestRequest::get()
        .uri("/api/charities/near/posts")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["id"], created["id"]);

    let req = test::TestRequest::get()
        .uri("/api/feed/local?lat=40.0&lon=-75.0&radius=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post_charities(&body), vec!["near", "near"]);
    assert_eq!(body["posts"][0]["id"], created["id"]);
}

#[actix_rt::test]
async fn test_post_content_validated() {
    let state = state_with(Arc::new(MockPaymentGateway::new()));
    seed(&state).await;
    let app = app!(state);

    let long = "x".repeat(2001);
    for content in ["", "   ", long.as_str()] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer("u-6"))
            .set_json(json!({"content": content}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"content": "anonymous"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/charities/missing/posts")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
