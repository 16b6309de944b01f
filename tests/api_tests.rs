mod common;

use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use common::{AuthHelper, MemoryStore, career, create_app, dancer_record, day, team_record};
use roster::SessionState;
use roster::database::models::ItemType;
use roster::services::session::AuthEvent;

fn slugs(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["slug"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_directory_serves_sample_roster_when_backend_is_empty() {
    let app = test::init_service(create_app(MemoryStore::new(), SessionState::new())).await;

    let req = test::TestRequest::get().uri("/api/v1/directory").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["source"], "sample");
    assert_eq!(body["data"]["dancers"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["teams"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["totalResults"], 5);
}

#[actix_web::test]
async fn test_directory_filters_live_roster() {
    let store = MemoryStore::new();
    store.add_user(dancer_record("김마린", "Marline Kim", "marline-kim"));
    store.add_user(dancer_record("이하늘", "Haneul Lee", "haneul-lee"));
    let nova = store.add_team(team_record("Kimchi Crew", "kimchi-crew", 2020));
    store.rank(ItemType::Team, nova.id, 1);
    let app = test::init_service(create_app(store, SessionState::new())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/directory?query=KIM&type=solo")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["source"], "live");
    assert_eq!(slugs(&body["data"]["dancers"]), vec!["marline-kim"]);
    assert_eq!(body["data"]["teams"], json!([]));
    assert_eq!(body["data"]["totalResults"], 1);
    assert_eq!(body["data"]["filters"]["type"], "solo");
}

#[actix_web::test]
async fn test_artist_and_team_not_found() {
    let app = test::init_service(create_app(MemoryStore::new(), SessionState::new())).await;

    let req = test::TestRequest::get().uri("/api/v1/artists/nobody").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not found: Artist not found");

    let req = test::TestRequest::get().uri("/api/v1/teams/nobody").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_profile_backend_failure_is_server_error() {
    let store = MemoryStore::new();
    {
        let mut tables = store.tables();
        tables.fail_users = true;
        tables.fail_teams = true;
    }
    let app = test::init_service(create_app(store, SessionState::new())).await;

    for uri in ["/api/v1/artists/ara", "/api/v1/teams/nova"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "uri: {}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Database error: "),
            "uri: {}",
            uri
        );
    }
}

#[actix_web::test]
async fn test_artist_profile() {
    let store = MemoryStore::new();
    let ara = store.add_user(dancer_record("가", "Ara", "ara"));
    store.add_career(career(
        ara.id,
        "choreography",
        "Debut",
        Some(day(2024, 3, 1)),
    ));
    let app = test::init_service(create_app(store, SessionState::new())).await;

    let req = test::TestRequest::get().uri("/api/v1/artists/ara").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["dancer"]["slug"], "ara");
    assert_eq!(body["data"]["dancer"]["specialty"]["provenance"], "placeholder");
    assert_eq!(body["data"]["careers"]["total"], 1);
    assert_eq!(body["data"]["careers"]["years"][0]["year"], 2024);
}

#[actix_web::test]
async fn test_featured_artists_rejects_zero_limit() {
    let app = test::init_service(create_app(MemoryStore::new(), SessionState::new())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/artists/featured?limit=0")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_my_page_requires_token() {
    let app = test::init_service(create_app(MemoryStore::new(), SessionState::new())).await;

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let expired = AuthHelper::token_for(Uuid::new_v4(), Duration::hours(-2));
    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(AuthHelper::auth_header(&expired))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_career_entry() {
    let store = MemoryStore::new();
    let user = store.add_user(dancer_record("가", "Ara", "ara"));
    let token = AuthHelper::token_for(user.id, Duration::hours(1));
    let app = test::init_service(create_app(store.clone(), SessionState::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/me/careers")
        .insert_header(AuthHelper::auth_header(&token))
        .set_json(json!({
            "category": "performance",
            "title": "  Summer Festival  ",
            "dateType": "range",
            "startDate": "2024-07-01",
            "endDate": "2024-07-03",
            "posterUrl": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Summer Festival");
    assert_eq!(body["data"]["posterUrl"], Value::Null);
    assert_eq!(store.tables().careers.len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(AuthHelper::auth_header(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["careers"]["total"], 1);
    assert_eq!(body["data"]["dancer"]["slug"], "ara");
}

#[actix_web::test]
async fn test_create_career_entry_validation() {
    let token = AuthHelper::token_for(Uuid::new_v4(), Duration::hours(1));
    let store = MemoryStore::new();
    let app = test::init_service(create_app(store.clone(), SessionState::new())).await;

    let invalid = [
        json!({"category": "concert", "title": "x", "dateType": "single", "singleDate": "2024-01-01"}),
        json!({"category": "tv", "title": "   ", "dateType": "single", "singleDate": "2024-01-01"}),
        json!({"category": "tv", "title": "x", "dateType": "range", "startDate": "2024-02-01", "endDate": "2024-01-01"}),
    ];

    for payload in invalid {
        let req = test::TestRequest::post()
            .uri("/api/v1/me/careers")
            .insert_header(AuthHelper::auth_header(&token))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
    }

    assert!(store.tables().careers.is_empty());
}

#[actix_web::test]
async fn test_delete_career_entry_checks_owner() {
    let store = MemoryStore::new();
    let owner = Uuid::new_v4();
    let entry = store.add_career(career(owner, "tv", "Show", None));
    let app = test::init_service(create_app(store.clone(), SessionState::new())).await;

    let intruder = AuthHelper::token_for(Uuid::new_v4(), Duration::hours(1));
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/me/careers/{}", entry.id))
        .insert_header(AuthHelper::auth_header(&intruder))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.tables().careers.len(), 1);

    let token = AuthHelper::token_for(owner, Duration::hours(1));
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/me/careers/{}", entry.id))
        .insert_header(AuthHelper::auth_header(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Career entry deleted");
    assert!(store.tables().careers.is_empty());
}

#[actix_web::test]
async fn test_session_events_follow_requests() {
    let session = SessionState::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let _sub = session.subscribe(move |event| {
        let name = match event {
            AuthEvent::SignedIn(_) => "signed_in",
            AuthEvent::TokenRefreshed(_) => "token_refreshed",
            AuthEvent::SignedOut(_) => "signed_out",
        };
        sink.lock().unwrap().push(name);
    });

    let user_id = Uuid::new_v4();
    let app = test::init_service(create_app(MemoryStore::new(), session.clone())).await;
    let token = AuthHelper::token_for(user_id, Duration::hours(1));

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(AuthHelper::auth_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    assert!(session.current(user_id).is_some());

    let req = test::TestRequest::post()
        .uri("/api/v1/me/sign-out")
        .insert_header(AuthHelper::auth_header(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Signed out");

    assert!(session.current(user_id).is_none());
    assert_eq!(*events.lock().unwrap(), vec!["signed_in", "signed_out"]);
}
