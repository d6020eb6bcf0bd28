use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nebula_art::api::{ApiClient, ArtSource, RegisterRequest};
use nebula_art::config::ClientOptions;
use nebula_art::error::Error;

fn client_for(server: &MockServer) -> ApiClient {
    let options = ClientOptions::default()
        .with_base_url(&server.uri())
        .unwrap();
    ApiClient::new(options)
}

fn session_body() -> serde_json::Value {
    json!({
        "user": {
            "id": "u1",
            "name": "Mei",
            "email": "mei@example.com",
            "isArtist": false,
            "followers": 3
        },
        "token": "tok-123"
    })
}

#[tokio::test]
async fn fetch_artworks_sends_paging_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/artworks"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "a21",
                "title": "Autumn",
                "image": "a21.jpg",
                "artist": { "id": "x", "name": "Xu", "avatar": "x.jpg" },
                "stats": { "likes": 4, "comments": 1 },
                "createdAt": "2024-03-01T00:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let artworks = client_for(&server).fetch_artworks(20, 10).await.unwrap();

    assert_eq!(artworks.len(), 1);
    assert_eq!(artworks[0].id, "a21");
    assert_eq!(artworks[0].artist.name, "Xu");
    assert_eq!(artworks[0].stats.likes, 4);
    assert!(artworks[0].created_at.is_some());
    assert!(!artworks[0].is_liked, "missing viewer flags default to false");
}

#[tokio::test]
async fn list_endpoint_rejects_non_array_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/artists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "artists": [] })))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_artists().await;

    match result {
        Err(Error::UnexpectedResponse(_)) => {}
        other => panic!("Expected UnexpectedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn server_errors_carry_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/curations"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_curations().await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn slow_requests_time_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/artists"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let options = ClientOptions::default()
        .with_base_url(&server.uri())
        .unwrap()
        .with_request_timeout(Some(Duration::from_millis(50)));
    let err = ApiClient::new(options).fetch_artists().await.unwrap_err();

    assert!(matches!(err, Error::Timeout(_)), "got {:?}", err);
    assert!(err.is_network());
}

#[tokio::test]
async fn login_attaches_the_token_to_later_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "mei@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "name": "Mei"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.get_profile().await.is_err(), "profile needs a session");

    let session = client.login("mei@example.com", "pw").await.unwrap();
    assert_eq!(session.token, "tok-123");
    assert_eq!(client.token().as_deref(), Some("tok-123"));

    let user = session.into_session_user();
    assert_eq!(user.token.as_deref(), Some("tok-123"));
    assert_eq!(user.followers, 3);

    let profile = client.get_profile().await.unwrap();
    assert_eq!(profile.name, "Mei");
}

#[tokio::test]
async fn failed_login_keeps_the_client_signed_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad credentials" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.login("mei@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, Error::Api { status: 401, .. }));
    assert!(client.token().is_none());
}

#[tokio::test]
async fn incomplete_registration_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .expect(0)
        .mount(&server)
        .await;

    let request = RegisterRequest {
        name: "  ".to_string(),
        email: "mei@example.com".to_string(),
        password: "pw".to_string(),
        is_artist: false,
    };

    let err = client_for(&server).register(&request).await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn register_signs_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "Mei",
            "email": "mei@example.com",
            "password": "pw",
            "isArtist": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = RegisterRequest {
        name: "Mei".to_string(),
        email: "mei@example.com".to_string(),
        password: "pw".to_string(),
        is_artist: true,
    };

    let session = client.register(&request).await.unwrap();
    assert_eq!(session.user.id, "u1");
    assert_eq!(client.token().as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn logout_clears_the_token_even_when_the_server_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.login("mei@example.com", "pw").await.unwrap();

    assert!(client.logout().await.is_err());
    assert!(client.token().is_none());
}

#[tokio::test]
async fn health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let health = client_for(&server).health_check().await.unwrap();
    assert_eq!(health.status, "ok");
}
