//! Contract tests for the API client against a mock backend.
//!
//! Verifies request shapes and the transport/server error split for each
//! of the four endpoints.

use serde_json::json;
use titul_core::api::{ApiClient, ApiError, AuthAction};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn login_returns_user() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_partial_json(
            json!({"action": "login", "username": "Neo"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7, "username": "Neo", "coins": 450, "is_admin": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let user = client
        .authenticate(AuthAction::Login, "Neo", "matrix")
        .await
        .unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.coins, 450);
    assert!(!user.is_admin);
}

#[tokio::test]
async fn login_failure_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Неверное имя или пароль"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client
        .authenticate(AuthAction::Login, "Neo", "wrong")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 401,
            message: "Неверное имя или пароль".to_string()
        }
    );
}

#[tokio::test]
async fn profile_fetch_sends_query_and_decodes_snapshot() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "profile"))
        .and(query_param("user_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7, "username": "Neo", "coins": 450, "is_admin": false},
            "titles": [
                {"id": 1, "name": "[NEWBIE]", "price": 0, "color": "text-gray-400",
                 "is_limited": false, "owned": true},
                {"id": 2, "name": "[VIP]", "price": 500, "color": "text-yellow-400",
                 "is_limited": false, "owned": false}
            ],
            "quests": [
                {"id": 1, "title": "Первый визит", "description": "Зайдите на сайт",
                 "reward": 10, "progress": 100, "completed": true}
            ],
            "daily_streak": 3,
            "can_claim_daily": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let snapshot = client.fetch_profile(7).await.unwrap();
    assert_eq!(snapshot.titles.len(), 2);
    assert!(snapshot.titles[0].is_starter());
    assert_eq!(snapshot.quests[0].progress_percent(), 100);
    assert_eq!(snapshot.daily_streak, 3);
    assert!(snapshot.can_claim_daily);
}

#[tokio::test]
async fn buy_title_posts_action_and_returns_new_coins() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_partial_json(json!({
            "action": "buy_title", "user_id": 7, "title_id": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Титул [VIP] успешно куплен!",
            "new_coins": 250
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let outcome = client.buy_title(7, 2).await.unwrap();
    assert_eq!(outcome.new_coins, 250);
}

#[tokio::test]
async fn buy_title_insufficient_funds_is_server_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Недостаточно ТитулКоинов"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.buy_title(7, 5).await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 400, .. }));
}

#[tokio::test]
async fn chat_fetch_passes_limit_and_decodes_messages() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"id": 1, "message": "привет", "username": "Neo", "user_id": 7,
                 "created_at": "2026-08-24T12:00:00.000000"},
                {"id": 2, "message": "hi", "username": "Trinity", "user_id": 8,
                 "created_at": "2026-08-24T12:00:03.000000"}
            ]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let messages = client.fetch_chat(50).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].username, "Trinity");
}

#[tokio::test]
async fn send_chat_posts_body() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(json!({"user_id": 7, "message": "gm"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "message": "gm", "username": "Neo", "user_id": 7,
            "created_at": "2026-08-24T12:01:00.000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let echoed = client.send_chat(7, "gm").await.unwrap();
    assert_eq!(echoed.id, 3);
}

#[tokio::test]
async fn roster_requires_admin() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .and(query_param("admin_id", "9"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "Доступ запрещен"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.fetch_roster(9).await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 403, .. }));
}

#[tokio::test]
async fn grant_coins_round_trip() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin"))
        .and(body_partial_json(json!({
            "admin_id": 1, "user_id": 7, "coins": 200
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Пользователю Neo выдано 200 ТитулКоинов",
            "new_coins": 650
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let outcome = client.grant_coins(1, 7, 200).await.unwrap();
    assert_eq!(outcome.new_coins, 650);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Port 1 is never listening.
    let client = ApiClient::new("http://127.0.0.1:1");
    let err = client.fetch_chat(50).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn error_without_body_uses_status_reason() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.fetch_profile(7).await.unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert!(!message.is_empty());
        }
        ApiError::Transport(other) => panic!("expected server error, got transport: {other}"),
    }
}
