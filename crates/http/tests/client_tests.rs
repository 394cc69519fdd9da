//! Integration tests for the fastadmin HTTP client

#![cfg(feature = "client")]

use fastadmin_http::types::{
    ItemCreate, LoginForm, Paging, UpdatePassword, UserRegister, UserUpdateMe,
};
use fastadmin_http::{
    AuthenticatedAdminClient, ClientError, ErrorDetail, ErrorKind, PublicAdminClient,
    TypedClientBuilder,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
        "email": "admin@example.com",
        "is_active": true,
        "is_superuser": true,
        "full_name": "Admin"
    })
}

#[tokio::test]
async fn test_builder_requires_base_url() {
    let result = TypedClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_builder_trims_trailing_slash() {
    let client = TypedClientBuilder::new()
        .base_url("http://localhost:8000/")
        .build_public()
        .unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
}

#[tokio::test]
async fn test_login_sends_form_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=admin%40example.com"))
        .and(body_string_contains("password=changethis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc.def.ghi",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicAdminClient::new(mock_server.uri()).unwrap();
    let token = client
        .login_access_token(&LoginForm::new("admin@example.com", "changethis"))
        .await
        .unwrap();

    assert_eq!(token.access_token, "abc.def.ghi");
}

#[tokio::test]
async fn test_login_failure_exposes_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "detail": "Incorrect email or password" })),
        )
        .mount(&mock_server)
        .await;

    let client = PublicAdminClient::new(mock_server.uri()).unwrap();
    let err = client
        .login_access_token(&LoginForm::new("nobody@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::BadRequest(_)));
    assert_eq!(
        err.detail(),
        Some(ErrorDetail::Message("Incorrect email or password".into()))
    );
}

#[tokio::test]
async fn test_register_user_posts_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/signup"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "supersecret",
            "full_name": "New User"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicAdminClient::new(mock_server.uri()).unwrap();
    let user = client
        .register_user(&UserRegister {
            email: "new@example.com".into(),
            password: "supersecret".into(),
            full_name: Some("New User".into()),
        })
        .await
        .unwrap();

    assert_eq!(user.email, "admin@example.com");
}

#[tokio::test]
async fn test_authenticated_requests_carry_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AuthenticatedAdminClient::new(mock_server.uri(), "token-123").unwrap();
    let me = client.read_user_me().await.unwrap();

    assert!(me.is_superuser);
    assert_eq!(me.display_name(), "Admin");
}

#[tokio::test]
async fn test_rejected_token_is_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "detail": "Could not validate credentials" })),
        )
        .mount(&mock_server)
        .await;

    let client = PublicAdminClient::new(mock_server.uri())
        .unwrap()
        .authenticate("invalid_token");
    let err = client.read_user_me().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert!(err.is_forbidden());
}

#[tokio::test]
async fn test_list_users_passes_paging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": [user_json()], "count": 11 })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AuthenticatedAdminClient::new(mock_server.uri(), "t").unwrap();
    let users = client
        .list_users(Paging { skip: 10, limit: 5 })
        .await
        .unwrap();

    assert_eq!(users.count, 11);
    assert_eq!(users.data.len(), 1);
}

#[tokio::test]
async fn test_settings_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/users/me"))
        .and(body_json(json!({ "full_name": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/users/me/password"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Password updated successfully" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "User deleted successfully" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AuthenticatedAdminClient::new(mock_server.uri(), "t").unwrap();

    client
        .update_user_me(&UserUpdateMe {
            full_name: Some("Renamed".into()),
            email: None,
        })
        .await
        .unwrap();
    let message = client
        .update_password_me(&UpdatePassword {
            current_password: "old-password".into(),
            new_password: "new-password".into(),
        })
        .await
        .unwrap();
    assert_eq!(message.message, "Password updated successfully");
    client.delete_user_me().await.unwrap();
}

#[tokio::test]
async fn test_item_creation_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/items/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "title"], "msg": "Field required", "type": "missing" }]
        })))
        .mount(&mock_server)
        .await;

    let client = AuthenticatedAdminClient::new(mock_server.uri(), "t").unwrap();
    let err = client
        .create_item(&ItemCreate {
            title: String::new(),
            description: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(err.detail(), Some(ErrorDetail::List(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = PublicAdminClient::new("http://127.0.0.1:9").unwrap();
    let err = client
        .login_access_token(&LoginForm::new("a", "b"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn test_recover_password_encodes_the_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/password-recovery/we%23ird%3Fx@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Password recovery email sent" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicAdminClient::new(mock_server.uri()).unwrap();
    let message = client.recover_password("we#ird?x@example.com").await.unwrap();
    assert_eq!(message.message, "Password recovery email sent");
}

#[tokio::test]
async fn test_recover_password_keeps_plain_addresses_readable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/password-recovery/jane@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "sent" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicAdminClient::new(format!("{}/", mock_server.uri())).unwrap();
    client.recover_password("jane@example.com").await.unwrap();
}
