//! API integration tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use reqwest::StatusCode;

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "api");
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn test_signup() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.user.role, "USER");
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    // Snowflake IDs come back as decimal strings
    assert!(auth.user.id.parse::<i64>().is_ok());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    server.post("/api/auth/signup", &request).await.unwrap();

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_IN_USE");
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.password = "short".to_string();

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_signup_rejects_malformed_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.email = "not-an-email".to_string();

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup_req).await.unwrap();
    let signup: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let login_req = LoginRequest::from_signup(&signup_req);
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(login.user.id, signup.user.id);
    // A fresh session gets its own refresh token
    assert_ne!(login.refresh_token, signup.refresh_token);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    server.post("/api/auth/signup", &signup_req).await.unwrap();

    // Wrong password for a real account
    let response = server
        .post(
            "/api/auth/login",
            &LoginRequest {
                email: signup_req.email.clone(),
                password: "wrong-password".to_string(),
            },
        )
        .await
        .unwrap();
    let wrong_password: ErrorResponse =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Unknown account entirely
    let response = server
        .post(
            "/api/auth/login",
            &LoginRequest {
                email: "ghost@example.com".to_string(),
                password: signup_req.password.clone(),
            },
        )
        .await
        .unwrap();
    let unknown_email: ErrorResponse =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Identical code and message either way
    assert_eq!(wrong_password.error.code, "INVALID_CREDENTIALS");
    assert_eq!(unknown_email.error.code, "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.error.message, unknown_email.error.message);
}

// ============================================================================
// Refresh rotation
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: auth.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let rotated: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!rotated.access_token.is_empty());
    assert_ne!(rotated.refresh_token, auth.refresh_token);

    // The new access token is immediately usable
    let response = server
        .get_auth("/api/me", &rotated.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_refresh_replay_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let old_token = auth.refresh_token;

    // First rotation wins
    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: old_token.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Replaying the spent token is an unambiguous rejection
    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: old_token,
            },
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_refresh_unknown_token_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: "never-issued".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_is_idempotent() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let logout_req = LogoutRequest {
        refresh_token: auth.refresh_token.clone(),
    };

    // Logout succeeds, and succeeds again on the already-revoked token
    let response = server.post("/api/auth/logout", &logout_req).await.unwrap();
    let ack: AckResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.ok);

    let response = server.post("/api/auth/logout", &logout_req).await.unwrap();
    let ack: AckResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.ok);

    // The token can no longer be rotated
    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Current user
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth("/api/me", &auth.access_token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, auth.user.id);
    assert_eq!(user.email, signup_req.email);
    assert_eq!(user.role, "USER");
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/api/me", "garbage.token.here").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Full session lifecycle
// ============================================================================

#[tokio::test]
async fn test_session_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Signup
    let signup_req = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup_req).await.unwrap();
    let signup: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Login produces a second, independent session
    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup_req))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Rotate the login session's token
    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: login.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let rotated: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // The signup session's token is untouched by the rotation
    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: signup.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Logout the rotated session and verify it is dead
    let response = server
        .post(
            "/api/auth/logout",
            &LogoutRequest {
                refresh_token: rotated.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/auth/refresh",
            &RefreshRequest {
                refresh_token: rotated.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
