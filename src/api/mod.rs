// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{credential::API_KEY_HEADER, middleware::require_auth, Controller, Principal, RouteTable, Strategy},
    error::{ErrorBody, ErrorMessage},
    models::{CreateUserRequest, DemoTokenResponse, HealthResponse, UpdateUserRequest, User},
    state::AppState,
};

pub mod auth;
pub mod extractors;
pub mod health;
pub mod users;

/// Authentication policy of every route served by [`router`].
///
/// Health is public at the controller level; the demo token endpoint is
/// public at the handler level; `/auth/me` only accepts bearer tokens.
pub fn route_table() -> RouteTable {
    let health = Controller::new("/api/health").public();
    let auth = Controller::new("/api/auth");
    let users = Controller::new("/api/users");

    RouteTable::new()
        .with(health.handler(Method::GET, ""))
        .with(auth.handler(Method::POST, "/demo-token").public())
        .with(auth.handler(Method::GET, "/me").strategy(Strategy::BearerOnly))
        .with(users.handler(Method::GET, ""))
        .with(users.handler(Method::POST, ""))
        .with(users.handler(Method::GET, "/{id}"))
        .with(users.handler(Method::PUT, "/{id}"))
        .with(users.handler(Method::DELETE, "/{id}"))
}

/// CORS for the browser frontend: one origin, credentials allowed.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, API_KEY_HEADER]))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/demo-token", post(auth::demo_token))
        .route("/api/auth/me", get(auth::me))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs-json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "JWT-auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api-key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Scaffold API", description = "Users REST API with JWT and API key authentication"),
    paths(
        health::health,
        auth::demo_token,
        auth::me,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            UpdateUserRequest,
            DemoTokenResponse,
            HealthResponse,
            Principal,
            ErrorBody,
            ErrorMessage
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Token endpoints"),
        (name = "users", description = "User management endpoints")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::error::AUTH_REQUIRED_MESSAGE;
    use crate::config::AppConfig;
    use crate::store::InMemoryStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    const SECRET: &str = "router-test-secret";
    const API_KEY: &str = "router-key";

    fn app() -> Router {
        let config = AppConfig::from_lookup(|name| match name {
            "JWT_SECRET" => Some(SECRET.to_string()),
            "API_KEYS" => Some(format!("{API_KEY},second-key")),
            _ => None,
        })
        .unwrap();
        let state = AppState::new(InMemoryStore::seeded(), &config.auth, route_table());
        router(state, cors_layer(&config.cors_origin).unwrap())
    }

    fn request(method: Method, uri: &str) -> axum::http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn demo_token(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(request(Method::POST, "/api/auth/demo-token").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["expiresIn"], "1d");
        body["accessToken"].as_str().unwrap().to_string()
    }

    #[test]
    fn every_route_has_a_policy() {
        assert_eq!(route_table().len(), 8);
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .oneshot(request(Method::GET, "/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn health_ignores_bad_credentials() {
        let response = app()
            .oneshot(
                request(Method::GET, "/api/health")
                    .header("X-API-Key", "wrong")
                    .header("Authorization", "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn users_require_authentication() {
        let response = app()
            .oneshot(request(Method::GET, "/api/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response).await;
        assert_eq!(body["statusCode"], 401);
        assert_eq!(body["message"], AUTH_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn users_accept_api_key() {
        let response = app()
            .oneshot(
                request(Method::GET, "/api/users")
                    .header("X-API-Key", API_KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn users_reject_api_key_in_query() {
        let response = app()
            .oneshot(
                request(Method::GET, &format!("/api/users?api_key={API_KEY}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn demo_token_authenticates_users_and_me() {
        let app = app();
        let token = demo_token(&app).await;

        let response = app
            .clone()
            .oneshot(
                request(Method::GET, "/api/users/1")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "John Doe");

        let response = app
            .oneshot(
                request(Method::GET, "/api/auth/me")
                    .header("Cookie", format!("access_token={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["sub"], "demo-user-id");
        assert_eq!(body["email"], "demo@example.com");
        assert_eq!(body["roles"], serde_json::json!(["user"]));
        assert_eq!(body["isServiceAccount"], false);
    }

    #[tokio::test]
    async fn me_accepts_hs512_token_without_exp() {
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS512),
            &serde_json::json!({ "sub": "external-user", "email": "ext@example.com" }),
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let response = app()
            .oneshot(
                request(Method::GET, "/api/auth/me")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["sub"], "external-user");
    }

    #[tokio::test]
    async fn me_rejects_api_key() {
        let response = app()
            .oneshot(
                request(Method::GET, "/api/auth/me")
                    .header("X-API-Key", API_KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["message"], "Bearer token is missing");
    }

    #[tokio::test]
    async fn invalid_api_key_falls_through_to_bearer() {
        let app = app();
        let token = demo_token(&app).await;

        let response = app
            .oneshot(
                request(Method::GET, "/api/users")
                    .header("X-API-Key", "not-a-key")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_update_delete_user() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                request(Method::POST, "/api/users")
                    .header("X-API-Key", API_KEY)
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"name":"Ada Lovelace","email":"ada@example.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["name"], "Ada Lovelace");

        let response = app
            .clone()
            .oneshot(
                request(Method::PUT, &format!("/api/users/{id}"))
                    .header("X-API-Key", API_KEY)
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"email":"ada@lovelace.dev"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["email"], "ada@lovelace.dev");
        assert_eq!(updated["name"], "Ada Lovelace");

        let response = app
            .clone()
            .oneshot(
                request(Method::DELETE, &format!("/api/users/{id}"))
                    .header("X-API-Key", API_KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                request(Method::GET, &format!("/api/users/{id}"))
                    .header("X-API-Key", API_KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await["message"],
            format!("User with ID {id} not found")
        );
    }

    #[tokio::test]
    async fn create_user_validates_body() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                request(Method::POST, "/api/users")
                    .header("X-API-Key", API_KEY)
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"name":"A","email":"nope"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"].as_array().unwrap().len(), 2);

        let response = app
            .oneshot(
                request(Method::POST, "/api/users")
                    .header("X-API-Key", API_KEY)
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"name":"Ada","email":"ada@example.com","role":"admin"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unauthenticated_write_never_reaches_store() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                request(Method::DELETE, "/api/users/1")
                    .header("X-API-Key", "not-a-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                request(Method::GET, "/api/users/1")
                    .header("X-API-Key", API_KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(request(Method::GET, "/api/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn openapi_document_is_served_without_auth() {
        let response = app()
            .oneshot(request(Method::GET, "/api/docs-json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["paths"]["/api/users/{id}"].is_object());
        assert!(body["components"]["securitySchemes"]["api-key"].is_object());
    }
}
