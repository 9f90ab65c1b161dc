//! Route table

use std::path::Path;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::v1;

/// Build the full application router
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route("/products", get(v1::products::list).post(v1::products::create))
        .route("/products/mine", get(v1::products::list_mine))
        .route(
            "/products/{id}",
            get(v1::products::get)
                .put(v1::products::update)
                .delete(v1::products::delete),
        )
        .route("/cart", get(v1::cart::list).post(v1::cart::add_item))
        .route("/cart/{product_id}", delete(v1::cart::remove_item))
        .route("/checkout", post(v1::cart::checkout))
        .route("/orders", get(v1::orders::list).post(v1::orders::place))
        .route("/orders/{id}", put(v1::orders::update_status))
        .route("/jobs", get(v1::jobs::list).post(v1::jobs::post))
        .route("/jobs/{id}", delete(v1::jobs::delete))
        .route("/notifications", get(v1::notifications::list))
        .route("/notifications/{id}/read", post(v1::notifications::mark_read))
        .route("/voice/transcribe", post(v1::voice::transcribe))
        .route("/voice/synthesize", post(v1::voice::synthesize))
        .route("/chatbot", post(v1::chatbot::chat));

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .nest("/auth", auth_routes)
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{Cart, JobPosting, Notification, Order, Product};
    use crate::infrastructure::assets::mock::MockAssetStore;
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::cart::CartService;
    use crate::infrastructure::catalog::CatalogService;
    use crate::infrastructure::job::JobService;
    use crate::infrastructure::notification::NotificationService;
    use crate::infrastructure::order::OrderService;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::password::mock::PlainHasher;
    use crate::infrastructure::user::{InMemoryUserRepository, UserService};

    fn test_app() -> Router {
        let products = Arc::new(InMemoryStorage::<Product>::new());
        let orders = Arc::new(InMemoryStorage::<Order>::new());
        let notifications = Arc::new(InMemoryStorage::<Notification>::new());
        let assets = Arc::new(MockAssetStore::default());

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(PlainHasher),
            )),
            catalog_service: Arc::new(CatalogService::new(products.clone(), assets.clone())),
            cart_service: Arc::new(CartService::new(
                Arc::new(InMemoryStorage::<Cart>::new()),
                products,
                orders.clone(),
                notifications.clone(),
            )),
            order_service: Arc::new(OrderService::new(orders)),
            job_service: Arc::new(JobService::new(Arc::new(
                InMemoryStorage::<JobPosting>::new(),
            ))),
            notification_service: Arc::new(NotificationService::new(notifications)),
            jwt_service: Arc::new(JwtService::new(&JwtConfig::default())),
            assets,
            transcriber: None,
            synthesizer: None,
            chatbot: None,
        };

        create_router(state, "static")
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register(app: &Router, email: &str, role: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/register",
                serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": "a-long-password",
                    "role": role,
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        body_json(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_and_live() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_products_are_public() {
        let app = test_app();

        let response = app
            .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_cart_requires_auth() {
        let app = test_app();

        let response = app
            .oneshot(Request::get("/api/cart").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "authentication_error");
    }

    #[tokio::test]
    async fn test_register_login_me_flow() {
        let app = test_app();
        register(&app, "asha@example.com", "seller").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                serde_json::json!({
                    "email": "asha@example.com",
                    "password": "a-long-password",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::get("/auth/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["email"], "asha@example.com");
        assert_eq!(body["role"], "seller");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let app = test_app();
        register(&app, "asha@example.com", "seller").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/login",
                serde_json::json!({
                    "email": "asha@example.com",
                    "password": "wrong-password",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_404() {
        let app = test_app();
        let token = register(&app, "ravi@example.com", "buyer").await;

        let mut request = json_request(
            "POST",
            "/api/cart",
            serde_json::json!({"product_id": "no-such-product", "quantity": 1}),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_job_board_forbidden_for_buyers() {
        let app = test_app();
        let token = register(&app, "ravi@example.com", "buyer").await;

        let response = app
            .oneshot(
                Request::get("/api/jobs")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_chatbot_falls_back_when_unconfigured() {
        let app = test_app();
        let token = register(&app, "ravi@example.com", "buyer").await;

        let mut request = json_request(
            "POST",
            "/api/chatbot",
            serde_json::json!({"message": "hello"}),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("trouble connecting"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_error() {
        let app = test_app();
        let token = register(&app, "ravi@example.com", "buyer").await;

        let response = app
            .oneshot(
                Request::post("/api/cart")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }
}
