//! Integration tests for the session client: token decoration, 401 recovery,
//! the checkout refresh exception, and error surfacing. Each test runs the
//! real request stack against a local mock backend.

mod support;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use client::api::models::{CreateOrderRequest, LoginRequest, NewOrderItem};
use client::api::{AuthApi, OrderApi, ProductApi};
use client::net::paths;
use client::ui::redirect::{ADMIN_LOGIN_PAGE, CLIENT_LOGIN_PAGE};
use client::ui::SESSION_EXPIRED_MESSAGE;
use client::{
    ClientError, MemorySessionStore, Payload, RequestOptions, Role, Session, SessionStore,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use support::{new_client, RecordingNavigator, RecordingNotifier};

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

#[derive(Default)]
struct HeaderTrap {
    auth: Mutex<Vec<Option<String>>>,
    accept: Mutex<Vec<Option<String>>>,
}

async fn trap_handler(
    State(trap): State<Arc<HeaderTrap>>,
    headers: HeaderMap,
) -> Json<Value> {
    trap.auth.lock().unwrap().push(bearer_of(&headers));
    trap.accept.lock().unwrap().push(
        headers
            .get("accept")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
    );
    Json(json!({"ok": true}))
}

#[tokio::test]
async fn requests_carry_the_stored_bearer_token() {
    let trap = Arc::new(HeaderTrap::default());
    let app = Router::new()
        .route(paths::PRODUCTS, get(trap_handler))
        .with_state(Arc::clone(&trap));
    let base = support::serve(app).await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "T",
        Role::Customer,
        1,
    )));
    let client = new_client(
        &base,
        store,
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new("/pages/client/products.html")),
    );

    let result = client
        .request(paths::PRODUCTS, RequestOptions::get())
        .await
        .unwrap();

    assert!(matches!(result, Some(Payload::Json(_))));
    assert_eq!(
        trap.auth.lock().unwrap().clone(),
        vec![Some("Bearer T".to_string())]
    );
}

#[tokio::test]
async fn anonymous_requests_send_no_authorization_header() {
    let trap = Arc::new(HeaderTrap::default());
    let app = Router::new()
        .route(paths::PRODUCTS, get(trap_handler))
        .with_state(Arc::clone(&trap));
    let base = support::serve(app).await;

    let client = new_client(
        &base,
        Arc::new(MemorySessionStore::new()),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new("/pages/client/products.html")),
    );

    let result = client
        .request(paths::PRODUCTS, RequestOptions::get())
        .await
        .unwrap();

    // The request is not blocked client-side; it just travels bare.
    assert!(result.is_some());
    assert_eq!(trap.auth.lock().unwrap().clone(), vec![None::<String>]);
}

#[tokio::test]
async fn caller_headers_override_the_defaults() {
    let trap = Arc::new(HeaderTrap::default());
    let app = Router::new()
        .route(paths::PRODUCTS, get(trap_handler))
        .with_state(Arc::clone(&trap));
    let base = support::serve(app).await;

    let client = new_client(
        &base,
        Arc::new(MemorySessionStore::new()),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new("/pages/client/products.html")),
    );

    let options = RequestOptions::get().header(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("text/csv"),
    );
    client.request(paths::PRODUCTS, options).await.unwrap();

    assert_eq!(
        trap.accept.lock().unwrap().clone(),
        vec![Some("text/csv".to_string())]
    );
}

async fn unauthorized_handler() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthorized"})),
    )
}

#[tokio::test]
async fn generic_401_clears_session_notifies_and_redirects() {
    let app = Router::new().route("/api/users", get(unauthorized_handler));
    let base = support::serve(app).await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "T",
        Role::Admin,
        42,
    )));
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::new("/pages/admin/user-list.html"));
    let client = new_client(
        &base,
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::clone(&notifier),
        Arc::clone(&navigator),
    );

    let result = client
        .request(paths::USERS, RequestOptions::get())
        .await
        .unwrap();

    // Aborted, not an empty success.
    assert_eq!(result, None);
    assert_eq!(store.get().await, None);
    assert_eq!(notifier.errors(), vec![SESSION_EXPIRED_MESSAGE.to_string()]);

    // The redirect is deferred so the notification can be seen.
    assert!(navigator.visited().is_empty());
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(navigator.visited(), vec![ADMIN_LOGIN_PAGE.to_string()]);
}

#[tokio::test]
async fn a_401_on_the_login_page_never_navigates() {
    let app = Router::new().route("/api/users", get(unauthorized_handler));
    let base = support::serve(app).await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "T",
        Role::Admin,
        42,
    )));
    let navigator = Arc::new(RecordingNavigator::new(ADMIN_LOGIN_PAGE));
    let client = new_client(
        &base,
        store,
        Arc::new(RecordingNotifier::default()),
        Arc::clone(&navigator),
    );

    let result = client
        .request(paths::USERS, RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(result, None);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(navigator.visited().is_empty());
}

struct CheckoutBackend {
    orders_auth: Mutex<Vec<Option<String>>>,
    refresh_calls: AtomicUsize,
    refresh_succeeds: bool,
}

async fn checkout_orders(
    State(backend): State<Arc<CheckoutBackend>>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> impl IntoResponse {
    let mut seen = backend.orders_auth.lock().unwrap();
    seen.push(bearer_of(&headers));
    if seen.len() == 1 {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({"data": {"orderUuid": "ord-1"}})),
        )
    }
}

async fn checkout_refresh(State(backend): State<Arc<CheckoutBackend>>) -> impl IntoResponse {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if backend.refresh_succeeds {
        (StatusCode::OK, Json(json!({"token": "T2"})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        )
    }
}

fn checkout_router(backend: Arc<CheckoutBackend>) -> Router {
    Router::new()
        .route(paths::ORDERS, post(checkout_orders))
        .route(paths::AUTH_REFRESH_TOKEN, post(checkout_refresh))
        .with_state(backend)
}

fn sample_order() -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![NewOrderItem {
            product_id: 7,
            product_name: "Keyboard".to_string(),
            product_price: 59.9,
            quantity: 1,
        }],
        total_amount: 59.9,
        receiver: "Alex".to_string(),
        receiver_phone: "13800000000".to_string(),
        address: "1 Main Street".to_string(),
        remark: None,
        from_cart: false,
    }
}

#[tokio::test]
async fn checkout_401_refreshes_once_and_retries_with_the_new_token() {
    let backend = Arc::new(CheckoutBackend {
        orders_auth: Mutex::new(Vec::new()),
        refresh_calls: AtomicUsize::new(0),
        refresh_succeeds: true,
    });
    let base = support::serve(checkout_router(Arc::clone(&backend))).await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "T",
        Role::Customer,
        1,
    )));
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::new("/pages/client/create-order.html"));
    let client = new_client(
        &base,
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::clone(&notifier),
        Arc::clone(&navigator),
    );

    let created = OrderApi::new(&client)
        .create(&sample_order())
        .await
        .unwrap()
        .expect("checkout must not be auth-aborted");

    assert_eq!(created.order_uuid(), Some("ord-1"));
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        backend.orders_auth.lock().unwrap().clone(),
        vec![
            Some("Bearer T".to_string()),
            Some("Bearer T2".to_string())
        ]
    );

    // The refreshed token is persisted with role and user id intact.
    let session = store.get().await.unwrap();
    assert_eq!(session.token, "T2");
    assert_eq!(session.role, Role::Customer);
    assert_eq!(session.user_id, 1);

    // No redirect and no session-expired notification on this path.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(navigator.visited().is_empty());
    assert!(notifier.errors().is_empty());
}

#[tokio::test]
async fn checkout_fails_explicitly_when_the_refresh_is_rejected() {
    let backend = Arc::new(CheckoutBackend {
        orders_auth: Mutex::new(Vec::new()),
        refresh_calls: AtomicUsize::new(0),
        refresh_succeeds: false,
    });
    let base = support::serve(checkout_router(Arc::clone(&backend))).await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "T",
        Role::Customer,
        1,
    )));
    let navigator = Arc::new(RecordingNavigator::new("/pages/client/create-order.html"));
    let client = new_client(
        &base,
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::new(RecordingNotifier::default()),
        Arc::clone(&navigator),
    );

    let result = OrderApi::new(&client).create(&sample_order()).await;
    assert!(matches!(result, Err(ClientError::SessionExpired { .. })));

    // Checkout state survives: no redirect, session untouched.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(navigator.visited().is_empty());
    assert!(store.get().await.is_some());
}

#[tokio::test]
async fn server_error_messages_surface_verbatim() {
    async fn conflict() -> impl IntoResponse {
        (
            StatusCode::CONFLICT,
            Json(json!({"message": "stock insufficient"})),
        )
    }
    let app = Router::new().route("/api/products/9", get(conflict));
    let base = support::serve(app).await;

    let client = new_client(
        &base,
        Arc::new(MemorySessionStore::new()),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new("/pages/client/products.html")),
    );

    let error = ProductApi::new(&client).get(9).await.unwrap_err();
    assert_eq!(error.to_string(), "stock insufficient");
    assert_eq!(error.status(), Some(409));
}

#[tokio::test]
async fn status_text_is_the_fallback_error_message() {
    async fn blank_failure() -> impl IntoResponse {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    let app = Router::new().route(paths::PRODUCTS, get(blank_failure));
    let base = support::serve(app).await;

    let client = new_client(
        &base,
        Arc::new(MemorySessionStore::new()),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new("/pages/client/products.html")),
    );

    let error = client
        .request(paths::PRODUCTS, RequestOptions::get())
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn non_json_success_bodies_come_back_as_text() {
    async fn plain() -> &'static str {
        "pong"
    }
    let app = Router::new().route("/api/ping", get(plain));
    let base = support::serve(app).await;

    let client = new_client(
        &base,
        Arc::new(MemorySessionStore::new()),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new("/pages/client/index.html")),
    );

    let payload = client
        .request("/api/ping", RequestOptions::get())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payload.as_text(), Some("pong"));
}

#[tokio::test]
async fn typed_listing_accepts_the_data_envelope() {
    async fn products() -> Json<Value> {
        Json(json!({
            "data": {
                "list": [{
                    "productId": 7,
                    "productName": "Keyboard",
                    "price": 59.9,
                    "stock": 12,
                    "status": 1
                }],
                "total": 1,
                "pageNum": 1,
                "pageSize": 10
            }
        }))
    }
    let app = Router::new().route(paths::PRODUCTS, get(products));
    let base = support::serve(app).await;

    let client = new_client(
        &base,
        Arc::new(MemorySessionStore::new()),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new("/pages/client/products.html")),
    );

    let page = ProductApi::new(&client)
        .list(1, 10)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.list[0].product_name, "Keyboard");
    assert!(page.list[0].is_available());
}

#[tokio::test]
async fn login_persists_the_returned_session() {
    async fn login(Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(body["username"], "admin");
        Json(json!({"data": {"token": "T", "role": 1, "userId": 42}}))
    }
    let app = Router::new().route(paths::AUTH_LOGIN, post(login));
    let base = support::serve(app).await;

    let store = Arc::new(MemorySessionStore::new());
    let client = new_client(
        &base,
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::new(ADMIN_LOGIN_PAGE)),
    );

    let session = AuthApi::new(&client)
        .login(&LoginRequest {
            username: "admin".to_string(),
            password: "secret".to_string(),
            captcha: Some("7".to_string()),
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.user_id, 42);
    assert_eq!(store.get().await, Some(session));
}

#[tokio::test]
async fn logout_clears_locally_even_when_the_server_rejects() {
    async fn rejecting_logout() -> impl IntoResponse {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    let app = Router::new().route(paths::AUTH_LOGOUT, post(rejecting_logout));
    let base = support::serve(app).await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "T",
        Role::Customer,
        1,
    )));
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::new("/pages/client/cart.html"));
    let client = new_client(
        &base,
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::clone(&notifier),
        Arc::clone(&navigator),
    );

    client.logout().await.unwrap();

    assert_eq!(store.get().await, None);
    assert_eq!(notifier.successes(), vec!["Signed out".to_string()]);
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(navigator.visited(), vec![CLIENT_LOGIN_PAGE.to_string()]);
}

#[tokio::test]
async fn declined_logout_confirmation_changes_nothing() {
    let app = Router::new();
    let base = support::serve(app).await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "T",
        Role::Customer,
        1,
    )));
    let navigator = Arc::new(RecordingNavigator::new("/pages/client/cart.html"));
    let client = client::SessionClient::new(
        support::test_config(&base),
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::new(RecordingNotifier::default()),
        Arc::clone(&navigator) as Arc<dyn client::ui::Navigator>,
        Arc::new(support::Confirm(false)),
    )
    .unwrap();

    client.logout().await.unwrap();

    assert!(store.get().await.is_some());
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(navigator.visited().is_empty());
}
