//! End-to-end tests for the cart -> checkout -> confirmation flow, run
//! against an in-memory store and a scripted remote API.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use url::Url;

use bluefruit_app::api::types::{CreatedOrder, OrderPayload, Registration};
use bluefruit_app::api::{ApiError, RemoteApi};
use bluefruit_app::config::{AppConfig, CartScope};
use bluefruit_app::models::{AddressForm, NewLineItem, Product, Session};
use bluefruit_app::services::{CheckoutError, CheckoutState};
use bluefruit_app::state::App;
use bluefruit_app::store::{KeyValueStore, MemoryStore, keys};
use bluefruit_core::{CustomerRole, Email, Money, ProductId, ServerOrderId};
use rust_decimal::Decimal;

// =============================================================================
// Test Doubles
// =============================================================================

/// Scripted API: the first `fail_orders` submissions fail, the rest
/// succeed. Every received payload is recorded.
struct FakeApi {
    role: CustomerRole,
    fail_orders: AtomicUsize,
    orders: Mutex<Vec<OrderPayload>>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            role: CustomerRole::Customer,
            fail_orders: AtomicUsize::new(0),
            orders: Mutex::new(Vec::new()),
        }
    }

    fn failing_first(failures: usize) -> Self {
        let api = Self::new();
        api.fail_orders.store(failures, Ordering::SeqCst);
        api
    }

    fn with_role(role: CustomerRole) -> Self {
        let mut api = Self::new();
        api.role = role;
        api
    }

    async fn recorded_orders(&self) -> Vec<OrderPayload> {
        self.orders.lock().await.clone()
    }
}

fn unsupported() -> ApiError {
    ApiError::Status {
        status: 501,
        message: "not scripted".to_owned(),
    }
}

#[async_trait]
impl RemoteApi for FakeApi {
    async fn login(&self, email: &Email, _password: &str) -> Result<Session, ApiError> {
        Ok(Session {
            user_id: "C1".into(),
            name: "Juan Pérez".to_owned(),
            email: email.clone(),
            role: self.role,
        })
    }

    async fn create_order(&self, order: &OrderPayload) -> Result<CreatedOrder, ApiError> {
        self.orders.lock().await.push(order.clone());

        let remaining = self.fail_orders.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_orders.store(remaining - 1, Ordering::SeqCst);
            return Err(ApiError::Status {
                status: 503,
                message: "service unavailable".to_owned(),
            });
        }

        Ok(CreatedOrder {
            id: ServerOrderId::new("SRV-1"),
        })
    }

    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        Err(unsupported())
    }

    async fn product(&self, _id: &ProductId) -> Result<Product, ApiError> {
        Err(unsupported())
    }

    async fn random_product(&self) -> Result<Product, ApiError> {
        Err(unsupported())
    }

    async fn request_recovery_code(&self, _email: &Email) -> Result<(), ApiError> {
        Err(unsupported())
    }

    async fn verify_recovery_code(&self, _email: &Email, _code: &str) -> Result<(), ApiError> {
        Err(unsupported())
    }

    async fn set_new_password(
        &self,
        _email: &Email,
        _code: &str,
        _new_password: &str,
    ) -> Result<(), ApiError> {
        Err(unsupported())
    }

    async fn register_customer(&self, _registration: &Registration) -> Result<(), ApiError> {
        Err(unsupported())
    }

    async fn verify_email_code(&self, _email: &Email, _code: &str) -> Result<(), ApiError> {
        Err(unsupported())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn test_config(cart_scope: CartScope) -> AppConfig {
    AppConfig {
        api_base_url: Url::parse("https://example.com/api/").unwrap(),
        data_dir: std::path::PathBuf::from("."),
        request_timeout: Duration::from_secs(20),
        cart_scope,
    }
}

fn app_with(api: Arc<FakeApi>, store: Arc<MemoryStore>, cart_scope: CartScope) -> App {
    App::assemble(test_config(cart_scope), store, api)
}

fn valid_form() -> AddressForm {
    let mut form = AddressForm::new();
    form.set_phone("7123-4567");
    form.set_house_number("Casa #25");
    form.select_department("Ahuachapán").unwrap();
    form.select_municipality("Atiquizaya").unwrap();
    form
}

fn gel(quantity: u32) -> NewLineItem {
    NewLineItem {
        product_id: ProductId::new("P1"),
        name: "Ener Kik".to_owned(),
        unit_price: Money::new("4.50".parse::<Decimal>().unwrap()),
        quantity,
        variant_label: "Naranja".to_owned(),
        image_ref: "https://img.example/gel.png".to_owned(),
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

#[tokio::test]
async fn test_successful_checkout_clears_cart() {
    let api = Arc::new(FakeApi::new());
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store.clone(), CartScope::Device);

    app.cart().add(gel(2)).await;
    let session = app.session().login("juan@correo.com", "secreta").await.unwrap();

    let confirmation = app
        .checkout()
        .submit(&valid_form(), Some(&session))
        .await
        .unwrap();

    assert_eq!(confirmation.total.display(), "$9.00");
    assert_eq!(confirmation.user_id, Some("C1".into()));
    assert_eq!(
        confirmation.server_order_id,
        Some(ServerOrderId::new("SRV-1"))
    );
    assert_eq!(app.checkout().state(), CheckoutState::Confirmed);

    // Persisted cart is empty after confirmation
    assert_eq!(store.get(keys::CART).await.unwrap(), Some("[]".to_owned()));
    assert!(app.cart_view().await.is_empty());

    // Transient checkout data is discarded
    assert_eq!(store.get(keys::SHIPPING_ADDRESS).await.unwrap(), None);
    assert_eq!(store.get(keys::DRAFT_ORDER).await.unwrap(), None);
}

#[tokio::test]
async fn test_failed_submission_preserves_cart_exactly() {
    let api = Arc::new(FakeApi::failing_first(1));
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store.clone(), CartScope::Device);

    app.cart().add(gel(2)).await;
    let before = store.get(keys::CART).await.unwrap().unwrap();

    let err = app.checkout().submit(&valid_form(), None).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Submission(_)));
    assert_eq!(app.checkout().state(), CheckoutState::Failed);

    // Byte-for-byte unchanged
    let after = store.get(keys::CART).await.unwrap().unwrap();
    assert_eq!(before, after);

    // The draft is retained for retry
    assert!(app.checkout().failed_order().await.is_some());
}

#[tokio::test]
async fn test_retry_reuses_order_number() {
    let api = Arc::new(FakeApi::failing_first(1));
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store, CartScope::Device);

    app.cart().add(gel(1)).await;
    app.checkout().submit(&valid_form(), None).await.unwrap_err();

    let confirmation = app.checkout().retry().await.unwrap();

    let orders = api.recorded_orders().await;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_number, orders[1].order_number);
    assert_eq!(confirmation.order_number.as_str(), orders[0].order_number);
}

#[tokio::test]
async fn test_consecutive_retries_never_change_the_number() {
    let api = Arc::new(FakeApi::failing_first(3));
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store, CartScope::Device);

    app.cart().add(gel(1)).await;
    app.checkout().submit(&valid_form(), None).await.unwrap_err();
    app.checkout().retry().await.unwrap_err();
    app.checkout().retry().await.unwrap_err();
    app.checkout().retry().await.unwrap();

    let orders = api.recorded_orders().await;
    assert_eq!(orders.len(), 4);
    let number = &orders[0].order_number;
    assert!(orders.iter().all(|order| order.order_number == *number));
}

#[tokio::test]
async fn test_cancel_discards_draft_and_keeps_cart() {
    let api = Arc::new(FakeApi::failing_first(1));
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store.clone(), CartScope::Device);

    app.cart().add(gel(2)).await;
    app.checkout().submit(&valid_form(), None).await.unwrap_err();

    app.checkout().cancel().await;

    assert_eq!(app.checkout().state(), CheckoutState::Collecting);
    assert!(app.checkout().failed_order().await.is_none());
    assert!(matches!(
        app.checkout().retry().await.unwrap_err(),
        CheckoutError::NothingToRetry
    ));

    // Cart untouched; transients gone
    assert_eq!(app.cart_view().await.items.len(), 1);
    assert_eq!(store.get(keys::SHIPPING_ADDRESS).await.unwrap(), None);
    assert_eq!(store.get(keys::DRAFT_ORDER).await.unwrap(), None);
}

#[tokio::test]
async fn test_validation_failure_makes_no_network_call() {
    let api = Arc::new(FakeApi::new());
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store, CartScope::Device);

    app.cart().add(gel(1)).await;

    // Department changed after picking a municipality: municipality resets
    let mut form = valid_form();
    form.select_department("Sonsonate").unwrap();

    let err = app.checkout().submit(&form, None).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Address(_)));
    assert!(api.recorded_orders().await.is_empty());
    assert_eq!(app.checkout().state(), CheckoutState::Collecting);
}

#[tokio::test]
async fn test_empty_cart_is_rejected_before_network() {
    let api = Arc::new(FakeApi::new());
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store, CartScope::Device);

    let err = app.checkout().submit(&valid_form(), None).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(api.recorded_orders().await.is_empty());
}

#[tokio::test]
async fn test_order_wire_payload_is_sanitized() {
    let api = Arc::new(FakeApi::new());
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api.clone(), store, CartScope::Device);

    app.cart().add(gel(2)).await;
    app.checkout().submit(&valid_form(), None).await.unwrap();

    let orders = api.recorded_orders().await;
    let json = serde_json::to_value(&orders[0]).unwrap();

    assert_eq!(json["estado"], "En proceso");
    let mut line_keys: Vec<&str> = json["items"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    line_keys.sort_unstable();
    assert_eq!(line_keys, ["id", "name", "quantity", "unitPrice"]);
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_login_persists_session() {
    let api = Arc::new(FakeApi::new());
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api, store.clone(), CartScope::Device);

    app.session().login("juan@correo.com", "secreta").await.unwrap();

    assert!(store.get(keys::USER).await.unwrap().is_some());
    assert_eq!(
        app.session().current().await.unwrap().user_id,
        "C1".into()
    );
}

#[tokio::test]
async fn test_non_customer_role_is_rejected_and_not_persisted() {
    let api = Arc::new(FakeApi::with_role(CustomerRole::Other));
    let store = Arc::new(MemoryStore::new());
    let app = app_with(api, store.clone(), CartScope::Device);

    let err = app.session().login("staff@correo.com", "secreta").await;
    assert!(err.is_err());
    assert_eq!(store.get(keys::USER).await.unwrap(), None);
    assert_eq!(app.session().current().await, None);
}

#[tokio::test]
async fn test_session_restores_across_instances() {
    let store = Arc::new(MemoryStore::new());

    {
        let app = app_with(Arc::new(FakeApi::new()), store.clone(), CartScope::Device);
        app.session().login("juan@correo.com", "secreta").await.unwrap();
    }

    let app = app_with(Arc::new(FakeApi::new()), store, CartScope::Device);
    let session = app.session().current().await.unwrap();
    assert_eq!(session.name, "Juan Pérez");
}

#[tokio::test]
async fn test_malformed_stored_session_is_logged_out() {
    let store = Arc::new(MemoryStore::new());
    store.set(keys::USER, "{oops".to_owned()).await.unwrap();

    let app = app_with(Arc::new(FakeApi::new()), store, CartScope::Device);
    assert_eq!(app.session().current().await, None);
}

#[tokio::test]
async fn test_session_observer_sees_login_and_logout() {
    let app = app_with(
        Arc::new(FakeApi::new()),
        Arc::new(MemoryStore::new()),
        CartScope::Device,
    );

    let mut rx = app.session().subscribe();
    assert!(rx.borrow().is_none());

    app.session().login("juan@correo.com", "secreta").await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_some());

    app.logout().await;
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_none());
}

// =============================================================================
// Cart Scope
// =============================================================================

#[tokio::test]
async fn test_logout_keeps_cart_under_device_scope() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(Arc::new(FakeApi::new()), store, CartScope::Device);

    app.session().login("juan@correo.com", "secreta").await.unwrap();
    app.cart().add(gel(2)).await;

    app.logout().await;

    assert_eq!(app.session().current().await, None);
    assert_eq!(app.cart_view().await.items.len(), 1);
}

#[tokio::test]
async fn test_logout_clears_cart_under_user_scope() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(Arc::new(FakeApi::new()), store, CartScope::User);

    app.session().login("juan@correo.com", "secreta").await.unwrap();
    app.cart().add(gel(2)).await;

    app.logout().await;

    assert!(app.cart_view().await.is_empty());
}

#[tokio::test]
async fn test_cart_view_attributes_owner() {
    let app = app_with(
        Arc::new(FakeApi::new()),
        Arc::new(MemoryStore::new()),
        CartScope::Device,
    );

    assert_eq!(app.cart_view().await.owner, None);

    app.session().login("juan@correo.com", "secreta").await.unwrap();
    app.cart().add(gel(1)).await;

    assert_eq!(app.cart_view().await.owner, Some("C1".into()));
}
