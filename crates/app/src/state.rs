//! Application state shared across the UI shell.

use std::sync::Arc;

use crate::api::{ApiClient, RemoteApi};
use crate::config::{AppConfig, CartScope};
use crate::error::AppError;
use crate::models::Cart;
use crate::services::{CartRepository, CatalogService, CheckoutOrchestrator, SessionService};
use crate::store::{FileStore, KeyValueStore};

/// File name of the device-local store inside the data directory.
const STORE_FILE: &str = "bluefruit.json";

/// The wired-up app core.
///
/// This struct is cheaply cloneable via `Arc` and provides the UI shell
/// access to the services and configuration.
#[derive(Clone)]
pub struct App {
    inner: Arc<AppInner>,
}

struct AppInner {
    config: AppConfig,
    cart: Arc<CartRepository>,
    session: SessionService,
    checkout: CheckoutOrchestrator,
    catalog: CatalogService,
}

impl App {
    /// Open the app core with on-disk storage and the HTTP API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be opened or the HTTP
    /// client cannot be built.
    pub async fn open(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(config.data_dir.join(STORE_FILE)).await?);
        let api: Arc<dyn RemoteApi> = Arc::new(ApiClient::from_config(&config)?);
        Ok(Self::assemble(config, store, api))
    }

    /// Wire the services over explicit store and API implementations.
    ///
    /// Embedders and tests use this to swap in memory stores or scripted
    /// APIs.
    #[must_use]
    pub fn assemble(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn RemoteApi>,
    ) -> Self {
        let cart = Arc::new(CartRepository::new(store.clone()));
        let session = SessionService::new(store.clone(), api.clone());
        let checkout = CheckoutOrchestrator::new(store, api.clone(), cart.clone());
        let catalog = CatalogService::new(api);

        Self {
            inner: Arc::new(AppInner {
                config,
                cart,
                session,
                checkout,
                catalog,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the cart repository.
    #[must_use]
    pub fn cart(&self) -> &CartRepository {
        &self.inner.cart
    }

    /// Get a reference to the session service.
    #[must_use]
    pub fn session(&self) -> &SessionService {
        &self.inner.session
    }

    /// Get a reference to the checkout orchestrator.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutOrchestrator {
        &self.inner.checkout
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// The cart snapshot with the current user attached as owner.
    pub async fn cart_view(&self) -> Cart {
        let owner = self
            .inner
            .session
            .current()
            .await
            .map(|session| session.user_id);
        self.inner.cart.load().await.with_owner(owner)
    }

    /// Log out: clears the session and abandons any in-flight checkout.
    ///
    /// The cart survives unless the configured cart scope ties it to the
    /// user.
    pub async fn logout(&self) {
        self.inner.checkout.cancel().await;
        self.inner.session.logout().await;

        if self.inner.config.cart_scope == CartScope::User {
            self.inner.cart.clear().await;
        }
    }
}
