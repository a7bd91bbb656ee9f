//! Session service: single source of truth for "who is the current user".
//!
//! Consumers that need to react to login/logout subscribe to a watch
//! channel instead of polling the store; every change is published
//! immediately.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tokio::sync::{Mutex, watch};

use bluefruit_core::{Email, EmailError};

use crate::api::types::Registration;
use crate::api::{ApiError, RemoteApi};
use crate::models::Session;
use crate::store::{KeyValueStore, keys};

/// Minimum age to register an account.
const MIN_REGISTRATION_AGE: u32 = 18;

/// Errors surfaced by login and registration.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The email address is structurally invalid.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// The API rejected the credentials or was unreachable.
    #[error("login failed: {0}")]
    Api(#[from] ApiError),

    /// The account exists but is not a customer account; nothing is
    /// persisted.
    #[error("only customer accounts may use this app")]
    RoleNotAllowed,

    /// The registrant is under the minimum age.
    #[error("you must be an adult to register")]
    Underage,
}

/// Holds the authenticated user's identity for cart/order attribution.
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    api: Arc<dyn RemoteApi>,
    // Outer None = not yet restored from the store this process lifetime
    cached: Mutex<Option<Option<Session>>>,
    changes: watch::Sender<Option<Session>>,
}

impl SessionService {
    /// Create a session service over the given store and API.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, api: Arc<dyn RemoteApi>) -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            store,
            api,
            cached: Mutex::new(None),
            changes,
        }
    }

    /// Authenticate against the remote API.
    ///
    /// On success the session is persisted locally and returned. A non-2xx
    /// response or a non-customer role returns an error without persisting
    /// anything.
    ///
    /// # Errors
    ///
    /// `SessionError::Email` for a malformed address, `SessionError::Api`
    /// for rejected credentials or transport failure, and
    /// `SessionError::RoleNotAllowed` for non-customer accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let email = Email::parse(email)?;
        let session = self.api.login(&email, password).await?;

        if !session.role.may_shop() {
            return Err(SessionError::RoleNotAllowed);
        }

        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(e) = self.store.set(keys::USER, raw).await {
                    tracing::warn!("failed to persist session: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize session: {e}"),
        }

        *self.cached.lock().await = Some(Some(session.clone()));
        self.changes.send_replace(Some(session.clone()));

        Ok(session)
    }

    /// The cached session, restoring it from the store on first access.
    ///
    /// Malformed persisted data is treated as no session.
    pub async fn current(&self) -> Option<Session> {
        let mut cached = self.cached.lock().await;

        if let Some(state) = cached.as_ref() {
            return state.clone();
        }

        let restored = match self.store.get(keys::USER).await {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("stored session is malformed, treating as logged out: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read stored session: {e}");
                None
            }
        };

        *cached = Some(restored.clone());
        self.changes.send_replace(restored.clone());
        restored
    }

    /// Clear the session. The cart deliberately survives this; see the
    /// cart-scope configuration flag.
    pub async fn logout(&self) {
        if let Err(e) = self.store.remove(keys::USER).await {
            tracing::warn!("failed to remove stored session: {e}");
        }
        *self.cached.lock().await = Some(None);
        self.changes.send_replace(None);
    }

    /// Watch session changes. The receiver sees the current value
    /// immediately and every later login/logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// `SessionError::Underage` if the registrant is under the minimum
    /// age, otherwise any API error from the registration endpoint.
    pub async fn register(&self, registration: &Registration) -> Result<(), SessionError> {
        if !is_adult(registration.date_birth, Utc::now().date_naive()) {
            return Err(SessionError::Underage);
        }

        self.api.register_customer(registration).await?;
        Ok(())
    }
}

fn is_adult(birth: NaiveDate, today: NaiveDate) -> bool {
    today
        .years_since(birth)
        .is_some_and(|years| years >= MIN_REGISTRATION_AGE)
}
