//! Checkout orchestrator: cart + address in, confirmed order out.
//!
//! Drives one checkout attempt at a time through
//! `Collecting -> AddressConfirmed -> Submitting -> Confirmed | Failed`.
//! The payment screen is a UI collaborator that does not alter order data,
//! so a confirmed address advances straight to submission.
//!
//! A failed submission retains the draft order under its original number;
//! retrying resubmits the identical draft so the server can deduplicate.
//! The cart is cleared only on confirmed success, never on failure or
//! cancellation. Retry is always an explicit caller action - the network
//! layer performs no silent retries of order creation.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{Mutex, watch};

use bluefruit_core::{CustomerId, OrderStatus};

use super::cart::CartRepository;
use crate::api::types::OrderPayload;
use crate::api::{ApiError, RemoteApi};
use crate::models::{AddressError, AddressForm, Confirmation, DraftOrder, Session, ShippingAddress};
use crate::store::{KeyValueStore, keys};

/// Observable phase of the current checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Address fields being entered; nothing sent anywhere.
    Collecting,
    /// Address validated and stashed; about to submit.
    AddressConfirmed,
    /// Order API call in flight.
    Submitting,
    /// Order accepted; cart cleared.
    Confirmed,
    /// Submission failed; draft retained for retry.
    Failed,
}

/// Errors a checkout attempt can surface.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Address validation failed; no network call was made.
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),

    /// The cart has nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The order API rejected the submission or was unreachable. The draft
    /// is retained; call `retry`.
    #[error("order submission failed: {0}")]
    Submission(#[from] ApiError),

    /// `retry` was called with no failed submission outstanding.
    #[error("no failed submission to retry")]
    NothingToRetry,
}

/// A submission that failed and is waiting for an explicit retry.
struct FailedAttempt {
    address: ShippingAddress,
    draft: DraftOrder,
    user_id: Option<CustomerId>,
}

enum Attempt {
    Collecting,
    Failed(FailedAttempt),
    Confirmed(Confirmation),
}

/// Converts a cart snapshot plus shipping address into a confirmed remote
/// order, with idempotent retry on failure.
pub struct CheckoutOrchestrator {
    store: Arc<dyn KeyValueStore>,
    api: Arc<dyn RemoteApi>,
    cart: Arc<CartRepository>,
    attempt: Mutex<Attempt>,
    phase: watch::Sender<CheckoutState>,
}

impl CheckoutOrchestrator {
    /// Create an orchestrator in the `Collecting` state.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn RemoteApi>,
        cart: Arc<CartRepository>,
    ) -> Self {
        let (phase, _) = watch::channel(CheckoutState::Collecting);
        Self {
            store,
            api,
            cart,
            attempt: Mutex::new(Attempt::Collecting),
            phase,
        }
    }

    /// Current phase of the checkout attempt.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        *self.phase.borrow()
    }

    /// Watch phase transitions (for progress UI).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.phase.subscribe()
    }

    /// Validate the address and submit the current cart as an order.
    ///
    /// On success the cart is cleared and a [`Confirmation`] returned. On
    /// submission failure the draft (and its order number) is retained;
    /// the caller may [`CheckoutOrchestrator::retry`] or
    /// [`CheckoutOrchestrator::cancel`]. The cart is untouched on failure.
    ///
    /// # Errors
    ///
    /// `CheckoutError::Address` if a field is invalid (checked before any
    /// network call), `CheckoutError::EmptyCart` for an empty cart, or
    /// `CheckoutError::Submission` when the order API call fails.
    pub async fn submit(
        &self,
        form: &AddressForm,
        user: Option<&Session>,
    ) -> Result<Confirmation, CheckoutError> {
        let mut attempt = self.attempt.lock().await;

        // Field validation blocks the transition; nothing is sent
        let address = form.finish()?;

        let cart = self.cart.load().await;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.phase.send_replace(CheckoutState::AddressConfirmed);
        self.stash_address(&address).await;

        // The order number is minted here, once per attempt
        let draft = DraftOrder::from_cart(&cart);
        self.stash_draft(&draft).await;

        let user_id = user.map(|session| session.user_id.clone());
        self.submit_draft(&mut attempt, address, draft, user_id).await
    }

    /// Re-attempt a failed submission with the identical draft order.
    ///
    /// The order number does not change, so a correctly implemented order
    /// API can deduplicate.
    ///
    /// # Errors
    ///
    /// `CheckoutError::NothingToRetry` if no failed submission is
    /// outstanding, or `CheckoutError::Submission` when the retry fails
    /// again (the draft stays retained).
    pub async fn retry(&self) -> Result<Confirmation, CheckoutError> {
        let mut attempt = self.attempt.lock().await;

        match std::mem::replace(&mut *attempt, Attempt::Collecting) {
            Attempt::Failed(FailedAttempt {
                address,
                draft,
                user_id,
            }) => self.submit_draft(&mut attempt, address, draft, user_id).await,
            other => {
                *attempt = other;
                Err(CheckoutError::NothingToRetry)
            }
        }
    }

    /// Abandon the current attempt: discard the draft and transient
    /// address, return to `Collecting`. The cart is left untouched.
    pub async fn cancel(&self) {
        let mut attempt = self.attempt.lock().await;
        *attempt = Attempt::Collecting;
        self.discard_transients().await;
        self.phase.send_replace(CheckoutState::Collecting);
    }

    /// The confirmation of the last successful attempt, if any.
    pub async fn last_confirmation(&self) -> Option<Confirmation> {
        match &*self.attempt.lock().await {
            Attempt::Confirmed(confirmation) => Some(confirmation.clone()),
            _ => None,
        }
    }

    /// The retained draft of a failed submission, if any.
    pub async fn failed_order(&self) -> Option<DraftOrder> {
        match &*self.attempt.lock().await {
            Attempt::Failed(failed) => Some(failed.draft.clone()),
            _ => None,
        }
    }

    async fn submit_draft(
        &self,
        attempt: &mut Attempt,
        address: ShippingAddress,
        mut draft: DraftOrder,
        user_id: Option<CustomerId>,
    ) -> Result<Confirmation, CheckoutError> {
        self.phase.send_replace(CheckoutState::Submitting);

        let payload = OrderPayload::from(&draft);
        match self.api.create_order(&payload).await {
            Ok(created) => {
                draft.status = OrderStatus::Submitted;

                // Clear only after the server accepted the order
                self.cart.clear().await;
                self.discard_transients().await;

                let confirmation = Confirmation {
                    user_id,
                    order_number: draft.order_number.clone(),
                    server_order_id: Some(created.id),
                    items: draft.items,
                    total: draft.total,
                    address,
                    confirmed_at: Utc::now(),
                };

                *attempt = Attempt::Confirmed(confirmation.clone());
                self.phase.send_replace(CheckoutState::Confirmed);
                Ok(confirmation)
            }
            Err(e) => {
                tracing::warn!(order_number = %draft.order_number, "order submission failed: {e}");
                draft.status = OrderStatus::Failed;
                *attempt = Attempt::Failed(FailedAttempt {
                    address,
                    draft,
                    user_id,
                });
                self.phase.send_replace(CheckoutState::Failed);
                Err(CheckoutError::Submission(e))
            }
        }
    }

    async fn stash_address(&self, address: &ShippingAddress) {
        match serde_json::to_string(address) {
            Ok(raw) => {
                if let Err(e) = self.store.set(keys::SHIPPING_ADDRESS, raw).await {
                    tracing::warn!("failed to stash shipping address: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize shipping address: {e}"),
        }
    }

    async fn stash_draft(&self, draft: &DraftOrder) {
        match serde_json::to_string(draft) {
            Ok(raw) => {
                if let Err(e) = self.store.set(keys::DRAFT_ORDER, raw).await {
                    tracing::warn!("failed to stash draft order: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize draft order: {e}"),
        }
    }

    async fn discard_transients(&self) {
        if let Err(e) = self.store.remove(keys::SHIPPING_ADDRESS).await {
            tracing::warn!("failed to discard shipping address: {e}");
        }
        if let Err(e) = self.store.remove(keys::DRAFT_ORDER).await {
            tracing::warn!("failed to discard draft order: {e}");
        }
    }
}
