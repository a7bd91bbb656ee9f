//! HTTP implementation of the remote API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bluefruit_core::{Email, ProductId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    CreatedOrder, EmailBody, EmailCodeBody, LoginRequest, LoginResponse, NewPasswordBody,
    OrderPayload, ProductDto, Registration,
};
use super::{ApiError, RemoteApi};
use crate::config::AppConfig;
use crate::models::{Product, Session};

/// Client for the Blue Fruit REST API.
///
/// Cheaply cloneable; every request carries the configured timeout so a
/// hung submission surfaces as a failure instead of blocking the app.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `base_url` must end with a slash (config normalizes this) so joined
    /// paths keep the full prefix.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// Create a client from app configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.get(self.endpoint(path)?).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Check the status and return the body text for parsing.
    async fn check_status(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Prefer the server's own message when the error body has one
            let message = serde_json::from_str::<ErrorBody>(&text).map_or_else(
                |_| text.chars().take(200).collect(),
                |body| body.message,
            );
            tracing::error!(status = %status, message = %message, "API returned non-success status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = Self::check_status(response).await?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }
}

/// Error body shape the API uses for non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
impl RemoteApi for ApiClient {
    async fn login(&self, email: &Email, password: &str) -> Result<Session, ApiError> {
        let response: LoginResponse = self
            .post_json(
                "login",
                &LoginRequest {
                    email: email.as_str(),
                    password,
                },
            )
            .await?;
        Ok(response.user.into())
    }

    async fn create_order(&self, order: &OrderPayload) -> Result<CreatedOrder, ApiError> {
        self.post_json("orders", order).await
    }

    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let dtos: Vec<ProductDto> = self.get_json("products").await?;
        Ok(dtos.into_iter().map(ProductDto::into_product).collect())
    }

    async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let dto: ProductDto = self.get_json(&format!("products/{}", id.as_str())).await?;
        Ok(dto.into_product())
    }

    async fn random_product(&self) -> Result<Product, ApiError> {
        let dto: ProductDto = self.get_json("products/random").await?;
        Ok(dto.into_product())
    }

    async fn request_recovery_code(&self, email: &Email) -> Result<(), ApiError> {
        self.post_unit(
            "passwordRecovery/requestCode",
            &EmailBody {
                email: email.as_str(),
            },
        )
        .await
    }

    async fn verify_recovery_code(&self, email: &Email, code: &str) -> Result<(), ApiError> {
        self.post_unit(
            "passwordRecovery/verifyCode",
            &EmailCodeBody {
                email: email.as_str(),
                code,
            },
        )
        .await
    }

    async fn set_new_password(
        &self,
        email: &Email,
        code: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.post_unit(
            "passwordRecovery/newPassword",
            &NewPasswordBody {
                email: email.as_str(),
                code,
                new_password,
            },
        )
        .await
    }

    async fn register_customer(&self, registration: &Registration) -> Result<(), ApiError> {
        self.post_unit("registerCustomers", registration).await
    }

    async fn verify_email_code(&self, email: &Email, code: &str) -> Result<(), ApiError> {
        self.post_unit(
            "registerCustomers/verifyCodeEmail",
            &EmailCodeBody {
                email: email.as_str(),
                code,
            },
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            Url::parse("https://example.com/api/").unwrap(),
            Duration::from_secs(20),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client().endpoint("orders").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/orders");
    }

    #[test]
    fn test_endpoint_nested_path() {
        let url = client().endpoint("passwordRecovery/requestCode").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/passwordRecovery/requestCode"
        );
    }

    #[test]
    fn test_error_body_parses() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Credenciales incorrectas"}"#).unwrap();
        assert_eq!(body.message, "Credenciales incorrectas");
    }
}
