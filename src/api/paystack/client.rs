use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use super::models::{ApiError, Envelope, InitializeData, InitializeRequest, VerifyData};
use tracing::{debug, warn};

/// Paystack REST client for transaction initialize/verify
pub struct PaystackClient {
    http_client: HttpClient,
    secret_key: String,
    base_url: String,
}

impl PaystackClient {
    /// Create a client against `base_url` (the live API or a local stand-in)
    pub fn with_base_url(secret_key: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            secret_key,
            base_url,
        }
    }

    /// Create default headers with authorization
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.secret_key))
            .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Map a non-2xx response to an `ApiError`, keeping Paystack's message when it sent one
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body_text)
            .ok()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            429 => {
                warn!("Paystack rate limited us: {}", message);
                ApiError::RateLimited(message)
            }
            500..=599 => {
                warn!("Paystack server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    /// Unwrap `{ status, message, data }`, treating `status: false` as failure
    async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if !envelope.status {
            return Err(ApiError::Unsuccessful(envelope.message));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Unsuccessful(format!("No data in response: {}", envelope.message)))
    }

    /// POST /transaction/initialize
    ///
    /// Creates a hosted checkout for `request` and returns its authorization URL.
    pub async fn initialize_transaction(
        &self,
        request: &InitializeRequest,
    ) -> Result<InitializeData, ApiError> {
        let url = format!("{}/transaction/initialize", self.base_url);
        let headers = self.create_headers()?;

        debug!("Initializing Paystack transaction {}", request.reference);

        let response = self.http_client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        Self::read_envelope(response).await
    }

    /// GET /transaction/verify/{reference}
    pub async fn verify_transaction(&self, reference: &str) -> Result<VerifyData, ApiError> {
        let url = format!("{}/transaction/verify/{}", self.base_url, reference);
        let headers = self.create_headers()?;

        let response = self.http_client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        Self::read_envelope(response).await
    }
}
