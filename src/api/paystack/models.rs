use serde::{Deserialize, Serialize};

/// Every Paystack response wraps its payload the same way
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

/// Request body for POST /transaction/initialize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    pub email: String,
    /// Minor units, as a string per the Paystack docs
    pub amount: String,
    pub currency: String,
    pub reference: String,
}

/// Payload of a successful initialize call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeData {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

/// Payload of GET /transaction/verify/{reference}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyData {
    pub id: Option<i64>,
    pub status: String,
    pub reference: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub gateway_response: Option<String>,
    pub paid_at: Option<String>,
}

/// Where a transaction stands from our point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Paid,
    /// The provider will not complete this transaction
    Dead,
    /// Still open on the checkout page (includes Paystack's "abandoned",
    /// which it reports for any checkout the payer has not finished yet)
    Open,
}

impl VerifyData {
    pub fn state(&self) -> TransactionState {
        match self.status.as_str() {
            "success" => TransactionState::Paid,
            "failed" | "reversed" => TransactionState::Dead,
            _ => TransactionState::Open,
        }
    }
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized
    Unauthorized(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited(String),
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// `status: false` or a missing `data` in an otherwise 2xx response
    Unsuccessful(String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited(msg) => write!(f, "Rate Limited: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::Unsuccessful(msg) => write!(f, "Unsuccessful: {}", msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
