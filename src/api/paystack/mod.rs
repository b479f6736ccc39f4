pub mod checkout;
pub mod client;
pub mod models;

pub use checkout::PaystackCheckout;
pub use client::PaystackClient;
pub use models::ApiError;
