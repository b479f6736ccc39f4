pub mod donation_service;
pub mod notify_service;
pub mod progress_service;
pub mod session_service;
pub mod sponsorship_service;
