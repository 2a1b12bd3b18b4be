pub mod auth;
pub mod health;
pub mod readings;

// Re-export handlers for easier imports
pub use auth::{google_sign_in, login, logout, me, register, require_session};
pub use health::health_check;
pub use readings::{reading_history, submit_reading};
