// Public entities for the HealthDashboard API
// Data structures exposed at the HTTP boundary

// Error and message envelopes
pub mod common;

// Auth entities
pub mod auth;

// Reading history entities
pub mod readings;
