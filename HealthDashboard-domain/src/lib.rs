// HealthDashboard Domain
// Business logic for the HealthDashboard service

// Classification, suggestions, scores and report generation
pub mod services;

// Authentication
pub mod auth;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the data layer for convenience
pub use health_dashboard_data as data;
