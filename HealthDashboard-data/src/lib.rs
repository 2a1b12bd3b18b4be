// HealthDashboard Data
// This crate handles data access and external service interactions

// Repository implementations for data access
pub mod repository;

// Client for the external save endpoint
pub mod remote;

// Data storage models
pub mod models;
