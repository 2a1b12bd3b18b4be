// HealthDashboard-api lib.rs
//
// HTTP layer of the health dashboard: routes, handlers, public entities,
// configuration and OpenAPI docs.

pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
