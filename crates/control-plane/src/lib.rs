// SoLBot Control Plane Library
// Decision: Shared library for binaries (API server, OpenAPI export)

// API routes and types (shared for OpenAPI generation)
pub mod api;

pub mod config;

// Services layer
pub mod services;
pub use services::{ChatAnalyticsService, HealthService, UserDataService};

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;
