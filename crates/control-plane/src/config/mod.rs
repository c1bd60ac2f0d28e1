// Configuration loading
//
// All settings come from environment variables (optionally via a .env file
// loaded in main).

pub mod server;

pub use server::{HealthProbeConfig, ServerConfig};
