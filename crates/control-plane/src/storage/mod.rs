// Storage layer for the SoLBot control-plane
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// Tables:
// - sessions: written by the chat backend, read here for the owning user
// - user_chat_analytics: chat visibility intervals
// - user_data: generic user data and tracked events
// - content_interaction_logs: master log of posted interactions

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
