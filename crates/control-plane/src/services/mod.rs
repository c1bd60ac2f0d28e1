// Services layer for business logic
// Services own business rules and call storage directly; handlers only
// validate input and map errors.

pub mod chat_analytics;
pub mod health;
pub mod interaction;
pub mod user_data;

pub use chat_analytics::ChatAnalyticsService;
pub use health::HealthService;
pub use interaction::{InteractionOutcome, InteractionService, NewInteraction};
pub use user_data::{NewUserData, UserDataService};
