//! Magic-link service and its HTTP surface

pub mod handlers;
pub mod service;

pub use handlers::{AppState, consume_link, create_link, health_check, service_info};
pub use service::MagicLinkService;
