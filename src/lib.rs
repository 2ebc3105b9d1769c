pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use routes::create_router;
