pub mod cooking_time;
pub mod ingredient;
pub mod recipe;
pub mod tags;

pub use cooking_time::*;
pub use ingredient::*;
pub use recipe::*;

/// Construction-time failure for a recipe or ingredient payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid tag: {tag}")]
    InvalidTag { tag: String },
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Malformed payload: {0}")]
    Malformed(String),
}
