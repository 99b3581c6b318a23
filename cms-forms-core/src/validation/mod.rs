//! Form validation schemas
//!
//! Each schema returns a [`FieldErrors`](crate::types::FieldErrors) map; an empty
//! map means the form may be submitted.

mod auth;
mod record;
pub mod rules;

pub use auth::{validate_login, validate_registration};
pub use record::{validate_blog, validate_seo_banner};
