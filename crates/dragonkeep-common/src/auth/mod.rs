//! Shared-secret authentication

mod api_key;

pub use api_key::{ApiSecret, API_KEY_HEADER};
