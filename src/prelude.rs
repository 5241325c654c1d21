//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types to make it easier to
//! get started with the library.

pub use crate::error::DbSessionError;
pub use crate::mysql::config::SessionConfig;
pub use crate::results::{ResultSet, Row};
pub use crate::session::DbSession;
pub use crate::types::SqlValue;
