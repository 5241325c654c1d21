//! Lightweight async wrapper around `mysql_async`.
//!
//! One component: a [`DbSession`] that owns a single connection and exposes
//! parameterized query execution, stored-procedure invocation, and result-set
//! materialization into column-name-keyed rows. Parameters are bound as
//! strings regardless of their native type, and fetched values come back
//! string-typed as well.
//!
//! ```no_run
//! use mysql_session::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SessionConfig::new("localhost", "app", "secret", "appdb");
//!     let mut session = DbSession::connect(config).await;
//!
//!     let result = session
//!         .query("SELECT id, name FROM users WHERE org = ?", &["acme".into()])
//!         .await;
//!     let rows = DbSession::fetch_all(result, None::<fn(Row) -> Row>);
//!     for row in &rows {
//!         println!("{:?}", row.get("name"));
//!     }
//! }
//! ```

pub mod error;
pub mod mysql;
pub mod prelude;
pub mod results;
pub mod session;
pub mod types;

pub use error::DbSessionError;
pub use mysql::config::SessionConfig;
pub use results::{ResultSet, Row};
pub use session::DbSession;
pub use types::SqlValue;
