use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Row as DriverRow};
use tracing::debug;

use crate::error::DbSessionError;
use crate::mysql::config::SessionConfig;
use crate::mysql::params::{check_placeholder_arity, to_positional_params};
use crate::mysql::query::build_result_set;
use crate::results::{ResultSet, Row};
use crate::types::SqlValue;

/// A session owning one live connection to a MySQL database
///
/// The connection is exclusively owned and statement-executing operations
/// take `&mut self`, so exactly one statement is in flight at a time. The
/// connection closes when the session is dropped; use [`DbSession::disconnect`]
/// for a graceful close.
///
/// `connect`, `query`, and `call_procedure` terminate the process on any
/// SQL-level error after printing the raw driver error, with no retry. The
/// `try_*` variants return the error to the caller instead.
pub struct DbSession {
    config: SessionConfig,
    conn: Conn,
}

impl DbSession {
    /// Establish a connection, terminating the process on failure
    pub async fn connect(config: SessionConfig) -> Self {
        match Self::try_connect(config).await {
            Ok(session) => session,
            Err(err) => fatal(&err),
        }
    }

    /// Establish a connection
    ///
    /// # Errors
    /// Returns `DbSessionError::ConfigError` if required config fields are
    /// missing, or the driver's connection error.
    pub async fn try_connect(config: SessionConfig) -> Result<Self, DbSessionError> {
        config.validate()?;
        debug!(host = %config.host, database = %config.database, "connecting");
        let conn = Conn::new(config.to_opts()).await?;
        Ok(Self { config, conn })
    }

    /// The configuration this session was created with
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Execute a parameterized statement, terminating the process on failure
    ///
    /// Returns `Some(ResultSet)` for statements that produce a result set,
    /// `None` otherwise (INSERT, UPDATE, DELETE, DDL).
    pub async fn query(&mut self, sql: &str, values: &[SqlValue]) -> Option<ResultSet> {
        match self.try_query(sql, values).await {
            Ok(result) => result,
            Err(err) => fatal(&err),
        }
    }

    /// Execute a parameterized statement
    ///
    /// Prepares `sql`, binds each value positionally as a string, executes,
    /// and materializes the first result set. The prepared statement is
    /// closed after execution whether or not it succeeded.
    ///
    /// # Errors
    /// Returns `DbSessionError::ParameterError` if the number of values does
    /// not match the statement's `?` placeholders, or the driver's prepare or
    /// execute error.
    pub async fn try_query(
        &mut self,
        sql: &str,
        values: &[SqlValue],
    ) -> Result<Option<ResultSet>, DbSessionError> {
        check_placeholder_arity(sql, values.len())?;

        let stmt = self.conn.prep(sql).await?;
        let params = to_positional_params(values);
        debug!(params = values.len(), "executing statement");

        let mut exec_err: Option<mysql_async::Error> = None;
        let mut columns = None;
        let mut rows: Vec<DriverRow> = Vec::new();
        match self.conn.exec_iter(&stmt, params).await {
            Ok(result) => {
                columns = result.columns();
                // Drains any trailing result sets (stored procedures return
                // an extra OK packet) so the connection is reusable at once.
                match result.collect_and_drop::<DriverRow>().await {
                    Ok(collected) => rows = collected,
                    Err(err) => exec_err = Some(err),
                }
            }
            Err(err) => exec_err = Some(err),
        }

        // The statement closes regardless of the execution outcome.
        let close_result = self.conn.close(stmt).await;
        if let Some(err) = exec_err {
            return Err(err.into());
        }
        close_result?;

        match columns {
            Some(columns) if !columns.is_empty() => Ok(Some(build_result_set(&columns, rows)?)),
            _ => Ok(None),
        }
    }

    /// Call a stored procedure, terminating the process on failure
    pub async fn call_procedure(&mut self, name: &str, values: &[SqlValue]) -> Option<ResultSet> {
        match self.try_call_procedure(name, values).await {
            Ok(result) => result,
            Err(err) => fatal(&err),
        }
    }

    /// Call a stored procedure
    ///
    /// Builds `CALL name(?,?,...)` with one placeholder per value and
    /// delegates to [`DbSession::try_query`].
    ///
    /// # Errors
    /// Same as [`DbSession::try_query`].
    pub async fn try_call_procedure(
        &mut self,
        name: &str,
        values: &[SqlValue],
    ) -> Result<Option<ResultSet>, DbSessionError> {
        let sql = procedure_call_sql(name, values.len());
        self.try_query(&sql, values).await
    }

    /// Materialize a query result into rows, in server order
    ///
    /// A missing result set yields an empty `Vec`. If a transform is
    /// supplied it is applied to each row in order and its return value is
    /// collected in place of the raw row.
    pub fn fetch_all<F>(result: Option<ResultSet>, transform: Option<F>) -> Vec<Row>
    where
        F: FnMut(Row) -> Row,
    {
        let Some(result) = result else {
            return Vec::new();
        };
        let rows = result.into_rows();
        match transform {
            Some(mut transform) => rows.into_iter().map(|row| transform(row)).collect(),
            None => rows,
        }
    }

    /// Gracefully close the connection
    ///
    /// Dropping the session closes the connection too; this variant surfaces
    /// the driver's close error.
    ///
    /// # Errors
    /// Returns the driver's error if the close handshake fails.
    pub async fn disconnect(self) -> Result<(), DbSessionError> {
        debug!(host = %self.config.host, "disconnecting");
        self.conn.disconnect().await?;
        Ok(())
    }
}

fn procedure_call_sql(name: &str, arity: usize) -> String {
    let placeholders = vec!["?"; arity].join(",");
    format!("CALL {name}({placeholders})")
}

fn fatal(err: &DbSessionError) -> ! {
    // Contract: print the raw driver error and stop, no recovery path.
    eprintln!("{err}");
    std::process::exit(1);
}
