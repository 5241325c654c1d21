// MySQL driver glue
//
// - config: connection configuration and validation
// - params: string-typed parameter conversion and placeholder arity checks
// - query: result-set materialization from driver rows

pub mod config;
pub mod params;
pub mod query;

pub use config::SessionConfig;
pub use params::{check_placeholder_arity, count_placeholders, to_positional_params};
pub use query::build_result_set;
