//! Couchdash Core - Connection settings, secrets and the query model
//!
//! This crate holds the state that the Couchbase data source editors operate on.
//! Every edit produces a new value; nothing here mutates host-owned records in
//! place.
//!
//! - `ConnectionConfig` - non-secret connection parameters (`jsonData`)
//! - `Secret` - write-only credential state (`secureJsonData` / `secureJsonFields`)
//! - `DataSourceSettings` - the full instance settings record owned by the host
//! - `QuerySpec` / `PartialQuery` - query text, mode and default filling

mod config;
mod error;
pub mod query;
mod secret;
mod settings;

pub use config::*;
pub use error::*;
pub use query::{DEFAULT_QUERY, PartialQuery, QueryMode, QuerySpec, QueryVariant, apply_defaults};
pub use secret::*;
pub use settings::*;
