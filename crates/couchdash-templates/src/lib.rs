//! Couchdash Templates - Template variable substitution for Couchbase queries
//!
//! Query text may reference dashboard variables. Right before a query is
//! dispatched, [`resolve`] replaces every bound placeholder with the value
//! from the scope supplied for that dispatch. Unbound or malformed
//! placeholders are left as written.
//!
//! Recognised placeholders:
//!
//! - `$name`
//! - `${name}` and `${name:format}`
//! - `[[name]]` and `[[name:format]]`
//!
//! ## Example
//!
//! ```
//! use couchdash_templates::{TemplateScope, resolve};
//!
//! let scope = TemplateScope::new().with_var("var", "42");
//! let sql = resolve("select * from b where id = $var", &scope);
//! assert_eq!(sql, "select * from b where id = 42");
//! ```
//!
//! The [`macros`] module holds the `time_range()` / `str_time_range()`
//! rewrite applied once the dashboard time range is known.

mod format;
pub mod macros;
mod scope;
mod service;

pub use format::{ValueFormatter, VariableFormat};
pub use macros::{ExpandedQuery, TimeField, TimeRange, expand_time_macros};
pub use scope::{TemplateScope, VariableValue};
pub use service::{
    DefaultTemplateService, TemplateService, contains_variables, extract_variables, resolve,
};
