//! Couchdash Editor - Editor controllers and query dispatch
//!
//! The host renders the editors and owns every record they touch. Controllers
//! here are stateless: given the record the host delivered and one UI event,
//! they compute the next record and push it to the host's change sink.
//!
//! - `ConfigEditor` - connection fields and the write-only password
//! - `QueryEditor` - query text and the deployment's mode switch
//! - `CouchbaseDataSource` - resolves template variables at dispatch time
//! - `DataSourcePlugin` - wires the above for one deployment

mod config_editor;
mod controller;
mod datasource;
mod deployment;
pub mod logging;
mod plugin;
mod query_editor;
mod sink;

#[cfg(test)]
mod test_helpers;

pub use config_editor::{ConfigEditor, ConfigEvent, ConfigView, SecretFieldView, TextFieldView};
pub use controller::EditorController;
pub use datasource::{
    ConnectionTarget, CouchbaseDataSource, DispatchRequest, QueryTransport, ResolvedQuery,
};
pub use deployment::DeploymentConfig;
pub use plugin::DataSourcePlugin;
pub use query_editor::{ModeToggleView, QueryEditor, QueryEvent, QueryView};
pub use sink::ChangeSink;
