//! Plugin entry point

use couchdash_core::DataSourceSettings;

use crate::{ConfigEditor, CouchbaseDataSource, DeploymentConfig, QueryEditor};

/// One deployment of the Couchbase data source plugin
#[derive(Debug, Clone, Default)]
pub struct DataSourcePlugin {
    deployment: DeploymentConfig,
}

impl DataSourcePlugin {
    pub fn new(deployment: DeploymentConfig) -> Self {
        tracing::info!(
            query_variant = deployment.query_variant.name(),
            "couchbase data source plugin created"
        );
        Self { deployment }
    }

    pub fn deployment(&self) -> &DeploymentConfig {
        &self.deployment
    }

    pub fn config_editor(&self) -> ConfigEditor {
        ConfigEditor::new()
    }

    pub fn query_editor(&self) -> QueryEditor {
        QueryEditor::new(self.deployment.query_variant)
    }

    /// Data source bound to the host's instance settings
    pub fn data_source(&self, settings: DataSourceSettings) -> CouchbaseDataSource {
        CouchbaseDataSource::new(settings, self.deployment.query_variant)
    }
}
