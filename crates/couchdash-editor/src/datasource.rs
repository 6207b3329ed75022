//! Query dispatch
//!
//! Template variables are resolved here, once per query, at the moment a
//! request is handed to the host transport. The scope comes in with the
//! dispatch call and is never stored, so edits made earlier can't pin a
//! stale value.

use couchdash_core::{
    DataSourceSettings, PartialQuery, QueryMode, QueryVariant, Result, apply_defaults,
    query::encode_query,
};
use couchdash_templates::{
    DefaultTemplateService, ExpandedQuery, TemplateScope, TemplateService, TimeRange,
    expand_time_macros,
};

/// Where the backend should run the queries; the password stays server-side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub datasource_uid: String,
    pub host: Option<String>,
    pub username: Option<String>,
    pub bucket: Option<String>,
}

/// A query with its template variables substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub ref_id: Option<String>,
    pub text: String,
    pub mode: QueryMode,
}

impl ResolvedQuery {
    /// Host layout `{refId, query, analytics|fts}` for the transport
    pub fn to_record(&self, variant: QueryVariant) -> Result<serde_json::Value> {
        let spec = couchdash_core::QuerySpec {
            ref_id: self.ref_id.clone(),
            text: self.text.clone(),
            mode: self.mode,
        };
        encode_query(&spec, variant)
    }

    /// Apply the time-range macro for the panel's range
    pub fn expand_time_macros(&self, range: &TimeRange) -> Result<ExpandedQuery> {
        expand_time_macros(&self.text, range)
    }
}

/// One batch handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub target: ConnectionTarget,
    pub queries: Vec<ResolvedQuery>,
}

/// The host's channel to the backend. Delivery, retries and ordering of
/// results belong to the implementation.
pub trait QueryTransport {
    fn dispatch(&self, request: DispatchRequest);
}

/// Couchbase data source instance
pub struct CouchbaseDataSource<S = DefaultTemplateService> {
    settings: DataSourceSettings,
    variant: QueryVariant,
    templates: S,
}

impl CouchbaseDataSource {
    pub fn new(settings: DataSourceSettings, variant: QueryVariant) -> Self {
        Self::with_template_service(settings, variant, DefaultTemplateService)
    }
}

impl<S: TemplateService> CouchbaseDataSource<S> {
    /// Use the host's own template service for substitution
    pub fn with_template_service(
        settings: DataSourceSettings,
        variant: QueryVariant,
        templates: S,
    ) -> Self {
        Self {
            settings,
            variant,
            templates,
        }
    }

    pub fn settings(&self) -> &DataSourceSettings {
        &self.settings
    }

    pub fn variant(&self) -> QueryVariant {
        self.variant
    }

    pub fn target(&self) -> ConnectionTarget {
        let connection = self.settings.connection();
        ConnectionTarget {
            datasource_uid: self.settings.uid.clone(),
            host: connection.host.clone(),
            username: connection.username.clone(),
            bucket: connection.bucket.clone(),
        }
    }

    /// Fill defaults and substitute variables from `scope`
    pub fn apply_template_variables(
        &self,
        query: &PartialQuery,
        scope: &TemplateScope,
    ) -> ResolvedQuery {
        let spec = apply_defaults(query);
        ResolvedQuery {
            text: self.templates.replace(&spec.text, scope),
            ref_id: spec.ref_id,
            mode: spec.mode,
        }
    }

    /// Resolve and dispatch `queries` with the scope valid right now.
    ///
    /// Blank queries and queries in a mode this deployment does not offer are
    /// skipped. Returns the number of queries handed to the transport.
    pub fn query(
        &self,
        queries: &[PartialQuery],
        scope: &TemplateScope,
        transport: &dyn QueryTransport,
    ) -> usize {
        let mut resolved = Vec::with_capacity(queries.len());
        for query in queries {
            let mode = apply_defaults(query).mode;
            if !self.variant.allows(mode) {
                tracing::warn!(
                    ref_id = ?query.ref_id,
                    %mode,
                    variant = self.variant.name(),
                    "skipping query in unavailable mode"
                );
                continue;
            }

            let query = self.apply_template_variables(query, scope);
            if query.text.trim().is_empty() {
                tracing::warn!(ref_id = ?query.ref_id, "skipping empty query");
                continue;
            }
            resolved.push(query);
        }

        let count = resolved.len();
        if count == 0 {
            return 0;
        }

        tracing::info!(
            datasource_uid = %self.settings.uid,
            queries = count,
            variables = scope.len(),
            "dispatching queries"
        );
        transport.dispatch(DispatchRequest {
            target: self.target(),
            queries: resolved,
        });
        count
    }
}
