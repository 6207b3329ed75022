//! Host query record codec
//!
//! The host stores queries as `{refId, query, analytics?, fts?}`. Decoding
//! collapses the two booleans into one `QueryMode` and rejects records the
//! deployment's variant cannot represent.

use serde::{Deserialize, Serialize};

use super::{PartialQuery, QueryMode, QuerySpec, QueryVariant};
use crate::{CouchdashError, Result};

/// Query record in host layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fts: Option<bool>,
}

impl QueryRecord {
    /// Mode selected by the flags, `None` when neither flag is present
    fn mode(&self) -> Result<Option<QueryMode>> {
        let mode = match (self.analytics, self.fts) {
            (Some(true), Some(true)) => return Err(CouchdashError::ConflictingModes),
            (Some(true), _) => Some(QueryMode::Analytics),
            (_, Some(true)) => Some(QueryMode::FullTextSearch),
            (Some(false), _) | (_, Some(false)) => Some(QueryMode::Standard),
            (None, None) => None,
        };
        Ok(mode)
    }

    pub fn into_partial(self, variant: QueryVariant) -> Result<PartialQuery> {
        let mode = self.mode()?;
        if let Some(mode) = mode {
            ensure_allowed(variant, mode)?;
        }
        Ok(PartialQuery {
            ref_id: self.ref_id,
            text: self.query,
            mode,
        })
    }

    pub fn from_spec(spec: &QuerySpec, variant: QueryVariant) -> Result<Self> {
        ensure_allowed(variant, spec.mode)?;
        let flag = Some(spec.mode == variant.alternate_mode());
        let mut record = Self {
            ref_id: spec.ref_id.clone(),
            query: Some(spec.text.clone()),
            ..Self::default()
        };
        match variant {
            QueryVariant::AnalyticsToggle => record.analytics = flag,
            QueryVariant::FtsToggle => record.fts = flag,
        }
        Ok(record)
    }
}

fn ensure_allowed(variant: QueryVariant, mode: QueryMode) -> Result<()> {
    if variant.allows(mode) {
        Ok(())
    } else {
        Err(CouchdashError::ModeNotAvailable {
            mode,
            variant: variant.name(),
        })
    }
}

/// Decode a host query record for the given deployment variant
pub fn decode_query(json: &str, variant: QueryVariant) -> Result<PartialQuery> {
    let record: QueryRecord = serde_json::from_str(json)?;
    record.into_partial(variant)
}

/// Encode a query in host layout, setting only the variant's flag
pub fn encode_query(spec: &QuerySpec, variant: QueryVariant) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(QueryRecord::from_spec(spec, variant)?)?)
}
