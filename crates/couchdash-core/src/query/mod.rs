//! Query model
//!
//! A query is its text plus the engine it runs on. Hosts may hand over
//! partially filled records; `apply_defaults` fills the gaps from
//! [`DEFAULT_QUERY`] without touching fields that are present, even when they
//! hold an empty string or the default mode.

mod wire;

pub use wire::{QueryRecord, decode_query, encode_query};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Engine a query is executed with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Query service (N1QL / SQL++)
    #[default]
    Standard,
    /// Analytics service
    Analytics,
    /// Full-text search service
    FullTextSearch,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Standard => f.write_str("standard"),
            QueryMode::Analytics => f.write_str("analytics"),
            QueryMode::FullTextSearch => f.write_str("full-text search"),
        }
    }
}

/// Which mode switch a deployment exposes.
///
/// A deployment offers either the analytics switch or the full-text-search
/// switch, never both, so each variant has exactly two legal modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryVariant {
    #[default]
    AnalyticsToggle,
    FtsToggle,
}

impl QueryVariant {
    /// The non-standard mode this variant can switch on
    pub fn alternate_mode(&self) -> QueryMode {
        match self {
            QueryVariant::AnalyticsToggle => QueryMode::Analytics,
            QueryVariant::FtsToggle => QueryMode::FullTextSearch,
        }
    }

    pub fn allows(&self, mode: QueryMode) -> bool {
        mode == QueryMode::Standard || mode == self.alternate_mode()
    }

    pub fn legal_modes(&self) -> [QueryMode; 2] {
        [QueryMode::Standard, self.alternate_mode()]
    }

    /// Name of the boolean flag in the host query record
    pub fn flag_key(&self) -> &'static str {
        match self {
            QueryVariant::AnalyticsToggle => "analytics",
            QueryVariant::FtsToggle => "fts",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QueryVariant::AnalyticsToggle => "analytics",
            QueryVariant::FtsToggle => "full-text search",
        }
    }

    /// Flip between `Standard` and this variant's alternate mode
    pub fn toggle(&self, mode: QueryMode) -> QueryMode {
        if mode == self.alternate_mode() {
            QueryMode::Standard
        } else {
            self.alternate_mode()
        }
    }
}

/// A fully specified query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySpec {
    /// Host-assigned identity, carried through edits untouched
    pub ref_id: Option<String>,
    pub text: String,
    pub mode: QueryMode,
}

/// The default record partial queries are filled from
pub const DEFAULT_QUERY: QuerySpec = QuerySpec {
    ref_id: None,
    text: String::new(),
    mode: QueryMode::Standard,
};

impl QuerySpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..DEFAULT_QUERY
        }
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: QueryMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Switch between the query service and full-text search.
    ///
    /// Only meaningful for queries of an FTS deployment. An analytics query
    /// has no FTS switch; use [`QuerySpec::toggled`] with the deployment's
    /// variant instead.
    pub fn toggle_fts(&self) -> Self {
        debug_assert!(
            QueryVariant::FtsToggle.allows(self.mode),
            "toggle_fts called on {} query",
            self.mode
        );
        self.toggled(QueryVariant::FtsToggle)
    }

    pub fn toggled(&self, variant: QueryVariant) -> Self {
        self.with_mode(variant.toggle(self.mode))
    }

    /// True when there is nothing to execute
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A query record as the host may deliver it, with any field missing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialQuery {
    pub ref_id: Option<String>,
    pub text: Option<String>,
    pub mode: Option<QueryMode>,
}

impl PartialQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: QueryMode) -> Self {
        Self {
            mode: Some(mode),
            ..self.clone()
        }
    }
}

impl From<QuerySpec> for PartialQuery {
    fn from(spec: QuerySpec) -> Self {
        Self {
            ref_id: spec.ref_id,
            text: Some(spec.text),
            mode: Some(spec.mode),
        }
    }
}

/// Fill every absent field from [`DEFAULT_QUERY`].
///
/// Shallow merge: a present field is kept as-is, including `Some("")` and
/// `Some(QueryMode::Standard)`.
pub fn apply_defaults(partial: &PartialQuery) -> QuerySpec {
    QuerySpec {
        ref_id: partial.ref_id.clone().or(DEFAULT_QUERY.ref_id),
        text: partial.text.clone().unwrap_or(DEFAULT_QUERY.text),
        mode: partial.mode.unwrap_or(DEFAULT_QUERY.mode),
    }
}
