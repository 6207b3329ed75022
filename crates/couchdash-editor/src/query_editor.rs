//! Query editor

use couchdash_core::{PartialQuery, QueryMode, QueryVariant, apply_defaults};

use crate::EditorController;

/// User input on the query editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    TextChanged(String),
    /// The deployment's mode switch was flipped
    ModeToggled,
    ModeSelected(QueryMode),
}

/// The mode switch as the host should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeToggleView {
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryView {
    pub text: String,
    pub mode: QueryMode,
    pub toggle: ModeToggleView,
    pub modes: [QueryMode; 2],
}

/// Edits a query record for one deployment variant.
///
/// The model is the host's record as delivered, possibly partial. Edits
/// replace one field and carry everything else over, so fields the host left
/// out stay out.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEditor {
    variant: QueryVariant,
}

impl QueryEditor {
    pub fn new(variant: QueryVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> QueryVariant {
        self.variant
    }

    fn toggle_label(&self) -> &'static str {
        match self.variant {
            QueryVariant::AnalyticsToggle => "Run using analytics service",
            QueryVariant::FtsToggle => "FTS Query",
        }
    }
}

impl EditorController for QueryEditor {
    type Model = PartialQuery;
    type Event = QueryEvent;
    type View = QueryView;

    fn render(&self, query: &PartialQuery) -> QueryView {
        let spec = apply_defaults(query);
        QueryView {
            toggle: ModeToggleView {
                label: self.toggle_label(),
                checked: spec.mode == self.variant.alternate_mode(),
            },
            text: spec.text,
            mode: spec.mode,
            modes: self.variant.legal_modes(),
        }
    }

    fn next_state(&self, query: &PartialQuery, event: QueryEvent) -> Option<PartialQuery> {
        match event {
            QueryEvent::TextChanged(text) => {
                tracing::debug!(ref_id = ?query.ref_id, len = text.len(), "query text edited");
                Some(query.with_text(text))
            }
            QueryEvent::ModeToggled => {
                let mode = self.variant.toggle(apply_defaults(query).mode);
                tracing::debug!(ref_id = ?query.ref_id, %mode, "query mode toggled");
                Some(query.with_mode(mode))
            }
            QueryEvent::ModeSelected(mode) if self.variant.allows(mode) => {
                tracing::debug!(ref_id = ?query.ref_id, %mode, "query mode selected");
                Some(query.with_mode(mode))
            }
            QueryEvent::ModeSelected(mode) => {
                tracing::warn!(
                    %mode,
                    variant = self.variant.name(),
                    "ignoring mode not offered by this editor"
                );
                None
            }
        }
    }
}
