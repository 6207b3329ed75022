//! Editor controller abstraction

use crate::ChangeSink;

/// A stateless editor: renders a model and maps UI events to the next model.
///
/// Implementations keep no copy of the model between calls. The host
/// redelivers the current model on every render, so controller instances can
/// be recreated or dropped at any time.
pub trait EditorController {
    type Model;
    type Event;
    type View;

    /// View state for the host to draw
    fn render(&self, model: &Self::Model) -> Self::View;

    /// Next model for `event`, or `None` if the event is ignored
    fn next_state(&self, model: &Self::Model, event: Self::Event) -> Option<Self::Model>;

    /// Compute the next model and push it to `sink`.
    ///
    /// Returns whether anything was emitted.
    fn handle(
        &self,
        model: &Self::Model,
        event: Self::Event,
        sink: &dyn ChangeSink<Self::Model>,
    ) -> bool {
        match self.next_state(model, event) {
            Some(next) => {
                sink.emit(next);
                true
            }
            None => false,
        }
    }
}
