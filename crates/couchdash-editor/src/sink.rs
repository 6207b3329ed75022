//! Host change callbacks

/// Receives the complete next record after every edit.
///
/// This is the host's `onChange` / `onOptionsChange`. Any `Fn(T)` closure
/// is a sink.
pub trait ChangeSink<T> {
    fn emit(&self, next: T);
}

impl<T, F> ChangeSink<T> for F
where
    F: Fn(T),
{
    fn emit(&self, next: T) {
        self(next)
    }
}
