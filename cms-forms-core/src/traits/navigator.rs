//! Navigation abstract Trait

/// Screen navigation.
///
/// Platform implementation:
/// - Browser shells: history push
/// - Tests: `RecordingNavigator`
pub trait Navigator: Send + Sync {
    /// Navigate to `path`. Fire-and-forget.
    fn push(&self, path: &str);
}
