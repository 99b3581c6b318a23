//! Blocking prompt abstract Trait

/// Modal text prompt.
pub trait Prompt: Send + Sync {
    /// Ask the user for a value. `None` when the prompt was dismissed.
    fn ask(&self, message: &str) -> Option<String>;
}

/// Prompt that is always dismissed (headless shells).
pub struct DismissedPrompt;

impl Prompt for DismissedPrompt {
    fn ask(&self, _message: &str) -> Option<String> {
        None
    }
}
