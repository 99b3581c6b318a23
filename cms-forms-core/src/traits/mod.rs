//! Collaborator abstraction trait definition
//!
//! Remote service traits live in `cms-forms-provider` and are re-exported here.

mod navigator;
mod preference_store;
mod prompt;

pub use cms_forms_provider::{AuthClient, DataClient, ObjectStorage};
pub use navigator::Navigator;
pub use preference_store::{InMemoryPreferenceStore, PreferenceStore, REMEMBER_ME_FLAG};
pub use prompt::{DismissedPrompt, Prompt};
