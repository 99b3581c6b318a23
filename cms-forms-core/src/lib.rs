//! CMS Forms Core Library
//!
//! Form screens of the content dashboard:
//! - Registration and login (`RegistrationScreen`, `LoginScreen`)
//! - Blog and SEO-banner create/update (`RecordCreateScreen`, `RecordUpdateScreen`)
//!
//! All screens run on one generic [`services::FormLifecycle`]: validate, submit,
//! expose status, notify. Remote services, navigation, prompts and persisted
//! preferences are injected through [`ServiceContext`], so the same screens run
//! against the real backend or in-memory fakes.

pub mod error;
pub mod routes;
pub mod services;
pub mod traits;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{
    BlogCreateScreen, BlogUpdateScreen, FormLifecycle, FormView, LoginScreen, RegistrationScreen,
    SeoBannerCreateScreen, SeoBannerUpdateScreen, ScreenSettings, ServiceContext, SubmitOutcome,
};
pub use traits::{Navigator, PreferenceStore, Prompt};
