//! # cms-forms-provider
//!
//! Remote service clients used by the dashboard forms.
//!
//! | Concern | Trait | Implementation |
//! |---------|-------|----------------|
//! | Authentication | [`AuthClient`] | [`SupabaseClient`] |
//! | Records | [`DataClient`] | [`SupabaseClient`] |
//! | Media files | [`ObjectStorage`] | [`CloudinaryStorage`] |
//!
//! The traits are the seam: form controllers receive `Arc<dyn ...>` handles, so
//! tests substitute in-memory fakes.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cms_forms_provider::{AuthClient, SignInRequest, SupabaseClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SupabaseClient::new("https://project.supabase.co", "anon-key")?;
//!     let session = client
//!         .sign_in_with_password(&SignInRequest {
//!             email: "editor@example.com".to_string(),
//!             password: "Passw0rd".to_string(),
//!         })
//!         .await?;
//!     println!("signed in as {}", session.user.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, RemoteError>`](RemoteError). A non-2xx answer
//! becomes [`RemoteError::Rejected`] carrying the service's own message when the
//! body has one; use [`RemoteError::user_message`] to pick what the user sees.
//! Nothing is retried.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{RemoteError, Result};

pub use providers::{CloudinaryStorage, SupabaseClient};

pub use traits::{AuthClient, DataClient, ObjectStorage};

pub use types::{
    AuthSession, AuthUser, SignInRequest, SignUpRequest, UploadFile, UploadKind,
};
