//! Type definitions

mod auth;
mod field_path;
mod record;
mod status;

pub use auth::{LoginForm, RegistrationForm};
pub use field_path::{FieldErrors, FieldPath};
pub use record::{
    BannerMeta, BlogContent, BlogRecord, CallToAction, EntryList, LinkEntry, OpenGraph,
    SeoBannerRecord, SeoMeta, TextEntry, DEFAULT_META_ROBOTS, DEFAULT_OG_TYPE,
};
pub use status::{FetchStatus, Notice, NoticeAction, NoticeKind, SubmissionStatus, UploadStatus};
