//! Internal helpers shared by the service clients.

pub mod log_sanitizer;
