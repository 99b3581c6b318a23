//! Shared helpers for live tests against real services.
//!
//! Every test is skipped unless the matching environment variables are set.

#![allow(dead_code)]

use std::env;

use cms_forms_provider::{CloudinaryStorage, SupabaseClient};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_env {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub fn backend_client() -> Option<SupabaseClient> {
    let url = env::var("CMS_BACKEND_URL").ok()?;
    let key = env::var("CMS_BACKEND_ANON_KEY").ok()?;
    SupabaseClient::new(url, key).ok()
}

pub fn storage_client() -> Option<CloudinaryStorage> {
    let account = env::var("CMS_STORAGE_ACCOUNT").ok();
    let preset = env::var("CMS_STORAGE_UPLOAD_PRESET").ok();
    CloudinaryStorage::new(account, preset).ok()
}

/// A 1x1 transparent PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];
