#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the screens it hands out.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cms_forms_app::{AppConfig, AppError, AppStateBuilder};
use cms_forms_core::services::{SubmitOutcome, UploadOutcome};
use cms_forms_core::routes;
use cms_forms_core::traits::{AuthClient, DataClient, Navigator, ObjectStorage};
use cms_forms_provider::{
    AuthSession, AuthUser, RemoteError, Result as RemoteResult, SignInRequest, SignUpRequest,
    UploadFile, UploadKind,
};
use serde_json::Value;

// ===== Mock Implementations =====

struct StubBackend;

fn stub_user(email: &str) -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        email: Some(email.to_string()),
        user_metadata: Value::Null,
        email_confirmed_at: None,
    }
}

#[async_trait]
impl AuthClient for StubBackend {
    async fn sign_up(&self, request: &SignUpRequest) -> RemoteResult<AuthUser> {
        Ok(stub_user(&request.email))
    }

    async fn sign_in_with_password(&self, request: &SignInRequest) -> RemoteResult<AuthSession> {
        Ok(AuthSession {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_in: None,
            user: stub_user(&request.email),
        })
    }

    async fn reset_password_for_email(&self, _: &str, _: Option<&str>) -> RemoteResult<()> {
        Ok(())
    }
}

#[async_trait]
impl DataClient for StubBackend {
    async fn select_single(&self, _: &str, _: &str, _: &str, id: &str) -> RemoteResult<Value> {
        Err(RemoteError::Rejected {
            service: "data".to_string(),
            status: 406,
            message: Some(format!("No record {id}")),
        })
    }

    async fn insert(&self, _: &str, record: &Value) -> RemoteResult<Vec<Value>> {
        Ok(vec![record.clone()])
    }

    async fn update(&self, _: &str, _: &str, _: &str, record: &Value) -> RemoteResult<Vec<Value>> {
        Ok(vec![record.clone()])
    }
}

#[async_trait]
impl ObjectStorage for StubBackend {
    async fn upload(&self, file: &UploadFile, _: UploadKind, folder: &str) -> RemoteResult<String> {
        Ok(format!("https://cdn.example.com/{folder}/{}", file.file_name))
    }
}

#[derive(Default)]
struct RecordingNavigator {
    pushed: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.pushed.lock().unwrap().push(path.to_string());
    }
}

fn stub_builder(navigator: Arc<RecordingNavigator>) -> AppStateBuilder {
    let backend = Arc::new(StubBackend);
    AppStateBuilder::new()
        .auth(backend.clone())
        .data(backend.clone())
        .storage(backend)
        .navigator(navigator)
}

fn config_without_storage() -> AppConfig {
    AppConfig::from_lookup(|name| match name {
        "CMS_BACKEND_URL" => Some("https://project.supabase.co".to_string()),
        "CMS_BACKEND_ANON_KEY" => Some("anon-key".to_string()),
        _ => None,
    })
    .unwrap()
}

// ===== Builder =====

#[test]
fn build_requires_navigator() {
    let backend = Arc::new(StubBackend);
    let result = AppStateBuilder::new()
        .auth(backend.clone())
        .data(backend.clone())
        .storage(backend)
        .build();

    assert!(matches!(result, Err(AppError::MissingAdapter("navigator"))));
}

#[test]
fn build_requires_remote_clients() {
    let result = AppStateBuilder::new()
        .navigator(Arc::new(RecordingNavigator::default()))
        .build();

    assert!(matches!(result, Err(AppError::MissingAdapter("auth"))));
}

// ===== Screens =====

#[tokio::test]
async fn login_screen_uses_injected_collaborators() {
    let navigator = Arc::new(RecordingNavigator::default());
    let state = stub_builder(navigator.clone()).build().unwrap();
    let screen = state.login_screen();
    screen
        .form()
        .update(|f| {
            f.email = "editor@example.com".into();
            f.password = "Passw0rd!".into();
            f.remember_me = true;
        })
        .await;

    assert!(screen.submit().await.is_completed());
    assert_eq!(
        navigator.pushed.lock().unwrap().clone(),
        vec![routes::DASHBOARD.to_string()]
    );
    assert!(state.ctx.preferences.has_flag("rememberMe"));
}

#[tokio::test]
async fn screens_do_not_share_form_state() {
    let state = stub_builder(Arc::new(RecordingNavigator::default()))
        .build()
        .unwrap();
    let first = state.blog_create_screen();
    let second = state.blog_create_screen();

    first.form().update(|b| b.content.title = "Draft".into()).await;

    assert_eq!(second.form().values().await.content.title, "");
}

#[tokio::test]
async fn update_screen_reports_missing_record() {
    let state = stub_builder(Arc::new(RecordingNavigator::default()))
        .build()
        .unwrap();

    let screen = state.seo_banner_update_screen("42").await;

    assert_eq!(screen.values().await, None);
    assert_eq!(
        screen.form().notice().await.map(|n| n.message),
        Some("No record 42".to_string())
    );
}

#[tokio::test]
async fn invalid_create_never_inserts() {
    let state = stub_builder(Arc::new(RecordingNavigator::default()))
        .build()
        .unwrap();
    let screen = state.seo_banner_create_screen();

    let outcome = screen.submit().await;

    match outcome {
        SubmitOutcome::Invalid(errors) => assert!(errors.contains("seo.title")),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

// ===== Real clients from config =====

#[tokio::test]
async fn unconfigured_storage_fails_upload_without_request() {
    let config = config_without_storage();
    let state = AppStateBuilder::from_config(&config)
        .unwrap()
        .navigator(Arc::new(RecordingNavigator::default()))
        .build()
        .unwrap();
    let screen = state.blog_create_screen();
    let file = UploadFile::new("cover.png", vec![1, 2, 3]).with_content_type("image/png");

    let outcome = screen
        .upload_file("seo.openGraph.image", &file, UploadKind::Image)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UploadOutcome::Failed("CMS_STORAGE_ACCOUNT is not configured".to_string())
    );
    assert_eq!(
        screen.upload_alert().await.as_deref(),
        Some("Upload failed: CMS_STORAGE_ACCOUNT is not configured")
    );
}

#[test]
fn config_settings_reach_screens() {
    let config = AppConfig::from_lookup(|name| match name {
        "CMS_BACKEND_URL" => Some("https://project.supabase.co".to_string()),
        "CMS_BACKEND_ANON_KEY" => Some("anon-key".to_string()),
        "CMS_SITE_URL" => Some("https://cms.example.com/".to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppStateBuilder::from_config(&config)
        .unwrap()
        .navigator(Arc::new(RecordingNavigator::default()))
        .build()
        .unwrap();

    assert_eq!(
        state.ctx.site_link(routes::LOGIN).as_deref(),
        Some("https://cms.example.com/authentication/login")
    );
}
