//! 测试辅助模块
//!
//! In-memory fakes for the remote clients and collaborators, plus sample form values.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Notify, RwLock};

use cms_forms_provider::{
    AuthSession, AuthUser, RemoteError, Result as RemoteResult, SignInRequest, SignUpRequest,
    UploadFile, UploadKind,
};

use crate::services::{ScreenSettings, ServiceContext};
use crate::traits::{
    AuthClient, DataClient, InMemoryPreferenceStore, Navigator, ObjectStorage, Prompt,
};
use crate::types::{
    BannerMeta, BlogContent, BlogRecord, CallToAction, EntryList, LinkEntry, OpenGraph,
    RegistrationForm, SeoBannerRecord, SeoMeta, TextEntry, DEFAULT_META_ROBOTS, DEFAULT_OG_TYPE,
};

pub const SITE_URL: &str = "https://cms.example.com";

// ===== Gate =====

/// Holds a fake call in flight until the test releases it.
pub struct Gate {
    entered: Notify,
    released: Notify,
}

impl Gate {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            released: Notify::new(),
        })
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.released.notified().await;
    }

    /// Wait until a call reached the gate.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

async fn pass_gate(slot: &RwLock<Option<Arc<Gate>>>) {
    let gate = slot.read().await.clone();
    if let Some(gate) = gate {
        gate.pass().await;
    }
}

async fn install_gate(slot: &RwLock<Option<Arc<Gate>>>) -> Arc<Gate> {
    let gate = Gate::new();
    *slot.write().await = Some(Arc::clone(&gate));
    gate
}

// ===== FakeAuthClient =====

#[derive(Default)]
pub struct FakeAuthClient {
    sign_ups: RwLock<Vec<SignUpRequest>>,
    sign_ins: RwLock<Vec<SignInRequest>>,
    resets: RwLock<Vec<(String, Option<String>)>>,
    /// 如果 Some，所有调用返回此错误
    error: RwLock<Option<RemoteError>>,
}

impl FakeAuthClient {
    pub async fn fail_with(&self, error: RemoteError) {
        *self.error.write().await = Some(error);
    }

    pub async fn sign_up_calls(&self) -> Vec<SignUpRequest> {
        self.sign_ups.read().await.clone()
    }

    pub async fn sign_in_count(&self) -> usize {
        self.sign_ins.read().await.len()
    }

    pub async fn reset_calls(&self) -> Vec<(String, Option<String>)> {
        self.resets.read().await.clone()
    }

    async fn check(&self) -> RemoteResult<()> {
        match self.error.read().await.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn fake_user(email: &str, metadata: Value) -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        email: Some(email.to_string()),
        user_metadata: metadata,
        email_confirmed_at: None,
    }
}

#[async_trait]
impl AuthClient for FakeAuthClient {
    async fn sign_up(&self, request: &SignUpRequest) -> RemoteResult<AuthUser> {
        self.sign_ups.write().await.push(request.clone());
        self.check().await?;
        Ok(fake_user(&request.email, request.metadata.clone()))
    }

    async fn sign_in_with_password(&self, request: &SignInRequest) -> RemoteResult<AuthSession> {
        self.sign_ins.write().await.push(request.clone());
        self.check().await?;
        Ok(AuthSession {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_in: Some(3600),
            user: fake_user(&request.email, Value::Null),
        })
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> RemoteResult<()> {
        self.resets
            .write()
            .await
            .push((email.to_string(), redirect_to.map(str::to_string)));
        self.check().await
    }
}

// ===== FakeDataClient =====

#[derive(Default)]
pub struct FakeDataClient {
    rows: RwLock<HashMap<(String, String), Value>>,
    insert_response: RwLock<Option<Vec<Value>>>,
    inserts: RwLock<Vec<(String, Value)>>,
    updates: RwLock<Vec<(String, String, Value)>>,
    selects: RwLock<usize>,
    error: RwLock<Option<RemoteError>>,
    insert_gate: RwLock<Option<Arc<Gate>>>,
    select_gate: RwLock<Option<Arc<Gate>>>,
    update_gate: RwLock<Option<Arc<Gate>>>,
}

impl FakeDataClient {
    /// Seed a stored row.
    pub async fn store(&self, collection: &str, id: &str, row: Value) {
        self.rows
            .write()
            .await
            .insert((collection.to_string(), id.to_string()), row);
    }

    /// Rows returned by the next inserts (default: the inserted record).
    pub async fn respond_with(&self, rows: Vec<Value>) {
        *self.insert_response.write().await = Some(rows);
    }

    pub async fn fail_with(&self, error: RemoteError) {
        *self.error.write().await = Some(error);
    }

    /// Hold inserts until the returned gate is released.
    pub async fn hold_inserts(&self) -> Arc<Gate> {
        install_gate(&self.insert_gate).await
    }

    /// Hold selects until the returned gate is released.
    pub async fn hold_selects(&self) -> Arc<Gate> {
        install_gate(&self.select_gate).await
    }

    /// Hold updates until the returned gate is released.
    pub async fn hold_updates(&self) -> Arc<Gate> {
        install_gate(&self.update_gate).await
    }

    /// Let later selects through without waiting.
    pub async fn release_selects(&self) {
        *self.select_gate.write().await = None;
    }

    pub async fn inserts(&self) -> Vec<(String, Value)> {
        self.inserts.read().await.clone()
    }

    pub async fn updates(&self) -> Vec<(String, String, Value)> {
        self.updates.read().await.clone()
    }

    pub async fn select_count(&self) -> usize {
        *self.selects.read().await
    }

    async fn check(&self) -> RemoteResult<()> {
        match self.error.read().await.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataClient for FakeDataClient {
    async fn select_single(
        &self,
        collection: &str,
        _columns: &str,
        _id_field: &str,
        id_value: &str,
    ) -> RemoteResult<Value> {
        *self.selects.write().await += 1;
        pass_gate(&self.select_gate).await;
        self.check().await?;
        self.rows
            .read()
            .await
            .get(&(collection.to_string(), id_value.to_string()))
            .cloned()
            .ok_or_else(|| RemoteError::Rejected {
                service: "data".to_string(),
                status: 406,
                message: Some("JSON object requested, multiple (or no) rows returned".to_string()),
            })
    }

    async fn insert(&self, collection: &str, record: &Value) -> RemoteResult<Vec<Value>> {
        self.inserts
            .write()
            .await
            .push((collection.to_string(), record.clone()));
        pass_gate(&self.insert_gate).await;
        self.check().await?;
        Ok(self
            .insert_response
            .read()
            .await
            .clone()
            .unwrap_or_else(|| vec![record.clone()]))
    }

    async fn update(
        &self,
        collection: &str,
        _id_field: &str,
        id_value: &str,
        record: &Value,
    ) -> RemoteResult<Vec<Value>> {
        self.updates.write().await.push((
            collection.to_string(),
            id_value.to_string(),
            record.clone(),
        ));
        pass_gate(&self.update_gate).await;
        self.check().await?;
        Ok(vec![record.clone()])
    }
}

// ===== FakeStorage =====

#[derive(Default)]
pub struct FakeStorage {
    url: RwLock<Option<String>>,
    uploads: RwLock<Vec<(UploadKind, String)>>,
    error: RwLock<Option<RemoteError>>,
    gate: RwLock<Option<Arc<Gate>>>,
}

impl FakeStorage {
    pub async fn respond_with(&self, url: &str) {
        *self.url.write().await = Some(url.to_string());
    }

    pub async fn fail_with(&self, error: RemoteError) {
        *self.error.write().await = Some(error);
    }

    pub async fn hold_uploads(&self) -> Arc<Gate> {
        install_gate(&self.gate).await
    }

    /// `(kind, folder)` of every upload.
    pub async fn uploads(&self) -> Vec<(UploadKind, String)> {
        self.uploads.read().await.clone()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(&self, file: &UploadFile, kind: UploadKind, folder: &str) -> RemoteResult<String> {
        self.uploads.write().await.push((kind, folder.to_string()));
        pass_gate(&self.gate).await;
        if let Some(e) = self.error.read().await.clone() {
            return Err(e);
        }
        Ok(self
            .url
            .read()
            .await
            .clone()
            .unwrap_or_else(|| format!("https://cdn.example.com/{folder}/{}", file.file_name)))
    }
}

// ===== Collaborators =====

#[derive(Default)]
pub struct RecordingNavigator {
    pushed: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn pushed(&self) -> Vec<String> {
        self.pushed.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        if let Ok(mut pushed) = self.pushed.lock() {
            pushed.push(path.to_string());
        }
    }
}

/// Prompt with a preset answer (dismissed by default).
#[derive(Default)]
pub struct ScriptedPrompt {
    answer: Mutex<Option<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answer_with(&self, answer: Option<&str>) {
        if let Ok(mut slot) = self.answer.lock() {
            *slot = answer.map(str::to_string);
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, message: &str) -> Option<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(message.to_string());
        }
        self.answer.lock().ok().and_then(|a| a.clone())
    }
}

// ===== TestContext =====

/// Fakes plus a [`ServiceContext`] wired to them.
pub struct TestContext {
    pub auth: Arc<FakeAuthClient>,
    pub data: Arc<FakeDataClient>,
    pub storage: Arc<FakeStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub preferences: Arc<InMemoryPreferenceStore>,
    pub prompt: Arc<ScriptedPrompt>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            auth: Arc::new(FakeAuthClient::default()),
            data: Arc::new(FakeDataClient::default()),
            storage: Arc::new(FakeStorage::default()),
            navigator: Arc::new(RecordingNavigator::default()),
            preferences: Arc::new(InMemoryPreferenceStore::new()),
            prompt: Arc::new(ScriptedPrompt::default()),
        }
    }

    pub fn context(&self) -> Arc<ServiceContext> {
        Arc::new(ServiceContext::new(
            self.auth.clone(),
            self.data.clone(),
            self.storage.clone(),
            self.navigator.clone(),
            self.preferences.clone(),
            self.prompt.clone(),
            ScreenSettings {
                site_url: Some(SITE_URL.to_string()),
            },
        ))
    }
}

// ===== Samples =====

pub fn valid_registration() -> RegistrationForm {
    RegistrationForm {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        password: "Engine42".into(),
        confirm_password: "Engine42".into(),
        terms: true,
    }
}

fn sample_seo() -> SeoMeta {
    SeoMeta {
        title: "Launch week".into(),
        description: "Everything we shipped this week".into(),
        keywords: "launch, release, cms".into(),
        canonical_url: "https://www.example.com/launch-week".into(),
        meta_robots: DEFAULT_META_ROBOTS.into(),
        open_graph: OpenGraph {
            title: "Launch week".into(),
            description: "Everything we shipped".into(),
            url: "https://www.example.com/launch-week".into(),
            image: "https://cdn.example.com/og/launch.png".into(),
            og_type: DEFAULT_OG_TYPE.into(),
        },
    }
}

fn sample_banner() -> BannerMeta {
    BannerMeta {
        title: "Launch week".into(),
        description: "Five days, five releases".into(),
        video_url: "https://cdn.example.com/video/launch.mp4".into(),
    }
}

pub fn sample_seo_banner() -> SeoBannerRecord {
    SeoBannerRecord {
        seo: sample_seo(),
        banner: sample_banner(),
    }
}

pub fn sample_blog() -> BlogRecord {
    BlogRecord {
        seo: sample_seo(),
        banner: sample_banner(),
        content: BlogContent {
            title: "What we shipped".into(),
            date: "2024-05-01".into(),
            call_to_action: CallToAction {
                slug: "/pricing".into(),
                text: "See pricing".into(),
            },
            description: EntryList::from_entries(vec![
                TextEntry::new("Day one brought the new editor."),
                TextEntry::new("Day two brought scheduled posts."),
            ]),
            tags: EntryList::from_entries(vec![TextEntry::new("launch"), TextEntry::new("cms")]),
            urls: EntryList::from_entries(vec![LinkEntry::new(
                "Changelog",
                "https://www.example.com/changelog",
            )]),
        },
    }
}
