//! Multipart upload

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::error::{RemoteError, Result};
use crate::http_client::HttpUtils;
use crate::traits::ObjectStorage;
use crate::types::{UploadFile, UploadKind, UploadResponse};

use super::{CloudinaryStorage, STORAGE_SERVICE};

impl CloudinaryStorage {
    pub(crate) fn upload_url(&self, cloud_name: &str, kind: UploadKind) -> String {
        format!(
            "{}/{}/{}/upload",
            self.api_base,
            urlencoding::encode(cloud_name),
            kind.resource_type()
        )
    }

    fn build_form(file: &UploadFile, kind: UploadKind, preset: &str, folder: &str) -> Result<Form> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(ref mime) = file.content_type {
            part = part
                .mime_str(mime)
                .map_err(|e| RemoteError::SerializationError {
                    service: STORAGE_SERVICE.to_string(),
                    detail: format!("Invalid content type '{mime}': {e}"),
                })?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("upload_preset", preset.to_string())
            .text("folder", folder.to_string());
        if kind == UploadKind::Video {
            form = form.text("resource_type", "video");
        }
        Ok(form)
    }
}

#[async_trait]
impl ObjectStorage for CloudinaryStorage {
    async fn upload(&self, file: &UploadFile, kind: UploadKind, folder: &str) -> Result<String> {
        let (cloud_name, preset) = self.settings()?;
        let url = self.upload_url(cloud_name, kind);
        let form = Self::build_form(file, kind, preset, folder)?;

        log::info!(
            "Uploading {} ({} bytes, {kind}) to folder '{folder}'",
            file.file_name,
            file.bytes.len()
        );

        let builder = self.client.post(&url).multipart(form);
        let (status, body) =
            HttpUtils::execute_raw(builder, STORAGE_SERVICE, "POST", &url).await?;

        // 非 2xx 时响应体原文即错误信息
        if !(200..300).contains(&status) {
            let message = body.trim();
            return Err(RemoteError::Rejected {
                service: STORAGE_SERVICE.to_string(),
                status,
                message: (!message.is_empty()).then(|| message.to_string()),
            });
        }

        let response: UploadResponse = HttpUtils::parse_json(&body, STORAGE_SERVICE)?;
        Ok(response.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_without_account_fails_fast() {
        let storage = CloudinaryStorage::new(None, Some("preset".into())).unwrap();
        let file = UploadFile::new("og.png", vec![1, 2, 3]);

        let result = storage.upload(&file, UploadKind::Image, "blogs").await;
        assert!(
            matches!(
                &result,
                Err(RemoteError::MissingConfiguration { setting, .. }) if setting == "CMS_STORAGE_ACCOUNT"
            ),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn blank_preset_counts_as_missing() {
        let storage = CloudinaryStorage::new(Some("demo".into()), Some("  ".into())).unwrap();
        let file = UploadFile::new("clip.mp4", vec![0; 8]);

        let result = storage.upload(&file, UploadKind::Video, "banners").await;
        assert!(
            matches!(
                &result,
                Err(RemoteError::MissingConfiguration { setting, .. }) if setting == "CMS_STORAGE_UPLOAD_PRESET"
            ),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn upload_url_per_kind() {
        let storage = CloudinaryStorage::new(Some("demo".into()), Some("p".into()))
            .unwrap()
            .with_api_base("https://media.local/v1_1/");
        assert_eq!(
            storage.upload_url("demo", UploadKind::Image),
            "https://media.local/v1_1/demo/image/upload"
        );
        assert_eq!(
            storage.upload_url("demo", UploadKind::Video),
            "https://media.local/v1_1/demo/video/upload"
        );
    }

    #[test]
    fn invalid_content_type_is_rejected() {
        let file = UploadFile::new("a.png", vec![1]).with_content_type("not a mime\n");
        let result = CloudinaryStorage::build_form(&file, UploadKind::Image, "p", "f");
        assert!(matches!(
            result,
            Err(RemoteError::SerializationError { .. })
        ));
    }
}
