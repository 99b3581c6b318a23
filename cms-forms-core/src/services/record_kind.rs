//! Record collections edited by the dashboard

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use cms_forms_provider::UploadKind;

use crate::error::{CoreError, CoreResult};
use crate::routes;
use crate::services::FormSchema;
use crate::types::{BannerMeta, BlogRecord, FieldErrors, FieldPath, SeoBannerRecord, SeoMeta};
use crate::validation::{validate_blog, validate_seo_banner};

const OG_IMAGE_PATH: &str = "seo.openGraph.image";
const BANNER_VIDEO_PATH: &str = "banner.videoUrl";

/// Upload kind of a media field, `None` for fields that take no uploads.
#[must_use]
pub fn media_kind(path: &FieldPath) -> Option<UploadKind> {
    match path.as_str() {
        OG_IMAGE_PATH => Some(UploadKind::Image),
        BANNER_VIDEO_PATH => Some(UploadKind::Video),
        _ => None,
    }
}

/// A remote collection and its form shape.
pub trait RecordKind: FormSchema + Default + Serialize + DeserializeOwned {
    /// Remote collection name.
    const COLLECTION: &'static str;
    /// List page shown after a save.
    const LIST_PATH: &'static str;
    /// Storage folder for uploaded media.
    const UPLOAD_FOLDER: &'static str;
    /// Human name used in banners.
    const LABEL: &'static str;

    fn seo_mut(&mut self) -> &mut SeoMeta;

    fn banner_mut(&mut self) -> &mut BannerMeta;

    /// Give defaulted fields their documented values and empty lists one blank entry.
    fn fill_defaults(&mut self) {
        self.seo_mut().fill_defaults();
    }

    /// Build form values from a server row.
    ///
    /// Nulls count as missing; unknown columns (`id`, timestamps) are dropped.
    fn hydrate(row: Value) -> CoreResult<Self> {
        let mut record: Self = serde_json::from_value(strip_nulls(row))?;
        record.fill_defaults();
        Ok(record)
    }

    /// Server shape of the form values.
    fn to_payload(&self) -> CoreResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Write an uploaded media URL into its field.
    fn set_media_url(&mut self, path: &FieldPath, url: String) -> CoreResult<()> {
        match path.as_str() {
            OG_IMAGE_PATH => self.seo_mut().open_graph.image = url,
            BANNER_VIDEO_PATH => self.banner_mut().video_url = url,
            other => return Err(CoreError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

/// Id of an inserted row, when the server returned one.
pub(crate) fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl FormSchema for SeoBannerRecord {
    fn validate(&self) -> FieldErrors {
        validate_seo_banner(self)
    }
}

impl RecordKind for SeoBannerRecord {
    const COLLECTION: &'static str = "seo_banners";
    const LIST_PATH: &'static str = routes::CREATED_SEO_BANNERS;
    const UPLOAD_FOLDER: &'static str = "seo-banners";
    const LABEL: &'static str = "SEO banner";

    fn seo_mut(&mut self) -> &mut SeoMeta {
        &mut self.seo
    }

    fn banner_mut(&mut self) -> &mut BannerMeta {
        &mut self.banner
    }
}

impl FormSchema for BlogRecord {
    fn validate(&self) -> FieldErrors {
        validate_blog(self)
    }
}

impl RecordKind for BlogRecord {
    const COLLECTION: &'static str = "blogs";
    const LIST_PATH: &'static str = routes::CREATED_BLOGS;
    const UPLOAD_FOLDER: &'static str = "blogs";
    const LABEL: &'static str = "Blog";

    fn seo_mut(&mut self) -> &mut SeoMeta {
        &mut self.seo
    }

    fn banner_mut(&mut self) -> &mut BannerMeta {
        &mut self.banner
    }

    fn fill_defaults(&mut self) {
        self.seo.fill_defaults();
        self.content.description.ensure_entry();
        self.content.tags.ensure_entry();
        self.content.urls.ensure_entry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_blog, sample_seo_banner};
    use crate::types::{EntryList, DEFAULT_META_ROBOTS, DEFAULT_OG_TYPE};
    use serde_json::json;

    #[test]
    fn hydrate_round_trips_saved_blog() {
        let blog = sample_blog();
        let mut row = blog.to_payload().unwrap();
        row["id"] = json!(17);
        row["created_at"] = json!("2024-05-01T10:00:00Z");

        assert_eq!(BlogRecord::hydrate(row).unwrap(), blog);
    }

    #[test]
    fn hydrate_round_trips_saved_banner() {
        let banner = sample_seo_banner();
        let row = banner.to_payload().unwrap();
        assert_eq!(SeoBannerRecord::hydrate(row).unwrap(), banner);
    }

    #[test]
    fn hydrate_fills_defaults_for_sparse_rows() {
        let row = json!({
            "seo": { "title": "Hello", "metaRobots": null, "openGraph": { "type": "" } },
            "content": { "tags": { "list": [] }, "urls": null }
        });

        let blog = BlogRecord::hydrate(row).unwrap();

        assert_eq!(blog.seo.title, "Hello");
        assert_eq!(blog.seo.meta_robots, DEFAULT_META_ROBOTS);
        assert_eq!(blog.seo.open_graph.og_type, DEFAULT_OG_TYPE);
        assert_eq!(blog.content.tags, EntryList::single_blank());
        assert_eq!(blog.content.urls.len(), 1);
        assert_eq!(blog.content.description.len(), 1);
    }

    #[test]
    fn payload_uses_wire_names() {
        let payload = sample_seo_banner().to_payload().unwrap();
        assert!(payload["seo"]["openGraph"]["type"].is_string());
        assert!(payload["seo"]["canonicalUrl"].is_string());
        assert!(payload["banner"]["videoUrl"].is_string());
        assert!(payload.get("content").is_none());
    }

    #[test]
    fn media_urls_land_in_their_fields() {
        let mut banner = SeoBannerRecord::default();
        banner
            .set_media_url(&FieldPath::from(OG_IMAGE_PATH), "https://cdn/x.png".into())
            .unwrap();
        banner
            .set_media_url(&FieldPath::from(BANNER_VIDEO_PATH), "https://cdn/v.mp4".into())
            .unwrap();

        assert_eq!(banner.seo.open_graph.image, "https://cdn/x.png");
        assert_eq!(banner.banner.video_url, "https://cdn/v.mp4");
        assert!(matches!(
            banner.set_media_url(&FieldPath::from("seo.title"), "x".into()),
            Err(CoreError::UnknownField(_))
        ));
    }

    #[test]
    fn media_kinds() {
        assert_eq!(media_kind(&OG_IMAGE_PATH.into()), Some(UploadKind::Image));
        assert_eq!(media_kind(&BANNER_VIDEO_PATH.into()), Some(UploadKind::Video));
        assert_eq!(media_kind(&"banner.title".into()), None);
    }

    #[test]
    fn row_id_accepts_numbers_and_strings() {
        assert_eq!(row_id(&json!({"id": 5})), Some("5".into()));
        assert_eq!(row_id(&json!({"id": "b-1"})), Some("b-1".into()));
        assert_eq!(row_id(&json!({})), None);
    }
}
