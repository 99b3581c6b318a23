//! REST data API calls

use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::DataClient;

use super::{SupabaseClient, DATA_SERVICE};

/// Accept header that makes the REST API return a single object (and fail otherwise).
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// `{field}=eq.{value}` filter
fn eq_filter(id_field: &str, id_value: &str) -> String {
    format!(
        "{}=eq.{}",
        urlencoding::encode(id_field),
        urlencoding::encode(id_value)
    )
}

#[async_trait]
impl DataClient for SupabaseClient {
    async fn select_single(
        &self,
        collection: &str,
        columns: &str,
        id_field: &str,
        id_value: &str,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}?select={}&{}",
            self.rest_url(collection),
            urlencoding::encode(columns),
            eq_filter(id_field, id_value)
        );

        let builder = self
            .authorize(self.client.get(&url))
            .await
            .header("Accept", SINGLE_OBJECT);
        let text = HttpUtils::execute_request(builder, DATA_SERVICE, "GET", &url).await?;
        HttpUtils::parse_json(&text, DATA_SERVICE)
    }

    async fn insert(
        &self,
        collection: &str,
        record: &serde_json::Value,
    ) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}?select=*", self.rest_url(collection));
        let rows = serde_json::Value::Array(vec![record.clone()]);

        let builder = self
            .authorize(self.client.post(&url))
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows);
        let text = HttpUtils::execute_request(builder, DATA_SERVICE, "POST", &url).await?;
        HttpUtils::parse_json(&text, DATA_SERVICE)
    }

    async fn update(
        &self,
        collection: &str,
        id_field: &str,
        id_value: &str,
        record: &serde_json::Value,
    ) -> Result<Vec<serde_json::Value>> {
        let url = format!(
            "{}?{}&select=*",
            self.rest_url(collection),
            eq_filter(id_field, id_value)
        );

        let builder = self
            .authorize(self.client.patch(&url))
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .json(record);
        let text = HttpUtils::execute_request(builder, DATA_SERVICE, "PATCH", &url).await?;
        HttpUtils::parse_json(&text, DATA_SERVICE)
    }
}
