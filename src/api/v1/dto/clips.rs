/*
 * Responsibility
 * - Clips の request/response DTO
 * - validation (形式チェック) は validate() に寄せる
 * - レスポンスは {success, ...} の封筒形式。既存クライアントとの契約。
 *
 * Note:
 * - request body に owner 相当の field があっても struct に無いので無視される。
 *   所有者は常に認証済み actor から handler が決める。
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::services::query::Pagination;

#[derive(Debug, Deserialize)]
pub struct CreateClipRequest {
    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CreateClipRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateClipRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    // Tri-state:
    // - field missing        -> None         (do not update)
    // - "url": null          -> Some(None)   (clear)
    // - "url": "https://..." -> Some(Some(v))
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl UpdateClipRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(content) = &self.content
            && content.trim().is_empty()
        {
            return Err("content cannot be empty");
        }

        Ok(())
    }
}

// serde は Option<Option<T>> をそのままでは区別しない (null も missing も None)。
// field が存在した時だけ呼ばれる deserializer で外側を Some に持ち上げる。
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct ListClipsParams {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ClipResponse {
    pub id: String, // encoded (内部の連番は出さない)
    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub owner_id: String, // UUID
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ClipBody {
    pub success: bool,
    pub data: ClipResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ClipListBody {
    pub success: bool,
    pub count: usize,
    pub pagination: Pagination,
    pub data: Vec<ClipResponse>,
}

#[derive(Debug, Serialize)]
pub struct EmptyData {}

#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub success: bool,
    pub data: EmptyData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_title_and_content() {
        let req = CreateClipRequest {
            title: "  ".to_string(),
            content: "body".to_string(),
            url: None,
            tags: None,
        };
        assert_eq!(req.validate(), Err("title is required"));

        let req = CreateClipRequest {
            title: "Alpha notes".to_string(),
            content: String::new(),
            url: None,
            tags: None,
        };
        assert_eq!(req.validate(), Err("content is required"));
    }

    #[test]
    fn create_ignores_an_owner_field_in_the_body() {
        // 所有者の成りすまし対策: body の owner 相当 field は型に存在しない
        let req: CreateClipRequest = serde_json::from_value(json!({
            "title": "Alpha notes",
            "content": "body",
            "user": "someone-else",
            "owner_id": "someone-else",
        }))
        .unwrap();

        assert_eq!(req.title, "Alpha notes");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_rejects_blank_changed_fields() {
        let req: UpdateClipRequest = serde_json::from_value(json!({"title": ""})).unwrap();
        assert_eq!(req.validate(), Err("title cannot be empty"));

        let req: UpdateClipRequest = serde_json::from_value(json!({"content": "   "})).unwrap();
        assert_eq!(req.validate(), Err("content cannot be empty"));
    }

    #[test]
    fn update_url_tri_state() {
        let req: UpdateClipRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.url, None);

        let req: UpdateClipRequest = serde_json::from_value(json!({"url": null})).unwrap();
        assert_eq!(req.url, Some(None));

        let req: UpdateClipRequest =
            serde_json::from_value(json!({"url": "https://example.com"})).unwrap();
        assert_eq!(req.url, Some(Some("https://example.com".to_string())));
    }

    #[test]
    fn list_params_fields_are_all_optional() {
        let params: ListClipsParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.search.is_none());
        assert!(params.tag.is_none());
        assert!(params.page.is_none());
        assert!(params.limit.is_none());
    }
}
