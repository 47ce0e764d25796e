//! Wire shapes of the moderation backend.
//!
//! Every field is lenient: a report with a missing reporter, timestamp or
//! populated media must still deserialize so one bad record cannot fail a page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paginated envelope returned by `GET /reported-media`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportEnvelope {
    #[serde(default)]
    pub result: Vec<ApiReportItem>,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_records: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiReportItem {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,

    #[serde(default)]
    pub created_by: Option<ApiReporter>,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// RFC 3339 timestamp, parsed by the mapper
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,

    #[serde(alias = "escalation_level", default)]
    pub escalation: Option<u32>,

    #[serde(default)]
    pub reported_media_type: Option<String>,

    /// The report's own action code
    #[serde(default)]
    pub action_type: Option<i32>,

    /// Populated post or comment. Left as raw JSON so the mapper can classify it.
    #[serde(default)]
    pub reported_media_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiReporter {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Reference to an owning user, either a bare id or a populated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiUserRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
    },
}

impl ApiUserRef {
    pub fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Populated { id } => id,
        }
    }
}

/// Attachment entry, either a plain path or an object carrying one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiAttachment {
    Url(String),
    Object {
        #[serde(alias = "path", alias = "media_url", default)]
        url: Option<String>,
    },
}

impl ApiAttachment {
    pub fn into_url(self) -> Option<String> {
        match self {
            Self::Url(url) => Some(url),
            Self::Object { url } => url,
        }
    }
}

/// Reported post, selected when the media payload has a `caption` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiPostMedia {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub user_id: Option<ApiUserRef>,
    #[serde(alias = "media", alias = "media_urls", default)]
    pub media_url: Vec<ApiAttachment>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub action_type: Option<i32>,
}

/// Reported comment, selected when the media payload has a `comment` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiCommentMedia {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub user_id: Option<ApiUserRef>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub action_type: Option<i32>,
}

/// Body for the report-level action endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ReportActionBody<'a> {
    pub report_id: &'a str,
}

/// Body for `POST /suspend-media`.
#[derive(Debug, Clone, Serialize)]
pub struct MediaActionBody<'a> {
    pub report_id: &'a str,
    pub action_type: i32,
}

/// Acknowledgement returned by the action endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape used by the backend on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(alias = "error")]
    pub message: String,
}
