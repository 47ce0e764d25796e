use super::action::ModerationAction;
use super::status::{LifecycleStatus, resolve_status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Reporter name shown when the backend returns no reporter for a report.
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

/// Type of content a report was filed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MediaType {
    Post,
    Comment,
}

impl MediaType {
    /// Value used by the backend's `reported_media_type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "Post",
            Self::Comment => "Comment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Anything other than `video` renders as an image.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "video" => Self::Video,
            _ => Self::Image,
        }
    }
}

/// The post or comment a report refers to.
///
/// The `kind` tag is declared alongside the payload so consumers match on it
/// instead of probing for variant-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind")]
#[ts(export)]
pub enum ReportedMedia {
    Post {
        id: String,
        caption: Option<String>,
        location: Option<String>,
        user_id: Option<String>,
        media_urls: Vec<String>,
        media_kind: MediaKind,
        action_code: Option<i32>,
    },
    Comment {
        id: String,
        text: String,
        user_id: Option<String>,
        media_kind: MediaKind,
        action_code: Option<i32>,
    },
}

impl ReportedMedia {
    /// Empty media of the given type, used when the upstream payload is unusable.
    pub fn placeholder(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Post => Self::Post {
                id: String::new(),
                caption: None,
                location: None,
                user_id: None,
                media_urls: vec![],
                media_kind: MediaKind::Image,
                action_code: None,
            },
            MediaType::Comment => Self::Comment {
                id: String::new(),
                text: String::new(),
                user_id: None,
                media_kind: MediaKind::Image,
                action_code: None,
            },
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            Self::Post { .. } => MediaType::Post,
            Self::Comment { .. } => MediaType::Comment,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Post { id, .. } | Self::Comment { id, .. } => id,
        }
    }

    pub fn action_code(&self) -> Option<i32> {
        match self {
            Self::Post { action_code, .. } | Self::Comment { action_code, .. } => *action_code,
        }
    }

    pub fn status(&self) -> LifecycleStatus {
        resolve_status(self.action_code())
    }
}

/// Admin view of a single user-submitted report.
///
/// Reports are never constructed locally from user input. They are only
/// produced by mapping backend payloads and are replaced on every refetch.
///
/// # Invariants
/// - `status` is resolved from the report's own action code.
/// - `media_status` is resolved from the media's action code, independently.
/// - `media_type` always agrees with the `media` variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    pub id: String,

    /// `user_name`, falling back to email, or [`ANONYMOUS_REPORTER`]
    pub reporter_name: String,

    pub reporter_email: Option<String>,

    /// Free-form reason code such as `SPAM` or `HARASSMENT`
    pub reason_code: String,

    pub description: String,

    pub created_at: Option<DateTime<Utc>>,

    /// `YYYY-MM-DD`, empty when the backend sent no usable timestamp
    pub created_date: String,

    /// Not every category tracks escalation
    pub escalation: Option<u32>,

    pub media_type: MediaType,

    pub status: LifecycleStatus,

    pub media_status: LifecycleStatus,

    pub media: ReportedMedia,
}

impl Report {
    /// Action behind the report's suspend/activate toggle, decided by the
    /// resolved state currently displayed.
    pub fn toggle_action(&self) -> ModerationAction {
        match self.status {
            LifecycleStatus::Suspended => ModerationAction::Activate,
            _ => ModerationAction::Suspend,
        }
    }
}
