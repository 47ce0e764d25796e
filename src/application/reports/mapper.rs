use crate::domain::report::{
    category::{CategoryPage, ReportCategory},
    entity::{ANONYMOUS_REPORTER, MediaKind, Report, ReportedMedia},
    status::resolve_status,
};
use crate::domain::shared::{display_time::format_iso_date, pagination::PageMeta};
use crate::infrastructure::moderation_api::dto::{
    ApiCommentMedia, ApiPostMedia, ApiReportItem, ApiReporter, ReportEnvelope,
};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde_json::Value;

lazy_static! {
    /// Scheme-qualified (`https:`, `data:`, ...) or protocol-relative URLs.
    static ref ABSOLUTE_URL_REGEX: regex::Regex =
        regex::Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.-]*:|//)").unwrap();
}

/// Raw media payload after structural classification.
#[derive(Debug)]
enum MediaPayload {
    Post(ApiPostMedia),
    Comment(ApiCommentMedia),
    Unrecognized,
}

impl MediaPayload {
    /// `caption` selects a post, `comment` selects a comment. A payload with
    /// both keys is treated as a post.
    fn classify(raw: Option<Value>) -> Self {
        let Some(Value::Object(map)) = raw else {
            return Self::Unrecognized;
        };

        if map.contains_key("caption") {
            match serde_json::from_value(Value::Object(map)) {
                Ok(post) => Self::Post(post),
                Err(e) => {
                    tracing::warn!(error = %e, "post payload did not match expected shape");
                    Self::Unrecognized
                }
            }
        } else if map.contains_key("comment") {
            match serde_json::from_value(Value::Object(map)) {
                Ok(comment) => Self::Comment(comment),
                Err(e) => {
                    tracing::warn!(error = %e, "comment payload did not match expected shape");
                    Self::Unrecognized
                }
            }
        } else {
            Self::Unrecognized
        }
    }
}

/// Normalizes backend report items into [`Report`] view-models.
#[derive(Debug, Clone)]
pub struct ReportMapper {
    media_base_url: String,
}

impl ReportMapper {
    pub fn new(media_base_url: impl Into<String>) -> Self {
        Self {
            media_base_url: media_base_url.into(),
        }
    }

    /// Absolute URLs pass through; relative paths are joined onto the media base.
    pub fn resolve_media_url(&self, url: &str) -> String {
        let url = url.trim();
        if url.is_empty() || ABSOLUTE_URL_REGEX.is_match(url) {
            return url.to_string();
        }
        format!(
            "{}/{}",
            self.media_base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }

    pub fn map_to_report(&self, raw: ApiReportItem, category: ReportCategory) -> Report {
        let (reporter_name, reporter_email) = reporter_identity(raw.created_by);
        let created_at = raw.created_at.as_deref().and_then(parse_timestamp);

        let media = match MediaPayload::classify(raw.reported_media_id) {
            MediaPayload::Post(post) => self.map_post(post),
            MediaPayload::Comment(comment) => map_comment(comment),
            MediaPayload::Unrecognized => {
                tracing::warn!(
                    report_id = %raw.id,
                    category = %category,
                    "reported media matched neither post nor comment shape"
                );
                ReportedMedia::placeholder(category.media_type())
            }
        };

        if media.media_type() != category.media_type() {
            tracing::debug!(
                report_id = %raw.id,
                category = %category,
                media_type = media.media_type().as_str(),
                "reported media type differs from the requested category"
            );
        }

        Report {
            id: raw.id,
            reporter_name,
            reporter_email,
            reason_code: raw.reason.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            created_date: created_at.as_ref().map(format_iso_date).unwrap_or_default(),
            created_at,
            escalation: raw.escalation,
            media_type: media.media_type(),
            status: resolve_status(raw.action_type),
            media_status: media.status(),
            media,
        }
    }

    /// Map a whole envelope into the page for `category`.
    pub fn map_page(
        &self,
        category: ReportCategory,
        requested_page: u32,
        limit: u32,
        envelope: ReportEnvelope,
    ) -> CategoryPage {
        let meta = PageMeta::resolve(
            requested_page,
            limit,
            envelope.result.len(),
            envelope.page_number,
            envelope.total_pages,
            envelope.total_records,
        );
        let reports = envelope
            .result
            .into_iter()
            .map(|item| self.map_to_report(item, category))
            .collect();

        CategoryPage {
            category,
            reports,
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            total_records: meta.total_records,
            page_size: limit,
            loading: false,
            last_error: None,
        }
    }

    fn map_post(&self, post: ApiPostMedia) -> ReportedMedia {
        let media_urls = post
            .media_url
            .into_iter()
            .filter_map(|a| a.into_url())
            .map(|url| self.resolve_media_url(&url))
            .filter(|url| !url.is_empty())
            .collect();

        ReportedMedia::Post {
            id: post.id,
            caption: post.caption,
            location: post.location,
            user_id: post.user_id.map(|u| u.into_id()),
            media_urls,
            media_kind: MediaKind::parse_lenient(post.media_type.as_deref()),
            action_code: post.action_type,
        }
    }
}

fn map_comment(comment: ApiCommentMedia) -> ReportedMedia {
    ReportedMedia::Comment {
        id: comment.id,
        text: comment.comment.unwrap_or_default(),
        user_id: comment.user_id.map(|u| u.into_id()),
        media_kind: MediaKind::parse_lenient(comment.media_type.as_deref()),
        action_code: comment.action_type,
    }
}

fn reporter_identity(reporter: Option<ApiReporter>) -> (String, Option<String>) {
    let Some(reporter) = reporter else {
        return (ANONYMOUS_REPORTER.to_string(), None);
    };

    let email = reporter.email.filter(|e| !e.trim().is_empty());
    let name = reporter
        .user_name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| email.clone())
        .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string());
    (name, email)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(value, error = %e, "unparseable report timestamp");
            None
        }
    }
}
