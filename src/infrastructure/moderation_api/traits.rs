use super::dto::{ActionAck, ReportEnvelope};
use crate::domain::report::{
    action::MediaActionCode, entity::MediaType, errors::ModerationError,
};
use async_trait::async_trait;

/// REST contract of the moderation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationBackend: Send + Sync {
    /// `GET /reported-media`
    async fn fetch_reported_media(
        &self,
        media_type: MediaType,
        page: u32,
        limit: u32,
    ) -> Result<ReportEnvelope, ModerationError>;

    /// `POST /suspend-report`, toggles suspended and active.
    async fn suspend_report(&self, report_id: &str) -> Result<ActionAck, ModerationError>;

    /// `POST /delete-report`
    async fn delete_report(&self, report_id: &str) -> Result<ActionAck, ModerationError>;

    /// `POST /escalate-report`
    async fn escalate_report(&self, report_id: &str) -> Result<ActionAck, ModerationError>;

    /// `POST /suspend-media`
    async fn set_media_action(
        &self,
        report_id: &str,
        action: MediaActionCode,
    ) -> Result<ActionAck, ModerationError>;
}
