use super::catalog::ReportCatalog;
use crate::domain::report::{
    action::{ActionOutcome, ModerationAction},
    category::ReportCategory,
    errors::ModerationError,
};
use crate::infrastructure::moderation_api::{dto::ActionAck, traits::ModerationBackend};
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Runs moderation actions against the backend and asks the catalog to
/// refetch afterwards.
///
/// Confirmation is the caller's responsibility. The dispatcher never patches
/// cached reports: a success only triggers invalidation, a failure leaves the
/// cache untouched.
pub struct ActionDispatcher {
    backend: Arc<dyn ModerationBackend>,
    catalog: Arc<ReportCatalog>,
}

impl ActionDispatcher {
    pub fn new(backend: Arc<dyn ModerationBackend>, catalog: Arc<ReportCatalog>) -> Self {
        Self { backend, catalog }
    }

    pub async fn dispatch(
        &self,
        category: ReportCategory,
        action: ModerationAction,
        report_id: &str,
    ) -> Result<ActionOutcome, ModerationError> {
        let report_id = report_id.trim();
        if report_id.is_empty() {
            return Err(ModerationError::InvalidRequest(
                "report id is required".into(),
            ));
        }

        let span = info_span!(
            "moderation_action",
            id = %Uuid::now_v7(),
            action = %action,
            category = %category,
            report_id,
        );
        self.dispatch_inner(category, action, report_id)
            .instrument(span)
            .await
    }

    async fn dispatch_inner(
        &self,
        category: ReportCategory,
        action: ModerationAction,
        report_id: &str,
    ) -> Result<ActionOutcome, ModerationError> {
        // The backend only exposes a toggle, so re-running suspend or activate
        // against a report already in that state must not flip it back.
        if action.is_report_toggle() {
            if let Some(report) = self.catalog.find_report(category, report_id).await {
                if Some(report.status) == action.target_report_status() {
                    info!(status = report.status.as_str(), "Report already in target state");
                    return Ok(ActionOutcome {
                        action,
                        report_id: report_id.to_string(),
                        message: format!("Report is already {}", report.status.as_str()),
                        skipped: true,
                        refreshed: false,
                    });
                }
            }
        }

        let ack = self.call_backend(action, report_id).await.map_err(|err| {
            warn!(error = %err, "Moderation action failed");
            err
        })?;
        info!("Moderation action applied");

        let refreshed = match self.catalog.invalidate_current(category).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Refetch after moderation action failed");
                false
            }
        };

        Ok(ActionOutcome {
            action,
            report_id: report_id.to_string(),
            message: ack.message.unwrap_or_else(|| default_message(action).to_string()),
            skipped: false,
            refreshed,
        })
    }

    async fn call_backend(
        &self,
        action: ModerationAction,
        report_id: &str,
    ) -> Result<ActionAck, ModerationError> {
        match action {
            ModerationAction::Suspend | ModerationAction::Activate => {
                self.backend.suspend_report(report_id).await
            }
            ModerationAction::Delete => self.backend.delete_report(report_id).await,
            ModerationAction::Escalate => self.backend.escalate_report(report_id).await,
            ModerationAction::RemoveMedia
            | ModerationAction::SuspendMedia
            | ModerationAction::ActivateMedia => {
                let code = action.media_action_code().ok_or_else(|| {
                    ModerationError::InvalidRequest(format!("{} has no media code", action))
                })?;
                self.backend.set_media_action(report_id, code).await
            }
        }
    }
}

fn default_message(action: ModerationAction) -> &'static str {
    match action {
        ModerationAction::Suspend => "Report suspended",
        ModerationAction::Activate => "Report activated",
        ModerationAction::Delete => "Report deleted",
        ModerationAction::Escalate => "Report escalated",
        ModerationAction::RemoveMedia => "Content removed",
        ModerationAction::SuspendMedia => "Content suspended",
        ModerationAction::ActivateMedia => "Content activated",
    }
}
