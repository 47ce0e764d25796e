use super::status::LifecycleStatus;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;

/// Administrative actions available on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ModerationAction {
    Suspend,
    Activate,
    Delete,
    Escalate,
    RemoveMedia,
    SuspendMedia,
    ActivateMedia,
}

impl ModerationAction {
    pub const ALL: [ModerationAction; 7] = [
        Self::Suspend,
        Self::Activate,
        Self::Delete,
        Self::Escalate,
        Self::RemoveMedia,
        Self::SuspendMedia,
        Self::ActivateMedia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suspend => "suspend",
            Self::Activate => "activate",
            Self::Delete => "delete",
            Self::Escalate => "escalate",
            Self::RemoveMedia => "remove_media",
            Self::SuspendMedia => "suspend_media",
            Self::ActivateMedia => "activate_media",
        }
    }

    /// Code sent to `/suspend-media` for media actions.
    pub fn media_action_code(&self) -> Option<MediaActionCode> {
        match self {
            Self::RemoveMedia => Some(MediaActionCode::Remove),
            Self::SuspendMedia => Some(MediaActionCode::Suspend),
            Self::ActivateMedia => Some(MediaActionCode::Activate),
            _ => None,
        }
    }

    /// Report state the action settles on, for actions with a terminal state.
    pub fn target_report_status(&self) -> Option<LifecycleStatus> {
        match self {
            Self::Suspend => Some(LifecycleStatus::Suspended),
            Self::Activate => Some(LifecycleStatus::Active),
            Self::Delete => Some(LifecycleStatus::Deleted),
            _ => None,
        }
    }

    /// Suspend and activate share the backend's toggle endpoint.
    pub fn is_report_toggle(&self) -> bool {
        matches!(self, Self::Suspend | Self::Activate)
    }

    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Escalate)
    }

    /// Every action changes report or media state and is confirmed before
    /// dispatch.
    pub fn requires_confirmation(&self) -> bool {
        true
    }

    /// Styling hint for actions that take content out of view. It does not
    /// decide whether to confirm; see [`Self::requires_confirmation`].
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete | Self::RemoveMedia)
    }

    /// Text for the confirmation dialog shown before dispatching.
    pub fn confirmation_prompt(&self) -> &'static str {
        match self {
            Self::Suspend => "Are you sure you want to suspend this report?",
            Self::Activate => "Are you sure you want to activate this report?",
            Self::Delete => "Are you sure you want to delete this report?",
            Self::Escalate => "Are you sure you want to escalate this report?",
            Self::RemoveMedia => "Are you sure you want to remove this content?",
            Self::SuspendMedia => "Are you sure you want to suspend this content?",
            Self::ActivateMedia => "Are you sure you want to activate this content?",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| format!("unknown moderation action: {}", s))
    }
}

/// `action_type` values accepted by the media endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaActionCode {
    Activate = 1,
    Remove = 3,
    Suspend = 4,
}

impl MediaActionCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Result of a dispatched action as reported to the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActionOutcome {
    pub action: ModerationAction,
    pub report_id: String,
    pub message: String,
    /// No backend call was made because the report already had the target state
    pub skipped: bool,
    /// Whether the follow-up refetch of the current page succeeded
    pub refreshed: bool,
}
