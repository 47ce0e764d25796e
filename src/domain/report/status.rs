use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Backend action code for a deleted report or media item.
pub const ACTION_CODE_DELETED: i32 = 3;

/// Backend action code for a suspended report or media item.
pub const ACTION_CODE_SUSPENDED: i32 = 4;

/// Lifecycle state shared by reports and the media they reference.
///
/// Reports and media each carry their own action code, so a suspended report
/// may still point at active media and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LifecycleStatus {
    #[default]
    Active,
    Suspended,
    Deleted,
}

impl LifecycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Deleted => "deleted",
        }
    }
}

/// Map a raw backend action code to a lifecycle state.
///
/// `3` is deleted, `4` is suspended. Codes `1` and `2` both mean "normal", and
/// anything unrecognised (or a missing code) is treated the same way.
pub fn resolve_status(action_code: Option<i32>) -> LifecycleStatus {
    match action_code.unwrap_or(1) {
        ACTION_CODE_DELETED => LifecycleStatus::Deleted,
        ACTION_CODE_SUSPENDED => LifecycleStatus::Suspended,
        _ => LifecycleStatus::Active,
    }
}
