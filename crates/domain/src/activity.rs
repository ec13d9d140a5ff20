//! Activity — append-only audit records of administrative actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::ActivityId;
use crate::time::{Timestamp, now};

/// What an administrator did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    CreateService,
    UpdateService,
    UpdateServiceStatus,
    DeleteService,
    CreateEquipment,
    UpdateEquipment,
    DeleteEquipment,
    RefreshStatuses,
}

impl ActivityAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateService => "CREATE_SERVICE",
            Self::UpdateService => "UPDATE_SERVICE",
            Self::UpdateServiceStatus => "UPDATE_SERVICE_STATUS",
            Self::DeleteService => "DELETE_SERVICE",
            Self::CreateEquipment => "CREATE_EQUIPMENT",
            Self::UpdateEquipment => "UPDATE_EQUIPMENT",
            Self::DeleteEquipment => "DELETE_EQUIPMENT",
            Self::RefreshStatuses => "REFRESH_STATUSES",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown action tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity action: {0}")]
pub struct UnknownActionError(pub String);

impl FromStr for ActivityAction {
    type Err = UnknownActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CREATE_SERVICE" => Self::CreateService,
            "UPDATE_SERVICE" => Self::UpdateService,
            "UPDATE_SERVICE_STATUS" => Self::UpdateServiceStatus,
            "DELETE_SERVICE" => Self::DeleteService,
            "CREATE_EQUIPMENT" => Self::CreateEquipment,
            "UPDATE_EQUIPMENT" => Self::UpdateEquipment,
            "DELETE_EQUIPMENT" => Self::DeleteEquipment,
            "REFRESH_STATUSES" => Self::RefreshStatuses,
            other => return Err(UnknownActionError(other.to_string())),
        })
    }
}

/// One audit record. Never updated; removed only by the retention sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: ActivityId,
    /// Identity of the acting user as reported by the authentication layer.
    pub actor_id: Option<String>,
    pub action: ActivityAction,
    pub details: String,
    /// Network address the request originated from.
    pub origin: Option<String>,
    pub recorded_at: Timestamp,
}

impl ActivityLogEntry {
    /// Create a new entry stamped with the current time.
    #[must_use]
    pub fn new(
        actor_id: Option<String>,
        action: ActivityAction,
        details: impl Into<String>,
        origin: Option<String>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            actor_id,
            action,
            details: details.into(),
            origin,
            recorded_at: now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ActivityAction; 8] = [
        ActivityAction::CreateService,
        ActivityAction::UpdateService,
        ActivityAction::UpdateServiceStatus,
        ActivityAction::DeleteService,
        ActivityAction::CreateEquipment,
        ActivityAction::UpdateEquipment,
        ActivityAction::DeleteEquipment,
        ActivityAction::RefreshStatuses,
    ];

    #[test]
    fn should_parse_every_tag_it_displays() {
        for action in ALL {
            assert_eq!(action.as_str().parse::<ActivityAction>().unwrap(), action);
        }
    }

    #[test]
    fn should_match_serde_and_display_tags() {
        for action in ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{action}\""));
        }
    }

    #[test]
    fn should_reject_unknown_tag() {
        assert!("LOGIN".parse::<ActivityAction>().is_err());
    }

    #[test]
    fn should_stamp_new_entry_with_current_time() {
        let before = now();
        let entry = ActivityLogEntry::new(
            Some("admin".to_string()),
            ActivityAction::CreateService,
            "Service created: WiFi",
            None,
        );
        assert!(entry.recorded_at >= before);
        assert_eq!(entry.actor_id.as_deref(), Some("admin"));
    }
}
