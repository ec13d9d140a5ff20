//! Operational status and the rule deriving a service's status from its equipment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Operational state of a service or of a single piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalStatus {
    #[default]
    Active,
    Inactive,
}

impl OperationalStatus {
    /// Stable lowercase representation, also used as the storage encoding.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// Derive a service's status from the statuses of all of its equipment.
///
/// A single inactive unit degrades the whole service. A service without any
/// equipment is active. This is the only place the rule is expressed; every
/// other layer consumes the resolved value.
#[must_use]
pub fn resolve<I>(equipment_statuses: I) -> OperationalStatus
where
    I: IntoIterator<Item = OperationalStatus>,
{
    if equipment_statuses
        .into_iter()
        .any(|status| status == OperationalStatus::Inactive)
    {
        OperationalStatus::Inactive
    } else {
        OperationalStatus::Active
    }
}
