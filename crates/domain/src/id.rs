//! Typed identifier newtypes backed by UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $kind:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Human-readable name of the identified record, used in errors.
            pub const KIND: &'static str = $kind;

            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }

            /// Parse user input, reporting failures as a validation error.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::InvalidId`] when `value` is not a UUID.
            pub fn parse(value: &str) -> Result<Self, ValidationError> {
                Self::from_str(value).map_err(|_| ValidationError::InvalidId {
                    kind: Self::KIND,
                    value: value.to_string(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Service`](crate::service::Service).
    ServiceId,
    "service"
);

define_id!(
    /// Unique identifier for an [`Equipment`](crate::equipment::Equipment).
    EquipmentId,
    "equipment"
);

define_id!(
    /// Unique identifier for an [`ActivityLogEntry`](crate::activity::ActivityLogEntry).
    ActivityId,
    "activity"
);
