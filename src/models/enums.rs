//! Shared domain enums stored as their display strings

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Raised when a stored or submitted label matches no variant
#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Implements string conversion plus sqlx text codecs for a fieldless enum.
macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownVariant { kind: $kind, value: other.to_string() }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let label = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(label.parse()?)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Lifecycle stage of a maintenance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Stage {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Repaired,
    Scrap,
}

text_enum!(Stage, "stage", {
    New => "New",
    InProgress => "In Progress",
    Repaired => "Repaired",
    Scrap => "Scrap",
});

impl Stage {
    /// Repaired and Scrap close a request for reporting purposes
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Repaired | Stage::Scrap)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::New
    }
}

// ---------------------------------------------------------------------------
// RequestType
// ---------------------------------------------------------------------------

/// Scheduled upkeep vs. reactive repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RequestType {
    Preventive,
    Corrective,
}

text_enum!(RequestType, "request type", {
    Preventive => "Preventive",
    Corrective => "Corrective",
});

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    Low,
    Medium,
    High,
}

text_enum!(Priority, "priority", {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Operational status of an equipment item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EquipmentStatus {
    Active,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
    Scrap,
}

text_enum!(EquipmentStatus, "equipment status", {
    Active => "Active",
    UnderMaintenance => "Under Maintenance",
    Scrap => "Scrap",
});

impl Default for EquipmentStatus {
    fn default() -> Self {
        EquipmentStatus::Active
    }
}

// ---------------------------------------------------------------------------
// ScheduleStatus
// ---------------------------------------------------------------------------

/// Classification of a next-service date relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ScheduleStatus {
    Overdue,
    Due,
    Upcoming,
}
