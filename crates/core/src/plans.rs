//! Plan tiers and resource limits.
//!
//! Static configuration, loaded once: two tiers (`free` with finite
//! limits, `pro` with everything unlimited). Any unrecognized tier string
//! falls back to `free`'s limits, so a corrupted `plan_type` can only ever
//! make a tenant *more* restricted, never less.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Named subscription level bounding a tenant's resource quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Pro,
}

impl PlanTier {
    /// Parse a stored `plan_type` string. Unknown or absent tiers fall
    /// back to [`PlanTier::Free`].
    pub fn parse(plan_type: Option<&str>) -> Self {
        match plan_type {
            Some("pro") => PlanTier::Pro,
            _ => PlanTier::Free,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
        }
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// A single resource quota: a positive integer or unlimited.
///
/// Serialized as a JSON number, or the string `"unlimited"` for the
/// unlimited sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Finite(u32),
    Unlimited,
}

impl Limit {
    pub fn is_unlimited(self) -> bool {
        matches!(self, Limit::Unlimited)
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Finite(n) => serializer.serialize_u32(*n),
            Limit::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u32),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(Limit::Finite(n)),
            Raw::Text(s) if s == "unlimited" => Ok(Limit::Unlimited),
            Raw::Text(other) => Err(D::Error::custom(format!("invalid limit: {other:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// The plan-limited resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanResource {
    Barbers,
    AppointmentsPerMonth,
    Services,
    StorageMb,
}

impl PlanResource {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanResource::Barbers => "barbers",
            PlanResource::AppointmentsPerMonth => "appointments_per_month",
            PlanResource::Services => "services",
            PlanResource::StorageMb => "storage_mb",
        }
    }
}

// ---------------------------------------------------------------------------
// Limit tables
// ---------------------------------------------------------------------------

/// Resolved per-tenant resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub barbers: Limit,
    pub appointments_per_month: Limit,
    pub services: Limit,
    pub storage_mb: Limit,
}

impl PlanLimits {
    const FREE: PlanLimits = PlanLimits {
        barbers: Limit::Finite(1),
        appointments_per_month: Limit::Finite(20),
        services: Limit::Finite(5),
        storage_mb: Limit::Finite(100),
    };

    const PRO: PlanLimits = PlanLimits {
        barbers: Limit::Unlimited,
        appointments_per_month: Limit::Unlimited,
        services: Limit::Unlimited,
        storage_mb: Limit::Unlimited,
    };

    /// Look up the static limit table for a tier.
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Free => Self::FREE,
            PlanTier::Pro => Self::PRO,
        }
    }

    /// The limit for one resource kind.
    pub fn get(&self, resource: PlanResource) -> Limit {
        match resource {
            PlanResource::Barbers => self.barbers,
            PlanResource::AppointmentsPerMonth => self.appointments_per_month,
            PlanResource::Services => self.services,
            PlanResource::StorageMb => self.storage_mb,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
