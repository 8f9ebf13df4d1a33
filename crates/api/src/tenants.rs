//! Tenant registry and request-scoped tenant/user context.
//!
//! The real platform resolves tenants from the Supabase backend; this
//! gateway consumes that layer as an opaque source of tenant records. The
//! in-memory [`TenantDirectory`] stands in for it: registration and
//! slug-availability checks write here, and the context middleware reads
//! from it to attach a [`TenantContext`] to each request.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records and request-scoped contexts
// ---------------------------------------------------------------------------

/// A registered barbershop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub barbershop_id: String,
    pub slug: String,
    pub name: String,
    pub plan_type: String,
}

/// Resolved tenant context attached to a request as an extension.
pub type TenantContext = TenantRecord;

/// Authenticated user context attached to a request as an extension.
///
/// Populated from the trusted `x-user-*` headers set by the upstream auth
/// layer; token validation itself happens before requests reach this
/// service.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub id: String,
    pub username: Option<String>,
    pub role: Option<String>,
    /// The tenant this user belongs to, when known.
    pub barbershop_id: Option<String>,
}

impl UserContext {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// In-memory tenant registry keyed by slug.
#[derive(Debug, Default)]
pub struct TenantDirectory {
    tenants: RwLock<HashMap<String, TenantRecord>>,
}

impl TenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the directory with existing tenants (tests, dev fixtures).
    pub fn with_tenants(records: impl IntoIterator<Item = TenantRecord>) -> Self {
        let tenants = records
            .into_iter()
            .map(|r| (r.slug.clone(), r))
            .collect();
        Self {
            tenants: RwLock::new(tenants),
        }
    }

    /// Look up a tenant by slug.
    pub fn get(&self, slug: &str) -> Option<TenantRecord> {
        self.tenants
            .read()
            .expect("tenant directory lock poisoned")
            .get(slug)
            .cloned()
    }

    /// Whether a slug is already taken.
    pub fn contains(&self, slug: &str) -> bool {
        self.tenants
            .read()
            .expect("tenant directory lock poisoned")
            .contains_key(slug)
    }

    /// Number of registered tenants.
    pub fn len(&self) -> usize {
        self.tenants
            .read()
            .expect("tenant directory lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a tenant. Returns `false` (and leaves the directory
    /// unchanged) if the slug is already taken.
    pub fn insert(&self, record: TenantRecord) -> bool {
        let mut tenants = self
            .tenants
            .write()
            .expect("tenant directory lock poisoned");
        if tenants.contains_key(&record.slug) {
            return false;
        }
        tenants.insert(record.slug.clone(), record);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
