//! Tenant isolation & security middleware chain.
//!
//! Execution order on every guarded request:
//!
//! 1. [`context`] -- resolve tenant/user context, derive `ClientInfo`.
//! 2. [`slug_scanner`] -- reject suspicious tenant identifiers (400).
//! 3. [`tenant_guard`] -- require tenant context off the public routes (403).
//! 4. [`cross_tenant`] -- detect and throttle cross-tenant access (403/429).
//! 5. [`plan_gate`] -- resolve plan limits for quota-bound routes.
//! 6. [`query_audit`] -- audit-log every tenant-scoped request.
//!
//! The scanner decides before the presence guard so a malicious slug is
//! answered as `INVALID_TENANT_IDENTIFIER` rather than a generic
//! missing-tenant rejection. Rejections are resolved inside the chain as
//! structured 4xx responses; they are never surfaced as handler errors.

pub mod context;
pub mod cross_tenant;
pub mod plan_gate;
pub mod query_audit;
pub mod slug_scanner;
pub mod tenant_guard;

pub use context::{RequestStart, SecurityContext};
