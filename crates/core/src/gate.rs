//! Coarse capability check boundary.
//!
//! The gate answers "may this actor perform this action at all",
//! independent of any submission's workflow state. The per-state legality
//! question belongs to the transition table in [`crate::workflow`]. The
//! platform's permission-matrix editor lives behind this trait; the core
//! only consults it.

use async_trait::async_trait;

use crate::roles::ReviewerRole;
use crate::submission::ReviewAction;
use crate::types::DbId;

/// External permission gate consulted before any transition is evaluated.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Whether `actor_id`, acting as `role`, holds the general capability
    /// for `action`.
    async fn check(&self, actor_id: DbId, role: ReviewerRole, action: ReviewAction) -> bool;
}

/// Gate that grants every capability. For tests and local development only;
/// production wires a real capability matrix.
pub struct AllowAllGate;

#[async_trait]
impl PermissionGate for AllowAllGate {
    async fn check(&self, _actor_id: DbId, _role: ReviewerRole, _action: ReviewAction) -> bool {
        true
    }
}
