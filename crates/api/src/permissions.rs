//! Capability matrix implementation of the permission gate.
//!
//! The gate answers the state-independent question "may this role perform
//! this action at all". The platform's permission-matrix editor maintains
//! these grants; this implementation mirrors the platform defaults and is
//! the deployment fallback when no custom matrix is configured.

use async_trait::async_trait;
use vireo_core::gate::PermissionGate;
use vireo_core::roles::ReviewerRole;
use vireo_core::submission::ReviewAction;
use vireo_core::types::DbId;

/// Static role -> action capability matrix.
pub struct CapabilityGate;

impl CapabilityGate {
    /// Whether `role` holds the capability for `action`.
    ///
    /// Mirrors the roles the transition table expects: admins hold the
    /// review and final-decision capabilities, clients hold client-stage
    /// review, creators hold resubmission.
    pub fn grants(role: ReviewerRole, action: ReviewAction) -> bool {
        use ReviewAction as A;
        match role {
            ReviewerRole::Admin => matches!(
                action,
                A::ApproveDirect | A::SendToClient | A::Reject | A::RequestRevision | A::FinalApprove
            ),
            ReviewerRole::Client => matches!(action, A::Approve | A::RequestRevision),
            ReviewerRole::Creator => matches!(action, A::Resubmit),
        }
    }
}

#[async_trait]
impl PermissionGate for CapabilityGate {
    async fn check(&self, _actor_id: DbId, role: ReviewerRole, action: ReviewAction) -> bool {
        Self::grants(role, action)
    }
}
