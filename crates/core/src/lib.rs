//! Vireo domain core.
//!
//! Pure domain logic for the video submission review workflow, with zero
//! internal dependencies so it can be consumed by the DB, events, and API
//! layers alike:
//!
//! - [`workflow`] — the (state, role, action) transition table and
//!   [`workflow::apply_action`], the single entry point for validating and
//!   computing a state transition.
//! - [`feedback`] — structured revision/rejection feedback with ordered,
//!   duration-bounded timestamp annotations.
//! - [`bulk`] — per-item outcome types for bulk review operations.
//! - [`gate`] — the coarse capability check boundary ([`gate::PermissionGate`]).
//! - [`submission`], [`roles`], [`error`], [`types`] — entities, roles,
//!   error taxonomy, and shared aliases.

pub mod bulk;
pub mod error;
pub mod feedback;
pub mod gate;
pub mod roles;
pub mod submission;
pub mod types;
pub mod workflow;

pub use error::CoreError;
pub use feedback::{Annotation, Feedback};
pub use gate::PermissionGate;
pub use roles::ReviewerRole;
pub use submission::{ContentRef, ReviewAction, SubmissionState, TransitionRecord, VideoSubmission};
pub use workflow::{apply_action, FeedbackRule, TransitionOutcome};
