//! The review engine: orchestration above the repositories.
//!
//! [`review`] commits a single validated transition as one atomic unit
//! (version-guarded state write + history append in one transaction) and
//! publishes the committed event. [`bulk`] fans the same call out across
//! many submissions with independent per-id outcomes.

pub mod bulk;
pub mod review;
