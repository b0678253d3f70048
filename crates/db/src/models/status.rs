//! Status helper enum mapping to the SMALLSERIAL lookup table.
//!
//! The enum's discriminants match the seed data order (1-based) in the
//! `submission_states` table.

use vireo_core::error::CoreError;
use vireo_core::submission::SubmissionState;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up a variant from its database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Submission review workflow status.
    SubmissionStatus {
        PendingAdminReview = 1,
        PendingClientReview = 2,
        ClientApproved = 3,
        NeedsRevision = 4,
        Approved = 5,
        Rejected = 6,
    }
}

impl SubmissionStatus {
    /// Map a core workflow state to its lookup row.
    pub fn from_state(state: SubmissionState) -> Self {
        match state {
            SubmissionState::PendingAdminReview => Self::PendingAdminReview,
            SubmissionState::PendingClientReview => Self::PendingClientReview,
            SubmissionState::ClientApproved => Self::ClientApproved,
            SubmissionState::NeedsRevision => Self::NeedsRevision,
            SubmissionState::Approved => Self::Approved,
            SubmissionState::Rejected => Self::Rejected,
        }
    }

    /// Map a lookup row back to the core workflow state.
    pub fn to_state(self) -> SubmissionState {
        match self {
            Self::PendingAdminReview => SubmissionState::PendingAdminReview,
            Self::PendingClientReview => SubmissionState::PendingClientReview,
            Self::ClientApproved => SubmissionState::ClientApproved,
            Self::NeedsRevision => SubmissionState::NeedsRevision,
            Self::Approved => SubmissionState::Approved,
            Self::Rejected => SubmissionState::Rejected,
        }
    }

    /// Resolve a raw status ID from the database to a core state.
    pub fn state_from_id(id: StatusId) -> Result<SubmissionState, CoreError> {
        Self::from_id(id)
            .map(Self::to_state)
            .ok_or_else(|| CoreError::Internal(format!("Unknown submission state id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(SubmissionStatus::PendingAdminReview.id(), 1);
        assert_eq!(SubmissionStatus::PendingClientReview.id(), 2);
        assert_eq!(SubmissionStatus::ClientApproved.id(), 3);
        assert_eq!(SubmissionStatus::NeedsRevision.id(), 4);
        assert_eq!(SubmissionStatus::Approved.id(), 5);
        assert_eq!(SubmissionStatus::Rejected.id(), 6);
    }

    #[test]
    fn state_round_trip_through_ids() {
        use SubmissionState::*;
        for state in [
            PendingAdminReview,
            PendingClientReview,
            ClientApproved,
            NeedsRevision,
            Approved,
            Rejected,
        ] {
            let id = SubmissionStatus::from_state(state).id();
            assert_eq!(SubmissionStatus::state_from_id(id).unwrap(), state);
        }
    }

    #[test]
    fn unknown_id_is_internal_error() {
        assert!(SubmissionStatus::state_from_id(0).is_err());
        assert!(SubmissionStatus::state_from_id(99).is_err());
    }

    #[test]
    fn status_into_status_id() {
        let id: StatusId = SubmissionStatus::Approved.into();
        assert_eq!(id, 5);
    }
}
