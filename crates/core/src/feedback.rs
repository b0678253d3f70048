//! Structured revision/rejection feedback.
//!
//! A [`Feedback`] value carries free text, ordered timestamped annotations,
//! and an optional resubmission due date. It is attached to at most one
//! committed transition and is immutable from then on; later corrections
//! require a new transition, never in-place mutation of history.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for the general feedback text.
pub const MAX_GENERAL_TEXT_LENGTH: usize = 10_000;

/// Maximum length for a single annotation comment.
pub const MAX_ANNOTATION_COMMENT_LENGTH: usize = 2_000;

/// Maximum number of annotations on one feedback payload.
pub const MAX_ANNOTATIONS: usize = 200;

// ---------------------------------------------------------------------------
// Annotation
// ---------------------------------------------------------------------------

/// A comment anchored to a point in the video timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Seconds from the start of the video.
    pub timestamp_offset_secs: f64,
    pub comment: String,
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// Revision/rejection feedback attached to a transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Free-form reviewer text.
    #[serde(default)]
    pub general_text: Option<String>,
    /// Timeline annotations, ascending by offset. Ordering is maintained on
    /// insert via [`Feedback::add_annotation`], not fixed up on read.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Advisory resubmission deadline, surfaced to scheduling/notification
    /// collaborators. Not an internally enforced timer.
    #[serde(default)]
    pub due_date: Option<Timestamp>,
}

impl Feedback {
    /// Feedback with only general text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            general_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A feedback payload is empty only if the text is blank and there are
    /// no annotations. Actions that require feedback reject empty payloads.
    /// A due date alone does not make feedback non-empty.
    pub fn is_empty(&self) -> bool {
        let has_text = self
            .general_text
            .as_ref()
            .is_some_and(|t| !t.trim().is_empty());
        !has_text && self.annotations.is_empty()
    }

    /// Insert an annotation, maintaining ascending order by offset.
    ///
    /// Equal offsets keep insertion order (the new annotation lands after
    /// existing ones with the same offset). Rejects non-finite or negative
    /// offsets, offsets past `known_duration_secs` when the duration is
    /// available, blank or oversized comments, and payloads already at
    /// [`MAX_ANNOTATIONS`].
    pub fn add_annotation(
        &mut self,
        timestamp_offset_secs: f64,
        comment: impl Into<String>,
        known_duration_secs: Option<f64>,
    ) -> Result<(), CoreError> {
        let comment = comment.into();

        if !timestamp_offset_secs.is_finite() {
            return Err(CoreError::Validation(
                "Annotation offset must be a finite number of seconds".to_string(),
            ));
        }
        if timestamp_offset_secs < 0.0 {
            return Err(CoreError::Validation(format!(
                "Annotation offset must not be negative, got {timestamp_offset_secs}"
            )));
        }
        if let Some(duration) = known_duration_secs {
            if timestamp_offset_secs > duration {
                return Err(CoreError::Validation(format!(
                    "Annotation offset {timestamp_offset_secs}s exceeds the video duration of {duration}s"
                )));
            }
        }
        if comment.trim().is_empty() {
            return Err(CoreError::Validation(
                "Annotation comment must not be blank".to_string(),
            ));
        }
        if comment.len() > MAX_ANNOTATION_COMMENT_LENGTH {
            return Err(CoreError::Validation(format!(
                "Annotation comment exceeds maximum length of {MAX_ANNOTATION_COMMENT_LENGTH} characters"
            )));
        }
        if self.annotations.len() >= MAX_ANNOTATIONS {
            return Err(CoreError::Validation(format!(
                "Feedback already has the maximum of {MAX_ANNOTATIONS} annotations"
            )));
        }

        // First index whose offset is strictly greater: ties keep insertion
        // order.
        let at = self
            .annotations
            .partition_point(|a| a.timestamp_offset_secs <= timestamp_offset_secs);
        self.annotations.insert(
            at,
            Annotation {
                timestamp_offset_secs,
                comment,
            },
        );
        Ok(())
    }

    /// Build a validated, ordered feedback payload from raw parts.
    ///
    /// This is the boundary constructor for deserialized request bodies:
    /// each annotation passes through [`Feedback::add_annotation`], so the
    /// result is ordered and bounded regardless of the wire order.
    pub fn normalized(
        general_text: Option<String>,
        annotations: Vec<Annotation>,
        due_date: Option<Timestamp>,
        known_duration_secs: Option<f64>,
    ) -> Result<Self, CoreError> {
        if let Some(text) = &general_text {
            if text.len() > MAX_GENERAL_TEXT_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Feedback text exceeds maximum length of {MAX_GENERAL_TEXT_LENGTH} characters"
                )));
            }
        }

        let mut feedback = Feedback {
            general_text,
            annotations: Vec::new(),
            due_date,
        };
        for annotation in annotations {
            feedback.add_annotation(
                annotation.timestamp_offset_secs,
                annotation.comment,
                known_duration_secs,
            )?;
        }
        Ok(feedback)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(feedback: &Feedback) -> Vec<f64> {
        feedback
            .annotations
            .iter()
            .map(|a| a.timestamp_offset_secs)
            .collect()
    }

    // -- is_empty ----------------------------------------------------------

    #[test]
    fn default_feedback_is_empty() {
        assert!(Feedback::default().is_empty());
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(Feedback::with_text("   ").is_empty());
    }

    #[test]
    fn text_makes_non_empty() {
        assert!(!Feedback::with_text("audio too quiet").is_empty());
    }

    #[test]
    fn annotation_makes_non_empty() {
        let mut feedback = Feedback::default();
        feedback.add_annotation(12.0, "jump cut here", None).unwrap();
        assert!(!feedback.is_empty());
    }

    #[test]
    fn due_date_alone_is_still_empty() {
        let feedback = Feedback {
            due_date: Some(chrono::Utc::now()),
            ..Feedback::default()
        };
        assert!(feedback.is_empty());
    }

    // -- add_annotation ordering -------------------------------------------

    #[test]
    fn annotations_kept_ascending() {
        let mut feedback = Feedback::default();
        feedback.add_annotation(45.0, "b", None).unwrap();
        feedback.add_annotation(10.0, "a", None).unwrap();
        feedback.add_annotation(90.5, "c", None).unwrap();
        assert_eq!(offsets(&feedback), vec![10.0, 45.0, 90.5]);
    }

    #[test]
    fn equal_offsets_keep_insertion_order() {
        let mut feedback = Feedback::default();
        feedback.add_annotation(30.0, "first", None).unwrap();
        feedback.add_annotation(30.0, "second", None).unwrap();
        feedback.add_annotation(30.0, "third", None).unwrap();
        let comments: Vec<&str> = feedback.annotations.iter().map(|a| a.comment.as_str()).collect();
        assert_eq!(comments, vec!["first", "second", "third"]);
    }

    // -- add_annotation validation -----------------------------------------

    #[test]
    fn negative_offset_rejected() {
        let mut feedback = Feedback::default();
        let err = feedback.add_annotation(-1.0, "x", None).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn nan_offset_rejected() {
        let mut feedback = Feedback::default();
        assert!(feedback.add_annotation(f64::NAN, "x", None).is_err());
    }

    #[test]
    fn offset_past_duration_rejected() {
        let mut feedback = Feedback::default();
        let err = feedback.add_annotation(61.0, "x", Some(60.0)).unwrap_err();
        assert!(err.to_string().contains("exceeds the video duration"));
    }

    #[test]
    fn offset_at_duration_accepted() {
        let mut feedback = Feedback::default();
        assert!(feedback.add_annotation(60.0, "x", Some(60.0)).is_ok());
    }

    #[test]
    fn unknown_duration_skips_upper_bound() {
        let mut feedback = Feedback::default();
        assert!(feedback.add_annotation(86_400.0, "x", None).is_ok());
    }

    #[test]
    fn blank_comment_rejected() {
        let mut feedback = Feedback::default();
        assert!(feedback.add_annotation(1.0, "  ", None).is_err());
    }

    #[test]
    fn oversized_comment_rejected() {
        let mut feedback = Feedback::default();
        let long = "x".repeat(MAX_ANNOTATION_COMMENT_LENGTH + 1);
        assert!(feedback.add_annotation(1.0, long, None).is_err());
    }

    #[test]
    fn annotation_cap_enforced() {
        let mut feedback = Feedback::default();
        for i in 0..MAX_ANNOTATIONS {
            feedback.add_annotation(i as f64, "note", None).unwrap();
        }
        let err = feedback
            .add_annotation(0.0, "one too many", None)
            .unwrap_err();
        assert!(err.to_string().contains("maximum"));
    }

    // -- normalized --------------------------------------------------------

    #[test]
    fn normalized_sorts_wire_order() {
        let feedback = Feedback::normalized(
            Some("overall pacing".to_string()),
            vec![
                Annotation {
                    timestamp_offset_secs: 50.0,
                    comment: "late".to_string(),
                },
                Annotation {
                    timestamp_offset_secs: 5.0,
                    comment: "early".to_string(),
                },
            ],
            None,
            Some(120.0),
        )
        .unwrap();
        assert_eq!(offsets(&feedback), vec![5.0, 50.0]);
    }

    #[test]
    fn normalized_rejects_out_of_range_annotation() {
        let result = Feedback::normalized(
            None,
            vec![Annotation {
                timestamp_offset_secs: 500.0,
                comment: "past the end".to_string(),
            }],
            None,
            Some(120.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn normalized_rejects_oversized_text() {
        let result = Feedback::normalized(
            Some("x".repeat(MAX_GENERAL_TEXT_LENGTH + 1)),
            Vec::new(),
            None,
            None,
        );
        assert!(result.is_err());
    }
}
