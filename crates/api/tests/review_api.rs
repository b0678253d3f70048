//! End-to-end tests for the review workflow API.
//!
//! Drives the full HTTP surface against a real database: the complete
//! review scenario (admin -> client -> revision -> resubmit -> reject),
//! role gating, version conflicts, and bulk isolation semantics.

mod common;

use axum::http::{Method, StatusCode};
use common::{apply_action, bearer, build_test_app, create_submission, request_json};
use sqlx::PgPool;

const ADMIN: i64 = 7;
const CLIENT: i64 = 55;
const CREATOR: i64 = 100;

// ---------------------------------------------------------------------------
// Full review scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_review_scenario(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");
    let client = bearer(CLIENT, "client");
    let creator = bearer(CREATOR, "creator");

    let id = create_submission(&app, CREATOR, 10).await;

    // Admin forwards to client review.
    let (status, body) = apply_action(&app, id, &admin, "send_to_client", 0, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state_id"], 2); // pending_client_review
    assert_eq!(body["data"]["version"], 1);

    // Client requests a revision with one timeline annotation.
    let feedback = serde_json::json!({
        "general_text": "Audio too quiet at 0:45",
        "annotations": [{"timestamp_offset_secs": 45.0, "comment": "lower music volume"}],
    });
    let (status, body) =
        apply_action(&app, id, &client, "request_revision", 1, Some(feedback)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state_id"], 4); // needs_revision
    assert_eq!(body["data"]["version"], 2);

    // History carries both transitions; the second holds the annotation.
    let (status, body) = request_json(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{id}/history"),
        Some(&creator),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    let annotations = history[1]["feedback"]["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0]["timestamp_offset_secs"], 45.0);

    // Creator resubmits: back to the start of admin review.
    let (status, body) = apply_action(&app, id, &creator, "resubmit", 2, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state_id"], 1); // pending_admin_review
    assert_eq!(body["data"]["version"], 3);

    // Reject without feedback is blocked before any mutation.
    let (status, body) = apply_action(&app, id, &admin, "reject", 3, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert_eq!(body["code"], "FEEDBACK_REQUIRED");

    // State, version, and history are untouched by the failed reject.
    let (status, body) = request_json(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "pending_admin_review");
    assert_eq!(body["data"]["version"], 3);
    assert_eq!(body["data"]["history"].as_array().unwrap().len(), 3);

    // Reject with feedback lands terminally.
    let feedback = serde_json::json!({"general_text": "Off-brand after three rounds"});
    let (status, body) = apply_action(&app, id, &admin, "reject", 3, Some(feedback)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state_id"], 6); // rejected
    assert_eq!(body["data"]["version"], 4);

    // Terminal states absorb every further action.
    let feedback = serde_json::json!({"general_text": "one more pass?"});
    let (status, body) = apply_action(&app, id, &admin, "request_revision", 4, Some(feedback)).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["code"], "ILLEGAL_TRANSITION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_approval_then_final_approve(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");
    let client = bearer(CLIENT, "client");

    let id = create_submission(&app, CREATOR, 10).await;

    apply_action(&app, id, &admin, "send_to_client", 0, None).await;

    let (status, body) = apply_action(&app, id, &client, "approve", 1, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state_id"], 3); // client_approved

    let (status, body) = apply_action(&app, id, &admin, "final_approve", 2, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state_id"], 5); // approved
    assert_eq!(body["data"]["version"], 3);
}

// ---------------------------------------------------------------------------
// Role and permission gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_creator_cannot_reject(pool: PgPool) {
    let app = build_test_app(pool);
    let creator = bearer(CREATOR, "creator");

    let id = create_submission(&app, CREATOR, 10).await;

    let feedback = serde_json::json!({"general_text": "rejecting my own work"});
    let (status, body) = apply_action(&app, id, &creator, "reject", 0, Some(feedback)).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");
    assert_eq!(body["code"], "PERMISSION_DENIED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_cannot_act_during_admin_review(pool: PgPool) {
    let app = build_test_app(pool);
    let client = bearer(CLIENT, "client");

    let id = create_submission(&app, CREATOR, 10).await;

    // The client holds the approve capability, but the submission is not in
    // client review: the transition table refuses.
    let (status, body) = apply_action(&app, id, &client, "approve", 0, None).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["code"], "ILLEGAL_TRANSITION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_changes_alias_accepted(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let id = create_submission(&app, CREATOR, 10).await;

    let feedback = serde_json::json!({"general_text": "tighten the edit"});
    let (status, body) = apply_action(&app, id, &admin, "request_changes", 0, Some(feedback)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state_id"], 4); // needs_revision

    // The stored record carries the canonical action name.
    let (_, body) = request_json(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{id}/history"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"][0]["action"], "request_revision");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unauthenticated_request_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let (status, body) =
        request_json(&app, Method::GET, "/api/v1/submissions/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{body}");
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_annotation_past_duration_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    // Submission duration is 120s; a 500s annotation cannot anchor to it.
    let id = create_submission(&app, CREATOR, 10).await;
    let feedback = serde_json::json!({
        "annotations": [{"timestamp_offset_secs": 500.0, "comment": "??"}],
    });
    let (status, body) = apply_action(&app, id, &admin, "request_revision", 0, Some(feedback)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_action_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let id = create_submission(&app, CREATOR, 10).await;
    let (status, body) = apply_action(&app, id, &admin, "escalate", 0, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Optimistic concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_version_conflicts(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let id = create_submission(&app, CREATOR, 10).await;

    let (status, _) = apply_action(&app, id, &admin, "send_to_client", 0, None).await;
    assert_eq!(status, StatusCode::OK);

    // A second reviewer still holding version 0 loses the race and must
    // refetch; the request is not blindly reapplied.
    let (status, body) = apply_action(&app, id, &admin, "approve_direct", 0, None).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["code"], "VERSION_CONFLICT");

    let (_, body) = request_json(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"]["state"], "pending_client_review");
    assert_eq!(body["data"]["version"], 1);
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_isolation_with_terminal_item(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(create_submission(&app, CREATOR, 10).await);
    }

    // Terminal-ize the third submission up front.
    let feedback = serde_json::json!({"general_text": "not usable"});
    let (status, _) = apply_action(&app, ids[2], &admin, "reject", 0, Some(feedback)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request_json(
        &app,
        Method::POST,
        "/api/v1/submissions/bulk-actions",
        Some(&admin),
        Some(serde_json::json!({
            "submission_ids": ids,
            "action": "approve_direct",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let results = body["data"]["results"].as_object().unwrap();
    assert_eq!(results.len(), 5);

    let mut succeeded = 0;
    let mut failed = 0;
    for (key, outcome) in results {
        if key == &ids[2].to_string() {
            assert_eq!(outcome["outcome"], "failure");
            assert_eq!(outcome["kind"], "illegal_transition");
            failed += 1;
        } else {
            assert_eq!(outcome["outcome"], "success", "id {key}: {outcome}");
            assert_eq!(outcome["new_state"], "approved");
            assert_eq!(outcome["version"], 1);
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 4);
    assert_eq!(failed, 1);

    // Re-running the batch is deterministic: every item is now terminal.
    let (status, body) = request_json(
        &app,
        Method::POST,
        "/api/v1/submissions/bulk-actions",
        Some(&admin),
        Some(serde_json::json!({
            "submission_ids": ids,
            "action": "approve_direct",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    for outcome in body["data"]["results"].as_object().unwrap().values() {
        assert_eq!(outcome["outcome"], "failure");
        assert_eq!(outcome["kind"], "illegal_transition");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_deduplicates_ids(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let id = create_submission(&app, CREATOR, 10).await;

    let (status, body) = request_json(
        &app,
        Method::POST,
        "/api/v1/submissions/bulk-actions",
        Some(&admin),
        Some(serde_json::json!({
            "submission_ids": [id, id, id],
            "action": "send_to_client",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    // One result, one committed transition: duplicates collapse before
    // processing instead of racing each other.
    let results = body["data"]["results"].as_object().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[&id.to_string()]["outcome"], "success");
    assert_eq!(results[&id.to_string()]["version"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_missing_id_is_isolated_not_fatal(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let id = create_submission(&app, CREATOR, 10).await;

    let (status, body) = request_json(
        &app,
        Method::POST,
        "/api/v1/submissions/bulk-actions",
        Some(&admin),
        Some(serde_json::json!({
            "submission_ids": [id, 424242],
            "action": "send_to_client",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let results = body["data"]["results"].as_object().unwrap();
    assert_eq!(results[&id.to_string()]["outcome"], "success");
    assert_eq!(results["424242"]["outcome"], "failure");
    assert_eq!(results["424242"]["kind"], "not_found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_shared_feedback_applied_per_item(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let first = create_submission(&app, CREATOR, 10).await;
    let second = create_submission(&app, CREATOR, 10).await;

    let (status, body) = request_json(
        &app,
        Method::POST,
        "/api/v1/submissions/bulk-actions",
        Some(&admin),
        Some(serde_json::json!({
            "submission_ids": [first, second],
            "action": "request_revision",
            "feedback": {"general_text": "brand colors are wrong in every cut"},
            "scheduling_hint": {"publish_at": "2026-09-01T09:00:00Z"},
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    for outcome in body["data"]["results"].as_object().unwrap().values() {
        assert_eq!(outcome["outcome"], "success");
        assert_eq!(outcome["new_state"], "needs_revision");
    }

    // Each submission got its own copy of the shared payload.
    for id in [first, second] {
        let (_, body) = request_json(
            &app,
            Method::GET,
            &format!("/api/v1/submissions/{id}/history"),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(
            body["data"][0]["feedback"]["general_text"],
            "brand colors are wrong in every cut",
        );
    }
}

// ---------------------------------------------------------------------------
// Campaign listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_campaign_listing_with_state_filter(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = bearer(ADMIN, "admin");

    let first = create_submission(&app, CREATOR, 77).await;
    let _second = create_submission(&app, CREATOR, 77).await;
    apply_action(&app, first, &admin, "send_to_client", 0, None).await;

    let (status, body) = request_json(
        &app,
        Method::GET,
        "/api/v1/campaigns/77/submissions",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = request_json(
        &app,
        Method::GET,
        "/api/v1/campaigns/77/submissions?state=pending_client_review",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64().unwrap(), first);
}
