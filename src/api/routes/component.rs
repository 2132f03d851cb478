//! The generated-component retrieval route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::api::server::AppState;

/// GET /api/get-generated-component: return the cached component, if any.
///
/// A miss is a success with a null payload, not an error. The handler never
/// triggers generation; it is purely read-through. Store-level I/O failures
/// surface as 500 with a generic message; the underlying diagnostics go to
/// the server log, never to the client.
pub async fn get_generated_component(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<Value>) {
    match state.store.get() {
        Ok(Some(pair)) => (
            StatusCode::OK,
            Json(json!({
                "componentCode": pair.component_source,
                "generatedAt": pair.generated_at.to_rfc3339(),
            })),
        ),
        Ok(None) => (StatusCode::OK, Json(json!({ "componentCode": null }))),
        Err(e) => {
            error!("Failed to read cached component: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to read cached component" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ArtifactKind, ArtifactStore, OpKind, RuntimeOp};
    use tempfile::TempDir;

    fn test_state() -> (TempDir, ArtifactStore, State<Arc<AppState>>) {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("cache"));
        let state = State(Arc::new(AppState::new(store.clone())));
        (tmp, store, state)
    }

    #[tokio::test]
    async fn test_miss_returns_null_payload_with_200() {
        let (_tmp, _store, state) = test_state();
        let (status, Json(body)) = get_generated_component(state).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["componentCode"].is_null());
        assert!(body.get("generatedAt").is_none());
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_hit_returns_code_and_timestamp() {
        let (_tmp, store, state) = test_state();
        let written = store
            .put("<Scene/>", vec![RuntimeOp::new(OpKind::Create)])
            .unwrap();

        let (status, Json(body)) = get_generated_component(state).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["componentCode"], "<Scene/>");
        assert_eq!(body["generatedAt"], written.generated_at.to_rfc3339());
    }

    #[tokio::test]
    async fn test_io_failure_returns_500_error_shape_not_null() {
        let (_tmp, store, state) = test_state();
        store.put("<Scene/>", vec![]).unwrap();
        // Make the ops log unreadable (directory in place of a file) so the
        // store reports an I/O failure while an entry exists.
        let ops_path = store.artifact_path(ArtifactKind::RuntimeOps);
        std::fs::remove_file(&ops_path).unwrap();
        std::fs::create_dir(&ops_path).unwrap();

        let (status, Json(body)) = get_generated_component(state).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
        // Internal diagnostics (paths, errno) must not leak to the client.
        assert!(!body["error"].as_str().unwrap().contains("runtime-ops"));
        assert!(body.get("componentCode").is_none());
    }
}
