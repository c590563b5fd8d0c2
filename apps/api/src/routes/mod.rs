pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers::handle_process_interview;
use crate::interviews::handlers::{
    handle_create_interview, handle_delete_interview, handle_get_interview,
    handle_list_interviews, handle_upload_file,
};
use crate::sharing::handlers::{handle_create_share, handle_read_shared, handle_revoke_share};
use crate::state::AppState;
use crate::transcription::handlers::handle_transcribe_audio;

pub fn build_router(state: AppState) -> Router {
    // Base64 expands audio ~4/3, so the body limit leaves headroom above the
    // raw upload ceiling.
    let body_limit = (state.config.max_upload_bytes as usize).saturating_mul(2);

    Router::new()
        .route("/health", get(health::health_handler))
        // Processing handlers (invoked by the upload flow)
        .route("/transcribe-audio", post(handle_transcribe_audio))
        .route("/process-interview", post(handle_process_interview))
        // Interview lifecycle
        .route(
            "/api/v1/interviews",
            get(handle_list_interviews).post(handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(handle_get_interview).delete(handle_delete_interview),
        )
        .route("/api/v1/interviews/:id/upload", post(handle_upload_file))
        // Sharing
        .route("/api/v1/interviews/:id/share", post(handle_create_share))
        .route("/api/v1/shares/:id", delete(handle_revoke_share))
        .route("/api/v1/shared/:token", get(handle_read_shared))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
