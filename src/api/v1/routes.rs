/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、/clips 系は全て auth gate の内側
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    clips::{create_clip, delete_clip, get_clip, list_clips, update_clip},
    health::health,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let clips = Router::new()
        .route("/clips", get(list_clips).post(create_clip))
        .route(
            "/clips/{clip_id}",
            get(get_clip).put(update_clip).delete(delete_clip),
        );

    // 認証は handler ではなくここで一括で掛ける
    let clips = middleware::auth::access::apply(clips, state);

    Router::new().route("/health", get(health)).merge(clips)
}
