/*
 * Responsibility
 * - Clip の所有者チェック (resource.ownerId == actor.user_id の純粋比較)
 * - 管理者などの特権 subject は存在しない。所有者以外は常に拒否。
 *
 * Note:
 * - 不一致は互換性のため 401 を返す (403 ではない)。メッセージは操作ごとに固定。
 */
use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::clip_repo::ClipRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipAction {
    Access,
    Update,
    Delete,
}

impl ClipAction {
    fn denial_message(self) -> &'static str {
        match self {
            ClipAction::Access => "Not authorized to access this clip",
            ClipAction::Update => "Not authorized to update this clip",
            ClipAction::Delete => "Not authorized to delete this clip",
        }
    }
}

/// 存在確認の後・実行の前に必ず呼ぶ。
pub fn authorize_owner(clip: &ClipRow, actor: &AuthCtx, action: ClipAction) -> Result<(), AppError> {
    if clip.owner_id == actor.user_id {
        Ok(())
    } else {
        Err(AppError::unauthorized(action.denial_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::Utc;
    use uuid::Uuid;

    fn clip_owned_by(owner_id: Uuid) -> ClipRow {
        ClipRow {
            clip_id: 1,
            title: "Alpha notes".to_string(),
            content: "body".to_string(),
            url: None,
            tags: vec!["work".to_string()],
            owner_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_is_allowed_for_every_action() {
        let owner = Uuid::new_v4();
        let clip = clip_owned_by(owner);
        let actor = AuthCtx::new(owner);

        for action in [ClipAction::Access, ClipAction::Update, ClipAction::Delete] {
            assert!(authorize_owner(&clip, &actor, action).is_ok());
        }
    }

    #[test]
    fn non_owner_is_rejected_for_every_action() {
        let clip = clip_owned_by(Uuid::new_v4());
        let actor = AuthCtx::new(Uuid::new_v4());

        for action in [ClipAction::Access, ClipAction::Update, ClipAction::Delete] {
            let err = authorize_owner(&clip, &actor, action).unwrap_err();
            // 既存クライアント互換: 403 ではなく 401
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn denial_message_names_the_action() {
        let clip = clip_owned_by(Uuid::new_v4());
        let actor = AuthCtx::new(Uuid::new_v4());

        let err = authorize_owner(&clip, &actor, ClipAction::Delete).unwrap_err();
        assert_eq!(err.to_string(), "Not authorized to delete this clip");

        let err = authorize_owner(&clip, &actor, ClipAction::Update).unwrap_err();
        assert_eq!(err.to_string(), "Not authorized to update this clip");
    }
}
