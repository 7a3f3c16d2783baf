/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証やユーザー解決は middleware/services 側の責務
 * - 所有者以外の subject (role など) は存在しないため user_id だけを持つ
 */
use uuid::Uuid;

/// 認証済みのリクエストに付与されるコンテキスト
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
