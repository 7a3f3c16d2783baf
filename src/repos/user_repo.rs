/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - ユーザーは外部 (認証基盤側) で作成される。この API からは参照のみ。
 */
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "userName")]
    pub user_name: String,
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "userName"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
