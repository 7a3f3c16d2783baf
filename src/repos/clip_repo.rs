/*
 * Responsibility
 * - clips テーブル向け SQLx 操作 (CRUD + 検索/絞り込み/ページング)
 * - 所有者制約 ("ownerId") は list/count の WHERE に必ず入る
 * - search は title/content/tags を連結した全文検索、tag は配列の完全一致
 *
 * Note:
 * - optional な filter は ($n IS NULL OR ...) で静的 SQL のまま吸収する
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClipRow {
    #[sqlx(rename = "clipId")]
    pub clip_id: i64,

    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub tags: Vec<String>,

    #[sqlx(rename = "ownerId")]
    pub owner_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    owner_id: Uuid,
    title: &str,
    content: &str,
    url: Option<&str>,
    tags: Vec<String>,
) -> Result<ClipRow, RepoError> {
    let row = sqlx::query_as::<_, ClipRow>(
        r#"
        INSERT INTO clips (title, content, url, tags, "ownerId")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING "clipId", title, content, url, tags, "ownerId", "createdAt"
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(url)
    .bind(tags)
    .bind(owner_id)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, clip_id: i64) -> Result<Option<ClipRow>, RepoError> {
    let row = sqlx::query_as::<_, ClipRow>(
        r#"
        SELECT "clipId", title, content, url, tags, "ownerId", "createdAt"
        FROM clips
        WHERE "clipId" = $1
        "#,
    )
    .bind(clip_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list(
    db: &PgPool,
    owner_id: Uuid,
    search: Option<&str>,
    tag: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ClipRow>, RepoError> {
    let rows = sqlx::query_as::<_, ClipRow>(
        r#"
        SELECT "clipId", title, content, url, tags, "ownerId", "createdAt"
        FROM clips
        WHERE "ownerId" = $1
          AND ($2::text IS NULL OR
               to_tsvector('english', title || ' ' || content || ' ' || array_to_string(tags, ' '))
                   @@ plainto_tsquery('english', $2))
          AND ($3::text IS NULL OR $3 = ANY(tags))
        ORDER BY "createdAt" DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(owner_id)
    .bind(search)
    .bind(tag)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

// list と同じ filter で、skip/limit を無視した総数
pub async fn count(
    db: &PgPool,
    owner_id: Uuid,
    search: Option<&str>,
    tag: Option<&str>,
) -> Result<i64, RepoError> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM clips
        WHERE "ownerId" = $1
          AND ($2::text IS NULL OR
               to_tsvector('english', title || ' ' || content || ' ' || array_to_string(tags, ' '))
                   @@ plainto_tsquery('english', $2))
          AND ($3::text IS NULL OR $3 = ANY(tags))
        "#,
    )
    .bind(owner_id)
    .bind(search)
    .bind(tag)
    .fetch_one(db)
    .await?;

    Ok(total)
}

pub async fn update(
    db: &PgPool,
    clip_id: i64,
    title: Option<&str>,
    content: Option<&str>,
    url: Option<Option<&str>>,
    tags: Option<Vec<String>>,
) -> Result<Option<ClipRow>, RepoError> {
    // url: Some(Some(v)) -> set to v
    // url: Some(None)    -> set NULL
    // url: None          -> do not update
    // "ownerId" はこの文に現れない (所有者は作成時に固定)
    let row = sqlx::query_as::<_, ClipRow>(
        r#"
        UPDATE clips
        SET
            title = COALESCE($2, title),
            content = COALESCE($3, content),
            url = CASE
                WHEN $4 = false THEN url
                ELSE $5
            END,
            tags = COALESCE($6, tags)
        WHERE "clipId" = $1
        RETURNING "clipId", title, content, url, tags, "ownerId", "createdAt"
        "#,
    )
    .bind(clip_id)
    .bind(title)
    .bind(content)
    .bind(url.is_some()) // $4: flag to set url
    .bind(url.flatten()) // $5: new url value
    .bind(tags)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, clip_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM clips
        WHERE "clipId" = $1
        "#,
    )
    .bind(clip_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
