/*
 * Responsibility
 * - /clips 系 CRUD handler
 * - 単一リソース操作は Fetch → Exists? → Authorize? → Execute の直列。途中で失敗したら実行しない
 * - 所有者は常に認証済み actor。body 由来の値は使わない
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::clips::{
            ClipBody, ClipListBody, ClipResponse, CreateClipRequest, DeletedBody, EmptyData,
            ListClipsParams, UpdateClipRequest,
        },
        extractors::{AuthCtxExtractor, public_id::PublicClipId},
    },
    error::AppError,
    repos::clip_repo,
    services::{
        ownership::{ClipAction, authorize_owner},
        query::{ClipQuery, Pagination},
    },
    state::AppState,
};

fn row_to_response(state: &AppState, row: clip_repo::ClipRow) -> Result<ClipResponse, AppError> {
    let public_id = state
        .id_codec
        .encode(row.clip_id)
        .map_err(|_| AppError::Internal)?;

    Ok(ClipResponse {
        id: public_id,
        title: row.title,
        content: row.content,
        url: row.url,
        tags: row.tags,
        owner_id: row.owner_id.to_string(),
        created_at: row.created_at,
    })
}

pub async fn create_clip(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    Json(req): Json<CreateClipRequest>,
) -> Result<(StatusCode, Json<ClipBody>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = clip_repo::create(
        &state.db,
        actor.user_id, // 所有者は actor で固定
        &req.title,
        &req.content,
        req.url.as_deref(),
        req.tags.unwrap_or_default(),
    )
    .await?;

    let res = ClipBody {
        success: true,
        data: row_to_response(&state, row)?,
        message: Some("Clip created successfully"),
    };
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_clips(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    Query(params): Query<ListClipsParams>,
) -> Result<Json<ClipListBody>, AppError> {
    let query = ClipQuery::new(params.search, params.tag, params.page, params.limit);

    // 総数は skip/limit を無視して数える (pagination メタ情報用)
    let total = clip_repo::count(
        &state.db,
        actor.user_id,
        query.search.as_deref(),
        query.tag.as_deref(),
    )
    .await?;

    let rows = clip_repo::list(
        &state.db,
        actor.user_id,
        query.search.as_deref(),
        query.tag.as_deref(),
        query.limit,
        query.offset(),
    )
    .await?;

    let pagination = Pagination::build(query.page, query.limit, total);

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        data.push(row_to_response(&state, row)?);
    }

    Ok(Json(ClipListBody {
        success: true,
        count: data.len(),
        pagination,
        data,
    }))
}

pub async fn get_clip(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    clip_id: PublicClipId,
) -> Result<Json<ClipBody>, AppError> {
    let row = clip_repo::get(&state.db, clip_id.id)
        .await?
        .ok_or(AppError::not_found("Clip"))?;

    authorize_owner(&row, &actor, ClipAction::Access)?;

    Ok(Json(ClipBody {
        success: true,
        data: row_to_response(&state, row)?,
        message: None,
    }))
}

pub async fn update_clip(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    clip_id: PublicClipId,
    Json(req): Json<UpdateClipRequest>,
) -> Result<Json<ClipBody>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = clip_repo::get(&state.db, clip_id.id)
        .await?
        .ok_or(AppError::not_found("Clip"))?;

    authorize_owner(&row, &actor, ClipAction::Update)?;

    let url: Option<Option<&str>> = req.url.as_ref().map(|inner| inner.as_deref());

    let row = clip_repo::update(
        &state.db,
        clip_id.id,
        req.title.as_deref(),
        req.content.as_deref(),
        url,
        req.tags.clone(),
    )
    .await?
    // authorize の後に消されたケース。更新対象はもう存在しない
    .ok_or(AppError::not_found("Clip"))?;

    Ok(Json(ClipBody {
        success: true,
        data: row_to_response(&state, row)?,
        message: None,
    }))
}

pub async fn delete_clip(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    clip_id: PublicClipId,
) -> Result<Json<DeletedBody>, AppError> {
    let row = clip_repo::get(&state.db, clip_id.id)
        .await?
        .ok_or(AppError::not_found("Clip"))?;

    authorize_owner(&row, &actor, ClipAction::Delete)?;

    let deleted = clip_repo::delete(&state.db, clip_id.id).await?;
    if !deleted {
        return Err(AppError::not_found("Clip"));
    }

    Ok(Json(DeletedBody {
        success: true,
        data: EmptyData {},
    }))
}
