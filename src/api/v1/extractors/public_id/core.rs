/*
 * Responsibility
 * - Path の String を公開 ID として受け、decode して内部 ID へ変換する
 * - decode できない ID は「存在しない識別子」として 404 に変換する
 *   (この API の /clips/{id} は 404 か 401 しか返さない契約)
 *
 * 置くもの
 *  - PublicId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts<AppState> for PublicId<T>
 * 置かないもの
 *  - Clip といった具体リソース名 (types.rs 側)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::state::AppState;

/// リソースごとの marker 型。404 メッセージに載せる名前だけを知っている。
pub trait ResourceTag {
    const RESOURCE: &'static str;
}

#[derive(Clone, Copy)]
pub struct PublicId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PublicId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> FromRequestParts<AppState> for PublicId<T>
where
    T: ResourceTag + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(public_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::RESOURCE))?;

        let id = state
            .id_codec
            .decode(&public_id)
            .map_err(|_| AppError::not_found(T::RESOURCE))?;

        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicId").field("id", &self.id).finish()
    }
}
