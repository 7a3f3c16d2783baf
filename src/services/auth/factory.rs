/// Factory: build `AuthService` from application `Config`.
///
/// HS256 + shared secret なので鍵の parse 失敗はなく、infallible。
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        config.jwt_secret.as_bytes(),
        config.access_token_leeway_seconds,
    ))
}
