use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use campus_shared::api::DevLoginResponse;
use campus_shared::NewUser;

use crate::auth::{create_session_token, generate_csrf_token, set_cookie, CSRF_COOKIE, SESSION_COOKIE};
use crate::error::AppError;
use crate::routes::AppState;

pub const DEV_USER_EMAIL: &str = "foo@bar.com";

/// GET /auth/dev-callback
///
/// Signs in as the development account, creating it from the signup
/// template on first use. Only mounted when `DEV_LOGIN` is enabled.
pub async fn dev_callback(
    State(state): State<AppState>,
) -> Result<(HeaderMap, Json<DevLoginResponse>), AppError> {
    if !state.config.dev_login {
        return Err(AppError::NotFound);
    }

    let user = match state.store.find_by_email(DEV_USER_EMAIL).await? {
        Some(user) => user,
        None => {
            let user = state
                .store
                .create_user(NewUser::with_defaults(DEV_USER_EMAIL))
                .await?;
            tracing::info!(user_id = %user.id, "Created development user");
            user
        }
    };

    let session = create_session_token(
        user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.jwt_expires_in,
    )?;
    let csrf_token = generate_csrf_token();

    let max_age = state.config.jwt_expires_in;
    let secure = state.config.cookie_secure;
    let mut headers = HeaderMap::new();
    for cookie in [
        set_cookie(SESSION_COOKIE, &session, max_age, true, secure),
        set_cookie(CSRF_COOKIE, &csrf_token, max_age, false, secure),
    ] {
        let cookie = cookie.ok_or_else(|| anyhow::anyhow!("Cookie value is not a valid header"))?;
        headers.append(header::SET_COOKIE, cookie);
    }

    Ok((
        headers,
        Json(DevLoginResponse {
            user_id: user.id,
            csrf_token,
        }),
    ))
}
