use axum::{extract::State, Extension, Json};
use campus_shared::api::{
    flash, FlashMessage, UpdateHonestyRequest, UpdateKeyboardShortcutsRequest,
    UpdatePrivacyTermsRequest, UpdateProfileUiRequest, UpdateQuincyEmailRequest,
    UpdateSocialsRequest, UpdateThemeRequest, UpdateUsernameRequest,
};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::routes::AppState;
use crate::schema::SchemaJson;
use crate::store::SettingsUpdate;
use crate::username::{is_blocklisted, is_profane, validate_username};

async fn write(
    state: &AppState,
    user: &AuthUser,
    update: SettingsUpdate,
    message: &'static str,
) -> Result<Json<FlashMessage>, AppError> {
    state.store.apply(user.id, update).await?;
    Ok(Json(FlashMessage::success(message)))
}

/// PUT /update-my-profileui
pub async fn update_profile_ui(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(req): SchemaJson<UpdateProfileUiRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    write(
        &state,
        &user,
        SettingsUpdate::ProfileUi(req.profile_ui),
        flash::PRIVACY_UPDATED,
    )
    .await
}

/// PUT /update-my-theme
pub async fn update_theme(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(req): SchemaJson<UpdateThemeRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    write(&state, &user, SettingsUpdate::Theme(req.theme), flash::UPDATED_THEMES).await
}

/// PUT /update-my-socials
pub async fn update_socials(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(req): SchemaJson<UpdateSocialsRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    let update = SettingsUpdate::Socials {
        website: req.website,
        twitter: req.twitter,
        github_profile: req.github_profile,
        linkedin: req.linkedin,
    };
    write(&state, &user, update, flash::UPDATED_SOCIALS).await
}

/// PUT /update-my-username
///
/// Rule violations are answered with 200 and an `info` flash; only a
/// malformed body is a 400.
pub async fn update_username(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(req): SchemaJson<UpdateUsernameRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    let current = state
        .store
        .find_by_id(user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let new_username = req.username.to_lowercase();
    let new_display = req.username.trim().to_string();
    let current_display = current
        .username_display
        .as_deref()
        .map(str::trim)
        .filter(|display| !display.is_empty());

    if new_username == current.username.to_lowercase() && Some(new_display.as_str()) == current_display {
        return Ok(Json(
            FlashMessage::info(flash::USERNAME_USED).with_username(new_username),
        ));
    }

    if let Err(reason) = validate_username(&new_username) {
        return Ok(Json(
            FlashMessage::info(format!("Username {new_username} {reason}"))
                .with_username(new_username),
        ));
    }

    let claimed = state
        .store
        .find_by_username(&new_username)
        .await?
        .is_some_and(|owner| owner.id != user.id);

    if claimed || is_profane(&new_username) || is_blocklisted(&new_username) {
        return Ok(Json(
            FlashMessage::info(flash::USERNAME_TAKEN).with_username(new_username),
        ));
    }

    state
        .store
        .apply(
            user.id,
            SettingsUpdate::Username {
                username: new_username.clone(),
                display: new_display,
            },
        )
        .await?;

    tracing::info!(user_id = %user.id, username = %new_username, "Username updated");

    Ok(Json(
        FlashMessage::success(flash::USERNAME_UPDATED).with_username(new_username),
    ))
}

/// PUT /update-my-keyboard-shortcuts
pub async fn update_keyboard_shortcuts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(req): SchemaJson<UpdateKeyboardShortcutsRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    write(
        &state,
        &user,
        SettingsUpdate::KeyboardShortcuts(req.keyboard_shortcuts),
        flash::KEYBOARD_SHORTCUT_UPDATED,
    )
    .await
}

/// PUT /update-my-quincy-email
pub async fn update_quincy_email(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(req): SchemaJson<UpdateQuincyEmailRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    write(
        &state,
        &user,
        SettingsUpdate::QuincyEmail(req.send_quincy_email),
        flash::SUBSCRIBE_TO_QUINCY_UPDATED,
    )
    .await
}

/// PUT /update-my-honesty
pub async fn update_honesty(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(_req): SchemaJson<UpdateHonestyRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    write(&state, &user, SettingsUpdate::Honesty, flash::ACCEPTED_HONESTY).await
}

/// PUT /update-privacy-terms
pub async fn update_privacy_terms(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    SchemaJson(req): SchemaJson<UpdatePrivacyTermsRequest>,
) -> Result<Json<FlashMessage>, AppError> {
    write(
        &state,
        &user,
        SettingsUpdate::PrivacyTerms {
            quincy_emails: req.quincy_emails,
        },
        flash::PRIVACY_UPDATED,
    )
    .await
}
