use campus_shared::api::{
    UpdateHonestyRequest, UpdateKeyboardShortcutsRequest, UpdatePrivacyTermsRequest,
    UpdateProfileUiRequest, UpdateQuincyEmailRequest, UpdateSocialsRequest, UpdateThemeRequest,
    UpdateUsernameRequest,
};
use campus_shared::{ProfileUi, Theme};
use serde_json::{Map, Value};

use super::{boolean, constant, object, one_of, required, string_len, url, BodySchema, Pointer, SchemaError};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

fn required_bool(object: &Map<String, Value>, at: &Pointer, key: &str) -> Result<bool, SchemaError> {
    boolean(required(object, at, key)?, &at.child(key))
}

impl BodySchema for UpdateProfileUiRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        let at = body.child("profileUI");
        let profile_ui = object(required(object(value, &body)?, &body, "profileUI")?, &at)?;

        let mut flags = [false; 10];
        for (flag, key) in flags.iter_mut().zip(ProfileUi::FIELDS) {
            *flag = required_bool(profile_ui, &at, key)?;
        }

        Ok(Self {
            profile_ui: ProfileUi::from_flags(flags),
        })
    }
}

impl BodySchema for UpdateThemeRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        let theme = required(object(value, &body)?, &body, "theme")?;
        let allowed = Theme::ALL.map(|theme| theme.as_str());
        let theme = one_of(theme, &body.child("theme"), &allowed)?;

        Ok(Self {
            theme: theme
                .parse()
                .map_err(|e: campus_shared::UnknownTheme| SchemaError(e.to_string()))?,
        })
    }
}

impl BodySchema for UpdateSocialsRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        let fields = object(value, &body)?;

        let link = |key: &str| -> Result<Option<String>, SchemaError> {
            fields
                .get(key)
                .map(|v| url(v, &body.child(key)).map(str::to_string))
                .transpose()
        };

        Ok(Self {
            website: link("website")?,
            twitter: link("twitter")?,
            github_profile: link("githubProfile")?,
            linkedin: link("linkedin")?,
        })
    }
}

impl BodySchema for UpdateUsernameRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        let username = required(object(value, &body)?, &body, "username")?;
        let username = string_len(
            username,
            &body.child("username"),
            USERNAME_MIN_LEN,
            USERNAME_MAX_LEN,
        )?;

        Ok(Self {
            username: username.to_string(),
        })
    }
}

impl BodySchema for UpdateKeyboardShortcutsRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        Ok(Self {
            keyboard_shortcuts: required_bool(object(value, &body)?, &body, "keyboardShortcuts")?,
        })
    }
}

impl BodySchema for UpdateQuincyEmailRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        Ok(Self {
            send_quincy_email: required_bool(object(value, &body)?, &body, "sendQuincyEmail")?,
        })
    }
}

impl BodySchema for UpdateHonestyRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        let is_honest = required(object(value, &body)?, &body, "isHonest")?;
        constant(is_honest, &body.child("isHonest"), &Value::Bool(true))?;

        Ok(Self { is_honest: true })
    }
}

impl BodySchema for UpdatePrivacyTermsRequest {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let body = Pointer::body();
        Ok(Self {
            quincy_emails: required_bool(object(value, &body)?, &body, "quincyEmails")?,
        })
    }
}
