use serde::{Deserialize, Serialize};

use crate::models::{ProfileUi, Theme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileUiRequest {
    #[serde(rename = "profileUI")]
    pub profile_ui: ProfileUi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateThemeRequest {
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSocialsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKeyboardShortcutsRequest {
    pub keyboard_shortcuts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuincyEmailRequest {
    pub send_quincy_email: bool,
}

/// Only ever constructed with `is_honest == true`; the server rejects any
/// other value before a handler sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHonestyRequest {
    pub is_honest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrivacyTermsRequest {
    pub quincy_emails: bool,
}
