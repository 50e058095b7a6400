use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ProfileUi, Theme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Canonical, lowercase form. Unique across users.
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_display: Option<String>,
    pub name: String,
    pub about: String,
    pub location: String,
    pub picture: String,
    #[serde(rename = "profileUI")]
    pub profile_ui: ProfileUi,
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub keyboard_shortcuts: bool,
    pub send_quincy_email: bool,
    pub is_honest: bool,
    pub accepted_privacy_terms: bool,
    pub email_verified: bool,
    pub is_donating: bool,
    pub is_banned: bool,
    pub is_cheater: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a freshly created account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub name: String,
    pub about: String,
    pub location: String,
    pub picture: String,
    pub profile_ui: ProfileUi,
    pub theme: Theme,
    pub keyboard_shortcuts: bool,
    pub send_quincy_email: bool,
    pub is_honest: bool,
    pub accepted_privacy_terms: bool,
    pub email_verified: bool,
    pub is_donating: bool,
    pub is_banned: bool,
    pub is_cheater: bool,
}

impl NewUser {
    /// The signup template. Every preference starts off, every profile
    /// section starts hidden, and the username is a generated placeholder
    /// that the user is expected to replace.
    pub fn with_defaults(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: placeholder_username(),
            name: String::new(),
            about: String::new(),
            location: String::new(),
            picture: String::new(),
            profile_ui: ProfileUi::default(),
            theme: Theme::Default,
            keyboard_shortcuts: false,
            send_quincy_email: false,
            is_honest: false,
            accepted_privacy_terms: false,
            email_verified: true,
            is_donating: false,
            is_banned: false,
            is_cheater: false,
        }
    }

    /// Materializes the template into a stored record.
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            username: self.username,
            username_display: None,
            name: self.name,
            about: self.about,
            location: self.location,
            picture: self.picture,
            profile_ui: self.profile_ui,
            theme: self.theme,
            website: None,
            twitter: None,
            github_profile: None,
            linkedin: None,
            keyboard_shortcuts: self.keyboard_shortcuts,
            send_quincy_email: self.send_quincy_email,
            is_honest: self.is_honest,
            accepted_privacy_terms: self.accepted_privacy_terms,
            email_verified: self.email_verified,
            is_donating: self.is_donating,
            is_banned: self.is_banned,
            is_cheater: self.is_cheater,
            created_at: now,
            updated_at: now,
        }
    }
}

fn placeholder_username() -> String {
    format!("fcc{}", Uuid::new_v4())
}
