//! User persistence.
//!
//! Handlers only ever touch the authenticated user's own row, and each
//! settings change is a single keyed write described by [`SettingsUpdate`].

mod memory;
mod postgres;

use async_trait::async_trait;
use campus_shared::{NewUser, ProfileUi, Theme, User};
use uuid::Uuid;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found")]
    UserNotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// One write against a user record.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsUpdate {
    ProfileUi(ProfileUi),
    Theme(Theme),
    /// `None` leaves the stored link untouched.
    Socials {
        website: Option<String>,
        twitter: Option<String>,
        github_profile: Option<String>,
        linkedin: Option<String>,
    },
    Username {
        username: String,
        display: String,
    },
    KeyboardShortcuts(bool),
    QuincyEmail(bool),
    /// Honesty can only be accepted, never withdrawn.
    Honesty,
    PrivacyTerms {
        quincy_emails: bool,
    },
}

impl SettingsUpdate {
    /// Applies the update to an in-memory record.
    pub fn apply_to(self, user: &mut User) {
        match self {
            Self::ProfileUi(profile_ui) => user.profile_ui = profile_ui,
            Self::Theme(theme) => user.theme = theme,
            Self::Socials {
                website,
                twitter,
                github_profile,
                linkedin,
            } => {
                if website.is_some() {
                    user.website = website;
                }
                if twitter.is_some() {
                    user.twitter = twitter;
                }
                if github_profile.is_some() {
                    user.github_profile = github_profile;
                }
                if linkedin.is_some() {
                    user.linkedin = linkedin;
                }
            }
            Self::Username { username, display } => {
                user.username = username;
                user.username_display = Some(display);
            }
            Self::KeyboardShortcuts(enabled) => user.keyboard_shortcuts = enabled,
            Self::QuincyEmail(enabled) => user.send_quincy_email = enabled,
            Self::Honesty => user.is_honest = true,
            Self::PrivacyTerms { quincy_emails } => {
                user.accepted_privacy_terms = true;
                user.send_quincy_email = quincy_emails;
            }
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Looks up by canonical (lowercase) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn apply(&self, id: Uuid, update: SettingsUpdate) -> Result<(), StoreError>;
}
