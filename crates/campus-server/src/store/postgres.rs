use async_trait::async_trait;
use campus_shared::{NewUser, ProfileUi, Theme, User};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::{SettingsUpdate, StoreError, UserStore};
use crate::db::DbPool;

const USER_COLUMNS: &str = r#"
    id, email, username, username_display, name, about, location, picture,
    profile_ui, theme, website, twitter, github_profile, linkedin,
    keyboard_shortcuts, send_quincy_email, is_honest, accepted_privacy_terms,
    email_verified, is_donating, is_banned, is_cheater, created_at, updated_at
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: String,
    username_display: Option<String>,
    name: String,
    about: String,
    location: String,
    picture: String,
    profile_ui: Json<ProfileUi>,
    theme: Theme,
    website: Option<String>,
    twitter: Option<String>,
    github_profile: Option<String>,
    linkedin: Option<String>,
    keyboard_shortcuts: bool,
    send_quincy_email: bool,
    is_honest: bool,
    accepted_privacy_terms: bool,
    email_verified: bool,
    is_donating: bool,
    is_banned: bool,
    is_cheater: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            username: row.username,
            username_display: row.username_display,
            name: row.name,
            about: row.about,
            location: row.location,
            picture: row.picture,
            profile_ui: row.profile_ui.0,
            theme: row.theme,
            website: row.website,
            twitter: row.twitter,
            github_profile: row.github_profile,
            linkedin: row.linkedin,
            keyboard_shortcuts: row.keyboard_shortcuts,
            send_quincy_email: row.send_quincy_email,
            is_honest: row.is_honest,
            accepted_privacy_terms: row.accepted_privacy_terms,
            email_verified: row.email_verified,
            is_donating: row.is_donating,
            is_banned: row.is_banned,
            is_cheater: row.is_cheater,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    db: DbPool,
}

impl PgUserStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(User::from))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.find_one("username", username).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO users (
                id, email, username, name, about, location, picture, profile_ui, theme,
                keyboard_shortcuts, send_quincy_email, is_honest, accepted_privacy_terms,
                email_verified, is_donating, is_banned, is_cheater, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $18)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row: UserRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&new_user.email)
            .bind(&new_user.username)
            .bind(&new_user.name)
            .bind(&new_user.about)
            .bind(&new_user.location)
            .bind(&new_user.picture)
            .bind(Json(new_user.profile_ui))
            .bind(new_user.theme)
            .bind(new_user.keyboard_shortcuts)
            .bind(new_user.send_quincy_email)
            .bind(new_user.is_honest)
            .bind(new_user.accepted_privacy_terms)
            .bind(new_user.email_verified)
            .bind(new_user.is_donating)
            .bind(new_user.is_banned)
            .bind(new_user.is_cheater)
            .bind(Utc::now())
            .fetch_one(&self.db)
            .await?;

        Ok(row.into())
    }

    async fn apply(&self, id: Uuid, update: SettingsUpdate) -> Result<(), StoreError> {
        let now = Utc::now();

        let query = match update {
            SettingsUpdate::ProfileUi(profile_ui) => {
                sqlx::query("UPDATE users SET profile_ui = $1, updated_at = $2 WHERE id = $3")
                    .bind(Json(profile_ui))
            }
            SettingsUpdate::Theme(theme) => {
                sqlx::query("UPDATE users SET theme = $1, updated_at = $2 WHERE id = $3").bind(theme)
            }
            SettingsUpdate::Socials {
                website,
                twitter,
                github_profile,
                linkedin,
            } => sqlx::query(
                r#"
                UPDATE users
                SET website = COALESCE($1, website),
                    twitter = COALESCE($2, twitter),
                    github_profile = COALESCE($3, github_profile),
                    linkedin = COALESCE($4, linkedin),
                    updated_at = $5
                WHERE id = $6
                "#,
            )
            .bind(website)
            .bind(twitter)
            .bind(github_profile)
            .bind(linkedin),
            SettingsUpdate::Username { username, display } => sqlx::query(
                "UPDATE users SET username = $1, username_display = $2, updated_at = $3 WHERE id = $4",
            )
            .bind(username)
            .bind(display),
            SettingsUpdate::KeyboardShortcuts(enabled) => sqlx::query(
                "UPDATE users SET keyboard_shortcuts = $1, updated_at = $2 WHERE id = $3",
            )
            .bind(enabled),
            SettingsUpdate::QuincyEmail(enabled) => sqlx::query(
                "UPDATE users SET send_quincy_email = $1, updated_at = $2 WHERE id = $3",
            )
            .bind(enabled),
            SettingsUpdate::Honesty => {
                sqlx::query("UPDATE users SET is_honest = TRUE, updated_at = $1 WHERE id = $2")
            }
            SettingsUpdate::PrivacyTerms { quincy_emails } => sqlx::query(
                r#"
                UPDATE users
                SET accepted_privacy_terms = TRUE,
                    send_quincy_email = $1,
                    updated_at = $2
                WHERE id = $3
                "#,
            )
            .bind(quincy_emails),
        };

        let result = query.bind(now).bind(id).execute(&self.db).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound);
        }

        Ok(())
    }
}
