//! Flash messages: short status keys the client localizes and shows as a
//! transient notification.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub const PRIVACY_UPDATED: &str = "flash.privacy-updated";
pub const UPDATED_THEMES: &str = "flash.updated-themes";
pub const UPDATED_SOCIALS: &str = "flash.updated-socials";
pub const USERNAME_USED: &str = "flash.username-used";
pub const USERNAME_TAKEN: &str = "flash.username-taken";
pub const USERNAME_UPDATED: &str = "flash.username-updated";
pub const KEYBOARD_SHORTCUT_UPDATED: &str = "flash.keyboard-shortcut-updated";
pub const SUBSCRIBE_TO_QUINCY_UPDATED: &str = "flash.subscribe-to-quincy-updated";
pub const ACCEPTED_HONESTY: &str = "buttons.accepted-honesty";
pub const WRONG_UPDATING: &str = "flash.wrong-updating";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashType {
    Success,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub message: Cow<'static, str>,
    #[serde(rename = "type")]
    pub kind: FlashType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl FlashMessage {
    pub fn success(message: &'static str) -> Self {
        Self {
            message: Cow::Borrowed(message),
            kind: FlashType::Success,
            username: None,
        }
    }

    pub fn info(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            kind: FlashType::Info,
            username: None,
        }
    }

    pub fn wrong_updating() -> Self {
        Self {
            message: Cow::Borrowed(WRONG_UPDATING),
            kind: FlashType::Danger,
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}
