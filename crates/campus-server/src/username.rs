//! Business rules for choosing a username.
//!
//! These run after the request has passed schema validation, and a rule
//! violation is reported to the user as an `info` flash rather than an HTTP
//! error.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("contains invalid characters")]
    InvalidCharacters,

    #[error("is too short")]
    TooShort,

    #[error("is a reserved error code")]
    HttpStatusCode,
}

fn valid_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_+\-]*$").expect("username pattern is valid"))
}

fn is_http_status_code(username: &str) -> bool {
    username.len() == 3
        && username
            .parse::<u16>()
            .map(|code| (100..=599).contains(&code))
            .unwrap_or(false)
}

pub fn validate_username(username: &str) -> Result<(), UsernameError> {
    if !valid_chars().is_match(username) {
        return Err(UsernameError::InvalidCharacters);
    }
    if username.chars().count() < 3 {
        return Err(UsernameError::TooShort);
    }
    if is_http_status_code(username) {
        return Err(UsernameError::HttpStatusCode);
    }
    Ok(())
}

/// Names that collide with site routes, locales, or staff roles.
const BLOCKLISTED_USERNAMES: &[&str] = &[
    "about", "academic-honesty", "account", "admin", "administrator", "agile", "all-stories",
    "api", "api-docs", "arabic", "auth", "backend-challenge-completed", "bonfire", "cats.json",
    "challenge", "challenge-completed", "challenges", "chat", "chinese", "chinese-traditional",
    "code-of-conduct", "coding-bootcamp-cost-calculator", "completed-bonfire",
    "completed-challenge", "completed-field-guide", "completed-zipline-or-basejump",
    "confirm", "contact", "copyright", "curriculum", "dashboard", "deprecated-signin",
    "donate", "email-signin", "email-signup", "espanol", "events", "explorer", "external",
    "faq", "field-guide", "forgot", "forum", "german", "get-help", "get-pai", "guide",
    "help", "home", "how-nonprofit-projects-work", "internal", "italian", "japanese",
    "jobs", "jobs-form", "learn", "learn-to-code", "login", "logout", "map",
    "modern-challenge-completed", "news", "nonprofits", "nonprofits-form",
    "open-api", "pmi-acp-agile-project-managers", "pmi-acp-agile-project-managers-form",
    "portuguese", "privacy", "privacy-policy", "profile", "project-completed",
    "reset", "root", "russian", "services", "settings", "shop", "signin", "signout",
    "signup", "sitemap.xml", "software-resources-for-nonprofits", "spanish",
    "staff", "stories", "submit-cat-photo", "support", "swahili", "terms",
    "the-fastest-web-page-on-the-internet", "twitch", "ukrainian", "unsubscribe",
    "unsubscribed", "update-my-portfolio", "update-my-profileui", "update-my-socials",
    "update-my-theme", "update-my-username", "user", "wiki",
];

pub fn is_blocklisted(username: &str) -> bool {
    BLOCKLISTED_USERNAMES.contains(&username.to_lowercase().as_str())
}

/// Whole-name matches only, so ordinary names that contain one of these as a
/// substring are still allowed.
const PROFANITY: &[&str] = &[
    "anal", "anus", "arse", "ass", "asshole", "bastard", "bitch", "bollocks", "boner",
    "boob", "boobs", "bugger", "butt", "clit", "cock", "coon", "crap", "cunt", "damn",
    "dick", "dildo", "dyke", "fag", "faggot", "feck", "fuck", "fucker", "fucking",
    "goddamn", "hell", "homo", "jerk", "jizz", "knob", "labia", "muff", "nigga",
    "nigger", "penis", "piss", "poop", "prick", "pube", "pussy", "queer", "scrotum",
    "sex", "shit", "slut", "smegma", "spunk", "tit", "tits", "tosser", "turd", "twat",
    "vagina", "wank", "whore",
];

pub fn is_profane(username: &str) -> bool {
    let candidate = username.to_lowercase();
    candidate
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| PROFANITY.contains(&word))
}
