use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which sections of a public profile are visible to other people.
///
/// Always stored as a whole. There is no partial form of this struct, so a
/// stored value carries exactly these ten flags and nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUi {
    pub is_locked: bool,
    pub show_about: bool,
    pub show_certs: bool,
    pub show_donation: bool,
    pub show_heat_map: bool,
    pub show_location: bool,
    pub show_name: bool,
    pub show_points: bool,
    pub show_portfolio: bool,
    pub show_time_line: bool,
}

impl ProfileUi {
    /// Wire names of the flags, in declaration order.
    pub const FIELDS: [&'static str; 10] = [
        "isLocked",
        "showAbout",
        "showCerts",
        "showDonation",
        "showHeatMap",
        "showLocation",
        "showName",
        "showPoints",
        "showPortfolio",
        "showTimeLine",
    ];

    /// Builds a value from flags listed in `FIELDS` order.
    pub fn from_flags(flags: [bool; 10]) -> Self {
        let [
            is_locked,
            show_about,
            show_certs,
            show_donation,
            show_heat_map,
            show_location,
            show_name,
            show_points,
            show_portfolio,
            show_time_line,
        ] = flags;
        Self {
            is_locked,
            show_about,
            show_certs,
            show_donation,
            show_heat_map,
            show_location,
            show_name,
            show_points,
            show_portfolio,
            show_time_line,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "user_theme", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Night,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Default, Theme::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
