use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Platform behind a service registration. Persisted as an integer column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, AsRefStr, Display,
    EnumString,
)]
#[repr(i32)]
#[strum(ascii_case_insensitive)]
pub enum ServiceType {
    GitHub = 0,
    GitLab = 1,
    Jira = 2,
}

impl ServiceType {
    /// Maps the stored integer back to a variant. Unknown values yield `None`.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(ServiceType::GitHub),
            1 => Some(ServiceType::GitLab),
            2 => Some(ServiceType::Jira),
            _ => None,
        }
    }

    /// Name used for the service row created for a well-known domain.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::GitHub => "GitHub",
            ServiceType::GitLab => "GitLab",
            ServiceType::Jira => "Jira",
        }
    }
}
