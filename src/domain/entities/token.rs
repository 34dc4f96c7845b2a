use std::fmt;

use uuid::Uuid;

/// A user's credential for one service. The token value is opaque and stored as given.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub id: Uuid,
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub in_service_username: String,
    pub token: String,
    pub enabled: bool,
}

// Keep credentials out of logs and `?` formatting.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id)
            .field("service_id", &self.service_id)
            .field("user_id", &self.user_id)
            .field("in_service_username", &self.in_service_username)
            .field("token", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Clone)]
pub struct NewToken {
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub in_service_username: String,
    pub token: String,
}

impl fmt::Debug for NewToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewToken")
            .field("service_id", &self.service_id)
            .field("user_id", &self.user_id)
            .field("in_service_username", &self.in_service_username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
