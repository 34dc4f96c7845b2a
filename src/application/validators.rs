/// Maximum length of the bounded string columns (`VARCHAR(255)`).
pub const MAX_NAME_LEN: usize = 255;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validates a username.
/// Rules:
/// - 1-255 characters after trimming
/// - No whitespace or control characters inside
pub fn is_valid_username(username: &str) -> bool {
    let trimmed = username.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
        return false;
    }
    !trimmed
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Validates a bounded, non-empty text value such as a service name or the
/// username a token belongs to inside the external service.
pub fn is_valid_bounded_text(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_NAME_LEN
}
