//! Length rules shared by the data-access and service layers, and the
//! typed reasons a request gets turned away.

use thiserror::Error;

pub const MAX_USERNAME_CHARS: usize = 255;
pub const MIN_PASSWORD_CHARS: usize = 4;
pub const MAX_PASSWORD_CHARS: usize = 255;
pub const MAX_MESSAGE_CHARS: usize = 255;

/// Why a request was refused. Reported to clients only as a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("username or password does not meet registration rules")]
    InvalidAccount,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("username and password do not match an account")]
    BadCredentials,

    #[error("message text is invalid or author does not exist")]
    InvalidMessage,

    #[error("message does not exist or replacement text is invalid")]
    InvalidPatch,
}

/// Non-empty and at most 255 characters.
pub fn username_ok(username: &str) -> bool {
    !username.is_empty() && username.chars().count() <= MAX_USERNAME_CHARS
}

/// Between 4 and 255 characters.
pub fn password_ok(password: &str) -> bool {
    let len = password.chars().count();
    (MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&len)
}

/// Non-empty and at most 255 characters.
pub fn message_text_ok(text: &str) -> bool {
    !text.is_empty() && text.chars().count() <= MAX_MESSAGE_CHARS
}
