use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell HTTP API id (`api_id`).
///
/// Invariant: non-empty after trimming.
pub struct ApiId(String);

impl ApiId {
    /// Query parameter name used by Clickatell (`api_id`).
    pub const FIELD: &'static str = "api_id";

    /// Create a validated [`ApiId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query parameter name used by Clickatell (`user`).
    pub const FIELD: &'static str = "user";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Clickatell account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter name used by Clickatell (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Two-way number the message is sent from (`from`).
///
/// Invariant: non-empty after trimming. The number must be provisioned on the Clickatell account.
pub struct SenderNumber(String);

impl SenderNumber {
    /// Query parameter name used by Clickatell (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Comma-separated recipient list (`to`).
///
/// Only digits, commas and periods survive [`RecipientList::sanitize`], so a value like
/// `"+1 (555) 010-9999, 555.0100"` becomes `"15550109999,555.0100"`.
pub struct RecipientList(String);

impl RecipientList {
    /// Query parameter name used by Clickatell (`to`).
    pub const FIELD: &'static str = "to";

    /// Strip everything outside `[0-9,.]` and reject lists that end up empty.
    pub fn sanitize(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let cleaned = value
            .as_ref()
            .chars()
            .filter(|ch| ch.is_ascii_digit() || *ch == ',' || *ch == '.')
            .collect::<String>();
        if cleaned.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(cleaned))
    }

    /// Borrow the sanitized list exactly as it is sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the individual numbers, skipping empty entries.
    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').filter(|number| !number.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by Clickatell (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Caller guarantees the text is non-empty.
    pub(crate) fn from_parts(value: String) -> Self {
        debug_assert!(!value.is_empty());
        Self(value)
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what the segment limits count.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Session id returned by `http/auth` and required by `http/sendmsg`.
///
/// Invariant: non-empty after trimming. Only valid for a single dispatch.
pub struct SessionToken(String);

impl SessionToken {
    /// Query parameter name used by Clickatell (`session_id`).
    pub const FIELD: &'static str = "session_id";

    /// Create a validated [`SessionToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Store order (payment) id.
pub struct OrderId(u64);

impl OrderId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
