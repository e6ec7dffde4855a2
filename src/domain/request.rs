use crate::domain::validation::ValidationError;
use crate::domain::value::{ApiId, MessageText, Password, RecipientList, SenderNumber, Username};

/// Credentials for `http/auth`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
    pub api_id: ApiId,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        api_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
            api_id: ApiId::new(api_id)?,
        })
    }
}

/// One `http/sendmsg` call: a single segment to every configured recipient.
///
/// Messages are always sent with `mo=1` so replies reach the two-way number.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    to: RecipientList,
    from: SenderNumber,
    text: MessageText,
}

impl OutboundMessage {
    pub fn new(to: RecipientList, from: SenderNumber, text: MessageText) -> Self {
        Self { to, from, text }
    }

    pub fn recipients(&self) -> &RecipientList {
        &self.to
    }

    pub fn sender(&self) -> &SenderNumber {
        &self.from
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
