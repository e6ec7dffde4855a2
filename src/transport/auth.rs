use crate::domain::{ApiId, Credentials, Password, SessionToken, Username};
use crate::transport::TransportError;

const OK_PREFIX: &str = "OK:";

pub fn encode_auth_query(credentials: &Credentials) -> Vec<(String, String)> {
    vec![
        (
            ApiId::FIELD.to_owned(),
            credentials.api_id.as_str().to_owned(),
        ),
        (
            Username::FIELD.to_owned(),
            credentials.username.as_str().to_owned(),
        ),
        (
            Password::FIELD.to_owned(),
            credentials.password.as_str().to_owned(),
        ),
    ]
}

/// `OK: <session id>` yields the session; any other body is a rejection.
pub fn decode_auth_response(body: &str) -> Result<SessionToken, TransportError> {
    match body.strip_prefix(OK_PREFIX) {
        Some(rest) => SessionToken::new(rest).map_err(|_| TransportError::EmptySession),
        None => Err(TransportError::Rejected {
            body: body.to_owned(),
        }),
    }
}
