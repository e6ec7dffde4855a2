//! Transport layer: query-string encoding and the gateway's textual replies.

mod auth;
mod send_msg;

pub use auth::{decode_auth_response, encode_auth_query};
pub use send_msg::{decode_send_msg_response, encode_send_msg_query};

/// Path of the session endpoint relative to the API base.
pub const AUTH_PATH: &str = "auth";
/// Path of the send endpoint relative to the API base.
pub const SEND_MSG_PATH: &str = "sendmsg";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("gateway rejected the request: {body}")]
    Rejected { body: String },

    #[error("gateway accepted the login but returned no session id")]
    EmptySession,
}
