use crate::domain::{
    MessageText, OutboundMessage, RecipientList, SendReceipt, SenderNumber, SessionToken,
};
use crate::transport::TransportError;

const ERR_PREFIX: &str = "ERR:";

pub fn encode_send_msg_query(
    session: &SessionToken,
    message: &OutboundMessage,
) -> Vec<(String, String)> {
    vec![
        (SessionToken::FIELD.to_owned(), session.as_str().to_owned()),
        (
            RecipientList::FIELD.to_owned(),
            message.recipients().as_str().to_owned(),
        ),
        (
            SenderNumber::FIELD.to_owned(),
            message.sender().as_str().to_owned(),
        ),
        ("mo".to_owned(), "1".to_owned()),
        (
            MessageText::FIELD.to_owned(),
            message.text().as_str().to_owned(),
        ),
    ]
}

/// `ERR: <code>` is a rejection; every other body, including an empty one, is success.
pub fn decode_send_msg_response(body: &str) -> Result<SendReceipt, TransportError> {
    if body.starts_with(ERR_PREFIX) {
        return Err(TransportError::Rejected {
            body: body.to_owned(),
        });
    }
    Ok(SendReceipt {
        body: body.to_owned(),
    })
}
