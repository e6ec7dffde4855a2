//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod money;
mod order;
mod request;
mod response;
mod validation;
mod value;

pub use message::{SEGMENT_WIDTH, SINGLE_MESSAGE_LIMIT, compose_order_message, split_segments};
pub use money::{Currency, CurrencyPosition, Money};
pub use order::{LineItem, Order};
pub use request::{Credentials, OutboundMessage};
pub use response::SendReceipt;
pub use validation::ValidationError;
pub use value::{
    ApiId, MessageText, OrderId, Password, RecipientList, SenderNumber, SessionToken, Username,
};
