//! Order summary text and its split into SMS segments.

use std::fmt::Write as _;

use crate::domain::money::Currency;
use crate::domain::order::Order;
use crate::domain::value::MessageText;

/// Longest text sent as a single, unnumbered message.
pub const SINGLE_MESSAGE_LIMIT: usize = 160;

/// Width of each chunk once a message is split. The `i/N` prefix is not counted.
pub const SEGMENT_WIDTH: usize = 140;

/// Build the notification text for `order`.
///
/// Returns `None` when the order has no line items at all; nothing is sent for such orders.
pub fn compose_order_message(
    site_name: &str,
    order: &Order,
    itemize: bool,
    currency: &Currency,
) -> Option<MessageText> {
    let items = order.line_items();
    if items.is_empty() {
        return None;
    }

    let mut message = format!("New Order @ {site_name}\n");
    if itemize {
        for item in items {
            message.push_str(&item.title);
            if let Some(option) = item.price_option.as_deref() {
                let _ = write!(message, " - {option}");
            }
            let _ = writeln!(message, " - {}", currency.format(item.price));
        }
    }
    let _ = write!(message, "TOTAL - {}", currency.format(order.total));

    Some(MessageText::from_parts(message))
}

/// Split `message` into the segments that are actually sent.
///
/// Messages up to [`SINGLE_MESSAGE_LIMIT`] characters go out unchanged. Longer ones are cut
/// every [`SEGMENT_WIDTH`] characters, ignoring word boundaries, and each chunk gets an
/// `"{i}/{N}\n"` prefix. Prefixed chunks can therefore be longer than [`SEGMENT_WIDTH`].
pub fn split_segments(message: &MessageText) -> Vec<MessageText> {
    if message.char_len() <= SINGLE_MESSAGE_LIMIT {
        return vec![message.clone()];
    }

    let chars = message.as_str().chars().collect::<Vec<_>>();
    let chunks = chars.chunks(SEGMENT_WIDTH).collect::<Vec<_>>();
    let count = chunks.len();

    chunks
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| {
            let mut text = format!("{}/{count}\n", idx + 1);
            text.extend(chunk.iter());
            MessageText::from_parts(text)
        })
        .collect()
}
