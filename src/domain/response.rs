/// Successful `http/sendmsg` reply.
///
/// Any body that does not start with `ERR:` counts as success, so the body is kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub body: String,
}

impl SendReceipt {
    /// Message ids from `ID: <id>` or `ID: <id> To: <number>` lines, if the gateway sent any.
    pub fn message_ids(&self) -> impl Iterator<Item = &str> {
        self.body.lines().filter_map(|line| {
            line.trim()
                .strip_prefix("ID:")
                .and_then(|rest| rest.split_whitespace().next())
        })
    }
}
