//! Purchase notifications: turns a completed order into one or more SMS.

use std::sync::Arc;

use crate::client::{ClickatellClient, ClickatellError};
use crate::config::Settings;
use crate::domain::{Order, OrderId, OutboundMessage, compose_order_message, split_segments};

/// Title every gateway failure is recorded under.
pub const GATEWAY_ERROR_TITLE: &str = "Clickatell Connect Error";

/// Read access to the store the notifications are about.
pub trait Storefront: Send + Sync {
    /// Store name shown in the message header.
    fn site_name(&self) -> String;

    /// A completed order, or `None` if the id is unknown.
    fn order(&self, id: OrderId) -> Option<Order>;
}

/// Sink for gateway failures, typically the store's own error log.
pub trait GatewayErrorLog: Send + Sync {
    fn record_gateway_error(&self, title: &str, message: &str, code: i32);
}

/// Records gateway failures as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLog;

impl GatewayErrorLog for TracingErrorLog {
    fn record_gateway_error(&self, title: &str, message: &str, code: i32) {
        tracing::error!(title, code, "{message}");
    }
}

/// Raised by the store once an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseCompleted {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingCredentials,
    MissingRecipients,
    OrderNotFound,
    NoLineItems,
}

/// What happened to one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing was sent and nothing was logged.
    Skipped(SkipReason),
    /// The gateway refused the session; no segment was sent.
    AuthFailed,
    /// Every segment was attempted; `failed` of them were rejected.
    Delivered { sent: usize, failed: usize },
}

/// Sends an SMS for every completed purchase.
///
/// Build one at startup and hand each [`PurchaseCompleted`] event to [`Self::handle`].
/// Failures never propagate: they are written to the [`GatewayErrorLog`] and summarized
/// in the returned [`Dispatch`].
pub struct PurchaseNotifier {
    settings: Settings,
    client: ClickatellClient,
    storefront: Arc<dyn Storefront>,
    error_log: Arc<dyn GatewayErrorLog>,
}

impl PurchaseNotifier {
    /// Create a notifier whose client honours `api_base` and `timeout_secs` from `settings`.
    pub fn new(
        settings: Settings,
        storefront: Arc<dyn Storefront>,
    ) -> Result<Self, ClickatellError> {
        let mut builder = ClickatellClient::builder();
        if let Some(api_base) = settings.api_base.as_deref() {
            builder = builder.api_base(api_base);
        }
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(settings, client, storefront))
    }

    pub fn with_client(
        settings: Settings,
        client: ClickatellClient,
        storefront: Arc<dyn Storefront>,
    ) -> Self {
        Self {
            settings,
            client,
            storefront,
            error_log: Arc::new(TracingErrorLog),
        }
    }

    pub fn with_error_log(mut self, error_log: Arc<dyn GatewayErrorLog>) -> Self {
        self.error_log = error_log;
        self
    }

    pub async fn handle(&self, event: &PurchaseCompleted) -> Dispatch {
        self.notify_purchase(event.order_id).await
    }

    pub async fn notify_purchase(&self, order_id: OrderId) -> Dispatch {
        let Some(credentials) = self.settings.credentials() else {
            tracing::debug!(%order_id, "gateway credentials not configured; skipping");
            return Dispatch::Skipped(SkipReason::MissingCredentials);
        };
        let Some(order) = self.storefront.order(order_id) else {
            tracing::debug!(%order_id, "order not found; skipping");
            return Dispatch::Skipped(SkipReason::OrderNotFound);
        };
        let Some(message) = compose_order_message(
            &self.storefront.site_name(),
            &order,
            self.settings.itemize,
            &self.settings.currency(),
        ) else {
            tracing::debug!(%order_id, "order has no line items; skipping");
            return Dispatch::Skipped(SkipReason::NoLineItems);
        };
        let Some((to, from)) = self.settings.outbound() else {
            tracing::debug!(%order_id, "recipients or sender not configured; skipping");
            return Dispatch::Skipped(SkipReason::MissingRecipients);
        };

        let session = match self.client.authenticate(&credentials).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(%order_id, error = %err, "gateway authentication failed");
                self.record(&err);
                return Dispatch::AuthFailed;
            }
        };

        let segments = split_segments(&message);
        let total = segments.len();
        let (mut sent, mut failed) = (0, 0);
        for (idx, text) in segments.into_iter().enumerate() {
            let outbound = OutboundMessage::new(to.clone(), from.clone(), text);
            match self.client.send_message(&session, &outbound).await {
                Ok(_) => sent += 1,
                Err(err) => {
                    tracing::warn!(
                        %order_id,
                        segment = idx + 1,
                        total,
                        error = %err,
                        "segment not sent"
                    );
                    self.record(&err);
                    failed += 1;
                }
            }
        }

        tracing::info!(%order_id, sent, failed, "purchase notification dispatched");
        Dispatch::Delivered { sent, failed }
    }

    fn record(&self, err: &ClickatellError) {
        let message = match err.gateway_body() {
            Some(body) => body.to_owned(),
            None => err.to_string(),
        };
        self.error_log.record_gateway_error(GATEWAY_ERROR_TITLE, &message, 0);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::client::testing::{FakeTransport, query_param};
    use crate::domain::{LineItem, Money};

    use super::*;

    struct FakeStore {
        name: String,
        orders: HashMap<OrderId, Order>,
    }

    impl FakeStore {
        fn with(orders: Vec<Order>) -> Arc<Self> {
            Arc::new(Self {
                name: "Shop".to_owned(),
                orders: orders.into_iter().map(|o| (o.id, o)).collect(),
            })
        }
    }

    impl Storefront for FakeStore {
        fn site_name(&self) -> String {
            self.name.clone()
        }

        fn order(&self, id: OrderId) -> Option<Order> {
            self.orders.get(&id).cloned()
        }
    }

    #[derive(Default)]
    struct RecordingLog {
        entries: Mutex<Vec<(String, String, i32)>>,
    }

    impl RecordingLog {
        fn entries(&self) -> Vec<(String, String, i32)> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl GatewayErrorLog for RecordingLog {
        fn record_gateway_error(&self, title: &str, message: &str, code: i32) {
            self.entries
                .lock()
                .unwrap()
                .push((title.to_owned(), message.to_owned(), code));
        }
    }

    const SETTINGS: &str = r#"
        username = "shop"
        password = "secret"
        api_id = "3141592"
        two_way_number = "15550001111"
        phone_numbers = "+1 (555) 010-9999"
        itemize = true
    "#;

    fn widget_order() -> Order {
        Order::new(OrderId::new(42), Money::from_cents(850)).with_cart_details(vec![
            LineItem::new("Widget", Money::from_cents(500)),
            LineItem::new("Gadget", Money::from_cents(350)),
        ])
    }

    fn long_order() -> Order {
        let items = (1..=10)
            .map(|n| {
                LineItem::new(
                    format!("Collector's edition volume {n}"),
                    Money::from_cents(1000),
                )
            })
            .collect::<Vec<_>>();
        Order::new(OrderId::new(77), Money::from_cents(10_000)).with_cart_details(items)
    }

    fn notifier(
        settings: &str,
        transport: &FakeTransport,
        orders: Vec<Order>,
    ) -> (PurchaseNotifier, Arc<RecordingLog>) {
        let log = Arc::new(RecordingLog::default());
        let client = ClickatellClient::with_transport(
            "https://example.invalid/http/",
            Arc::new(transport.clone()),
        );
        let notifier = PurchaseNotifier::with_client(
            Settings::from_toml_str(settings).unwrap(),
            client,
            FakeStore::with(orders),
        )
        .with_error_log(log.clone());
        (notifier, log)
    }

    #[tokio::test]
    async fn short_order_is_sent_as_one_message() {
        let transport = FakeTransport::new().reply("OK: abc123").reply("ID: 0c3a1f");
        let (notifier, log) = notifier(SETTINGS, &transport, vec![widget_order()]);

        let dispatch = notifier
            .handle(&PurchaseCompleted {
                order_id: OrderId::new(42),
            })
            .await;
        assert_eq!(dispatch, Dispatch::Delivered { sent: 1, failed: 0 });
        assert!(log.entries().is_empty());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path(), "/http/auth");
        let send = &requests[1];
        assert_eq!(send.path(), "/http/sendmsg");
        assert_eq!(query_param(send, "session_id").as_deref(), Some("abc123"));
        assert_eq!(query_param(send, "to").as_deref(), Some("15550109999"));
        assert_eq!(
            query_param(send, "text").as_deref(),
            Some("New Order @ Shop\nWidget - $5.00\nGadget - $3.50\nTOTAL - $8.50")
        );
    }

    #[tokio::test]
    async fn long_order_sends_every_segment_with_one_session() {
        let transport = FakeTransport::new().reply("OK: abc123");
        let (notifier, _log) = notifier(SETTINGS, &transport, vec![long_order()]);

        let dispatch = notifier.notify_purchase(OrderId::new(77)).await;

        let requests = transport.requests();
        let sends = &requests[1..];
        let expected = crate::domain::compose_order_message(
            "Shop",
            &long_order(),
            true,
            &Default::default(),
        )
        .unwrap()
        .char_len()
        .div_ceil(crate::domain::SEGMENT_WIDTH);
        assert!(expected > 1);
        assert_eq!(dispatch, Dispatch::Delivered { sent: expected, failed: 0 });
        assert_eq!(sends.len(), expected);
        for (idx, send) in sends.iter().enumerate() {
            assert_eq!(query_param(send, "session_id").as_deref(), Some("abc123"));
            let text = query_param(send, "text").unwrap();
            assert!(text.starts_with(&format!("{}/{expected}\n", idx + 1)), "{text:?}");
        }
    }

    #[tokio::test]
    async fn rejected_login_aborts_before_any_send() {
        let transport = FakeTransport::new().reply("ERR: 001, Authentication failed");
        let (notifier, log) = notifier(SETTINGS, &transport, vec![widget_order()]);

        let dispatch = notifier.notify_purchase(OrderId::new(42)).await;
        assert_eq!(dispatch, Dispatch::AuthFailed);
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(
            log.entries(),
            vec![(
                GATEWAY_ERROR_TITLE.to_owned(),
                "ERR: 001, Authentication failed".to_owned(),
                0
            )]
        );
    }

    #[tokio::test]
    async fn rejected_segment_is_logged_and_the_rest_still_sent() {
        let transport = FakeTransport::new()
            .reply("OK: abc123")
            .reply("ERR: 002, Unknown session")
            .reply("ID: 1");
        let (notifier, log) = notifier(SETTINGS, &transport, vec![long_order()]);

        let dispatch = notifier.notify_purchase(OrderId::new(77)).await;
        let Dispatch::Delivered { sent, failed } = dispatch else {
            panic!("unexpected dispatch: {dispatch:?}");
        };
        assert_eq!(failed, 1);
        assert_eq!(sent + failed, transport.requests().len() - 1);
        assert_eq!(
            log.entries(),
            vec![(
                GATEWAY_ERROR_TITLE.to_owned(),
                "ERR: 002, Unknown session".to_owned(),
                0
            )]
        );
    }

    #[tokio::test]
    async fn transport_failure_on_send_is_logged() {
        let transport = FakeTransport::new().reply("OK: abc123").fail("connection reset");
        let (notifier, log) = notifier(SETTINGS, &transport, vec![widget_order()]);

        let dispatch = notifier.notify_purchase(OrderId::new(42)).await;
        assert_eq!(dispatch, Dispatch::Delivered { sent: 0, failed: 1 });
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].1.contains("connection reset"));
    }

    #[tokio::test]
    async fn missing_credentials_skip_silently() {
        let transport = FakeTransport::new();
        let (notifier, log) = notifier(
            r#"
            two_way_number = "15550001111"
            phone_numbers = "15550109999"
            "#,
            &transport,
            vec![widget_order()],
        );

        let dispatch = notifier.notify_purchase(OrderId::new(42)).await;
        assert_eq!(dispatch, Dispatch::Skipped(SkipReason::MissingCredentials));
        assert!(transport.requests().is_empty());
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn missing_recipients_skip_silently() {
        let transport = FakeTransport::new();
        let (notifier, log) = notifier(
            r#"
            username = "shop"
            password = "secret"
            api_id = "3141592"
            "#,
            &transport,
            vec![widget_order()],
        );

        let dispatch = notifier.notify_purchase(OrderId::new(42)).await;
        assert_eq!(dispatch, Dispatch::Skipped(SkipReason::MissingRecipients));
        assert!(transport.requests().is_empty());
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn orders_without_items_or_unknown_ids_skip_silently() {
        let transport = FakeTransport::new();
        let empty = Order::new(OrderId::new(5), Money::ZERO);
        let (notifier, log) = notifier(SETTINGS, &transport, vec![empty]);

        assert_eq!(
            notifier.notify_purchase(OrderId::new(5)).await,
            Dispatch::Skipped(SkipReason::NoLineItems)
        );
        assert_eq!(
            notifier.notify_purchase(OrderId::new(6)).await,
            Dispatch::Skipped(SkipReason::OrderNotFound)
        );
        assert!(transport.requests().is_empty());
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn itemize_off_sends_only_the_total() {
        let transport = FakeTransport::new().reply("OK: abc123");
        let settings = SETTINGS.replace("itemize = true", "itemize = false");
        let (notifier, _log) = notifier(&settings, &transport, vec![widget_order()]);

        notifier.notify_purchase(OrderId::new(42)).await;
        let requests = transport.requests();
        assert_eq!(
            query_param(&requests[1], "text").as_deref(),
            Some("New Order @ Shop\nTOTAL - $8.50")
        );
    }

    #[tokio::test]
    async fn new_builds_client_from_settings() {
        let mut settings = Settings::from_toml_str(SETTINGS).unwrap();
        settings.api_base = Some("not a url".to_owned());
        let log = Arc::new(RecordingLog::default());
        let notifier = PurchaseNotifier::new(settings, FakeStore::with(vec![widget_order()]))
            .unwrap()
            .with_error_log(log.clone());

        let dispatch = notifier.notify_purchase(OrderId::new(42)).await;
        assert_eq!(dispatch, Dispatch::AuthFailed);
        assert!(log.entries()[0].1.starts_with("invalid endpoint"));
    }
}
