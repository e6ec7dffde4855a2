//! SMS purchase notifications for online stores over the Clickatell HTTP API.
//!
//! The crate has a domain layer of strong types (credentials, orders, message text and
//! its segmentation), a transport layer for the gateway's `OK:`/`ERR:` wire format, a
//! small client issuing the `auth` and `sendmsg` calls, and a [`PurchaseNotifier`]
//! tying them to the store.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use clickatell_connect::{
//!     LineItem, Money, Order, OrderId, PurchaseCompleted, PurchaseNotifier, Settings, Storefront,
//! };
//!
//! struct Store;
//!
//! impl Storefront for Store {
//!     fn site_name(&self) -> String {
//!         "Shop".to_owned()
//!     }
//!
//!     fn order(&self, id: OrderId) -> Option<Order> {
//!         let items = vec![LineItem::new("Widget", Money::from_cents(500))];
//!         Some(Order::new(id, Money::from_cents(500)).with_cart_details(items))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load("clickatell.toml")?;
//!     let notifier = PurchaseNotifier::new(settings, Arc::new(Store))?;
//!     let event = PurchaseCompleted { order_id: OrderId::new(42) };
//!     let _dispatch = notifier.handle(&event).await;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod notifier;
mod transport;

pub use client::{ClickatellClient, ClickatellClientBuilder, ClickatellError};
pub use config::{ConfigError, CurrencySettings, Settings};
pub use domain::{
    ApiId, Credentials, Currency, CurrencyPosition, LineItem, MessageText, Money, Order, OrderId,
    OutboundMessage, Password, RecipientList, SendReceipt, SenderNumber, SessionToken, Username,
    ValidationError,
};
pub use notifier::{
    Dispatch, GATEWAY_ERROR_TITLE, GatewayErrorLog, PurchaseCompleted, PurchaseNotifier,
    SkipReason, Storefront, TracingErrorLog,
};
