use std::sync::Arc;

use clickatell_connect::{
    LineItem, Money, Order, OrderId, PurchaseCompleted, PurchaseNotifier, Settings, Storefront,
};
use tracing_subscriber::EnvFilter;

/// Single hard-coded order so the demo runs without a store behind it.
struct DemoStore;

impl Storefront for DemoStore {
    fn site_name(&self) -> String {
        std::env::var("DEMO_SITE_NAME").unwrap_or_else(|_| "Demo Shop".to_owned())
    }

    fn order(&self, id: OrderId) -> Option<Order> {
        let items = vec![
            LineItem::new("Widget", Money::from_cents(500)),
            LineItem::new("Gadget", Money::from_cents(350)).with_price_option("Blue"),
        ];
        let total = items.iter().map(|item| item.price).sum();
        Some(Order::new(id, total).with_cart_details(items))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::var("CLICKATELL_CONFIG").unwrap_or_else(|_| "clickatell.toml".to_owned());
    let settings = Settings::load(&path)?;
    let notifier = PurchaseNotifier::new(settings, Arc::new(DemoStore))?;

    let dispatch = notifier
        .handle(&PurchaseCompleted {
            order_id: OrderId::new(1),
        })
        .await;
    println!("{dispatch:?}");

    Ok(())
}
