use crate::domain::money::Money;
use crate::domain::value::OrderId;

/// One purchased product as it should appear in a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub title: String,
    /// Label of the selected price variant, if the product has variable pricing.
    pub price_option: Option<String>,
    pub price: Money,
}

impl LineItem {
    pub fn new(title: impl Into<String>, price: Money) -> Self {
        Self {
            title: title.into(),
            price_option: None,
            price,
        }
    }

    pub fn with_price_option(mut self, label: impl Into<String>) -> Self {
        self.price_option = Some(label.into());
        self
    }
}

/// A completed order as read from the store.
///
/// `cart_details` is the detailed cart; `downloads` is the simpler product list the
/// store keeps alongside it and is only used when the cart details are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub cart_details: Vec<LineItem>,
    pub downloads: Vec<LineItem>,
    pub total: Money,
}

impl Order {
    pub fn new(id: OrderId, total: Money) -> Self {
        Self {
            id,
            cart_details: Vec::new(),
            downloads: Vec::new(),
            total,
        }
    }

    pub fn with_cart_details(mut self, items: Vec<LineItem>) -> Self {
        self.cart_details = items;
        self
    }

    pub fn with_downloads(mut self, items: Vec<LineItem>) -> Self {
        self.downloads = items;
        self
    }

    /// Items to list in the notification: cart details, else the download list.
    pub fn line_items(&self) -> &[LineItem] {
        if self.cart_details.is_empty() {
            &self.downloads
        } else {
            &self.cart_details
        }
    }
}
