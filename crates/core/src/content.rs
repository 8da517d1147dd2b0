//! Content snapshot models as supplied by the content API.
//!
//! A snapshot is a read-only view of a creator's links, products,
//! collections and shop settings at resolution time. Missing arrays read as
//! empty and missing shop settings read as a hidden, non-primary shop.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::EntityId;

/// Maximum links accepted in one snapshot.
pub const MAX_LINKS: usize = 500;

/// Maximum products accepted in one snapshot.
pub const MAX_PRODUCTS: usize = 2000;

/// Maximum collections accepted in one snapshot.
pub const MAX_COLLECTIONS: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub shop_settings: ShopSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShopSettings {
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_main_tab: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Link {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    #[ts(type = "number")]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<EntityId>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Collection {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<EntityId>,
    #[serde(default)]
    pub is_active: bool,
}

impl Product {
    /// The product image, if it is non-blank.
    pub fn image_url(&self) -> Option<&str> {
        non_blank(Some(self.image.as_str()))
    }

    /// The owning collection id, if it is non-blank.
    pub fn collection_ref(&self) -> Option<&str> {
        non_blank(self.collection_id.as_deref())
    }
}

impl Collection {
    /// The explicit cover image, if it is non-blank.
    pub fn image_url(&self) -> Option<&str> {
        non_blank(self.image.as_deref())
    }
}

impl Link {
    pub fn image_url(&self) -> Option<&str> {
        non_blank(self.image.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

impl ContentSnapshot {
    /// What a visitor sees: active items only, links sorted by `order`.
    ///
    /// The sort is stable, so links sharing an order keep their API order.
    pub fn public_view(&self) -> ContentSnapshot {
        let mut links: Vec<Link> = self.links.iter().filter(|l| l.is_active).cloned().collect();
        links.sort_by_key(|l| l.order);

        ContentSnapshot {
            links,
            products: self.products.iter().filter(|p| p.is_active).cloned().collect(),
            collections: self
                .collections
                .iter()
                .filter(|c| c.is_active)
                .cloned()
                .collect(),
            shop_settings: self.shop_settings.clone(),
        }
    }

    /// Whether the shop has anything to show, ignoring visibility.
    pub fn has_shop_content(&self) -> bool {
        !self.products.is_empty() || !self.collections.is_empty()
    }
}

/// Reject snapshots larger than any real profile, before resolving them.
///
/// The resolvers themselves accept any size; this guards the render service.
pub fn validate_snapshot_limits(snapshot: &ContentSnapshot) -> Result<(), CoreError> {
    let checks = [
        ("links", snapshot.links.len(), MAX_LINKS),
        ("products", snapshot.products.len(), MAX_PRODUCTS),
        ("collections", snapshot.collections.len(), MAX_COLLECTIONS),
    ];
    for (name, count, max) in checks {
        if count > max {
            return Err(CoreError::Validation(format!(
                "Snapshot contains {count} {name}, maximum is {max}"
            )));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Price formatting
-------------------------------------------------------------------------- */

/// Currency assumed when a product has a price but no currency.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Format a product price for display.
///
/// Known currencies get their symbol (`$12.50`, `€3.00`, `¥1200`); anything
/// else renders as `"<amount> <CODE>"`. Returns `None` without a usable price.
pub fn format_price(price: Option<f64>, currency: Option<&str>) -> Option<String> {
    let amount = price.filter(|p| p.is_finite())?;
    let code = non_blank(currency)
        .unwrap_or(DEFAULT_CURRENCY)
        .to_ascii_uppercase();

    let formatted = match code.as_str() {
        "USD" => format!("${amount:.2}"),
        "EUR" => format!("€{amount:.2}"),
        "GBP" => format!("£{amount:.2}"),
        "JPY" => format!("¥{amount:.0}"),
        other => format!("{amount:.2} {other}"),
    };
    Some(formatted)
}
