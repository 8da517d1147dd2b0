//! Links/shop tab selection.
//!
//! Callers pass the content a visitor would actually see (see
//! [`ContentSnapshot::public_view`](crate::content::ContentSnapshot::public_view))
//! and re-run these on every content or settings change, so a tab never
//! stays on a shop that has since been emptied or hidden.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::content::{Collection, Link, Product, ShopSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ContentTab {
    Links,
    Shop,
}

fn shop_has_content(products: &[Product], collections: &[Collection]) -> bool {
    !products.is_empty() || !collections.is_empty()
}

/// The tab a visitor lands on.
///
/// `Shop` only when the shop is visible, marked as the main tab, and has at
/// least one product or collection.
pub fn select_default_tab(
    shop_settings: &ShopSettings,
    products: &[Product],
    collections: &[Collection],
) -> ContentTab {
    if shop_settings.is_main_tab
        && shop_settings.is_visible
        && shop_has_content(products, collections)
    {
        ContentTab::Shop
    } else {
        ContentTab::Links
    }
}

/// Whether the links/shop switcher renders at all.
///
/// Both sides need content: at least one active link, and a visible shop
/// with at least one product or collection.
pub fn should_show_tab_switcher(
    links: &[Link],
    products: &[Product],
    collections: &[Collection],
    shop_settings: &ShopSettings,
) -> bool {
    links.iter().any(|l| l.is_active)
        && shop_settings.is_visible
        && shop_has_content(products, collections)
}

/// Whether a tab currently has anything to show.
pub fn tab_available(
    tab: ContentTab,
    links: &[Link],
    products: &[Product],
    collections: &[Collection],
    shop_settings: &ShopSettings,
) -> bool {
    match tab {
        ContentTab::Links => links.iter().any(|l| l.is_active),
        ContentTab::Shop => shop_settings.is_visible && shop_has_content(products, collections),
    }
}

/// The tab to display given an optional explicit choice by the visitor.
///
/// A requested tab is honoured only while it is still available and the
/// switcher is showing; otherwise the freshly computed default applies.
pub fn resolve_active_tab(
    requested: Option<ContentTab>,
    links: &[Link],
    products: &[Product],
    collections: &[Collection],
    shop_settings: &ShopSettings,
) -> ContentTab {
    let default = select_default_tab(shop_settings, products, collections);
    match requested {
        Some(tab)
            if should_show_tab_switcher(links, products, collections, shop_settings)
                && tab_available(tab, links, products, collections, shop_settings) =>
        {
            tab
        }
        _ => default,
    }
}
