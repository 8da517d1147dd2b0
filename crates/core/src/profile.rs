//! Render-ready profile view model.
//!
//! [`build_profile_view`] is the single entry point shared by the dashboard
//! preview, the legacy public page and the SSR page: raw theme plus the
//! content fetch outcome in, plain data out. It runs the normalizer, the
//! style resolver, tab selection and the collection resolvers, and derives
//! the loading / error / empty presentation state.

use serde::Serialize;
use ts_rs::TS;

use crate::analytics::{self, LinkEventMetadata};
use crate::collections::{self, CollectionVisual, CompositeGrid};
use crate::content::{format_price, Collection, ContentSnapshot, Link, Product};
use crate::style::{self, ResolvedStyle, Viewport};
use crate::tabs::{self, ContentTab};
use crate::theme::{self, RawThemeConfig, ThemeConfig};
use crate::video::{self, VideoInfo};

/// Message shown on the links tab when there are no active links.
pub const LINKS_EMPTY_MESSAGE: &str = "No links yet";

/// Message shown on a visible shop tab with nothing in it.
pub const SHOP_EMPTY_MESSAGE: &str = "No products yet";

/// Per-render context supplied by the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub viewport: Viewport,
    /// Tab the visitor explicitly switched to, if any.
    pub requested_tab: Option<ContentTab>,
}

/// Outcome of the host's content fetch.
#[derive(Debug, Clone)]
pub enum ContentLoad {
    Loading,
    Failed { message: String },
    Loaded(ContentSnapshot),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[ts(export)]
pub enum PresentationState {
    Loading,
    Error { message: String },
    /// Loaded, but neither tab has anything to show.
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LinkCard {
    pub id: String,
    pub title: String,
    pub url: String,
    /// The link's own image, else the video thumbnail when one is derivable.
    pub thumbnail_url: Option<String>,
    pub video: VideoInfo,
    pub analytics: LinkEventMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub price_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CollectionCard {
    pub id: String,
    pub title: String,
    pub visual: CollectionVisual,
    pub grid: Option<CompositeGrid>,
    pub expanded: bool,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShopHeader {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileView {
    pub theme: ThemeConfig,
    pub style: ResolvedStyle,
    pub state: PresentationState,
    pub default_tab: ContentTab,
    /// The tab to display now: the visitor's choice while it stays valid,
    /// else `default_tab`.
    pub active_tab: ContentTab,
    pub show_tab_switcher: bool,
    pub show_branding: bool,
    pub shop: Option<ShopHeader>,
    pub links: Vec<LinkCard>,
    pub collections: Vec<CollectionCard>,
    pub products: Vec<ProductCard>,
    pub links_empty_message: Option<String>,
    pub shop_empty_message: Option<String>,
}

/// Build the full view model for one render.
pub fn build_profile_view(
    raw_theme: &RawThemeConfig,
    load: &ContentLoad,
    context: &RenderContext,
) -> ProfileView {
    let theme = theme::normalize(raw_theme);
    let style = style::resolve_style_for_viewport(&theme, context.viewport);

    let snapshot = match load {
        ContentLoad::Loading => {
            return pending_view(theme, style, PresentationState::Loading);
        }
        ContentLoad::Failed { message } => {
            let state = PresentationState::Error {
                message: message.clone(),
            };
            return pending_view(theme, style, state);
        }
        ContentLoad::Loaded(snapshot) => snapshot.public_view(),
    };

    let settings = &snapshot.shop_settings;
    let default_tab = tabs::select_default_tab(settings, &snapshot.products, &snapshot.collections);
    let show_tab_switcher = tabs::should_show_tab_switcher(
        &snapshot.links,
        &snapshot.products,
        &snapshot.collections,
        settings,
    );
    let active_tab = tabs::resolve_active_tab(
        context.requested_tab,
        &snapshot.links,
        &snapshot.products,
        &snapshot.collections,
        settings,
    );

    let links_available = !snapshot.links.is_empty();
    let shop_available = settings.is_visible && snapshot.has_shop_content();

    let state = if links_available || shop_available {
        PresentationState::Ready
    } else {
        PresentationState::Empty
    };

    let shop = settings.is_visible.then(|| ShopHeader {
        title: settings.title.clone(),
        description: settings.description.clone(),
    });

    let collections = snapshot
        .collections
        .iter()
        .map(|c| collection_card(c, &snapshot.products))
        .collect();

    let products = collections::standalone_products(&snapshot.products, &snapshot.collections)
        .into_iter()
        .map(product_card)
        .collect();

    ProfileView {
        show_branding: !theme.hide_branding,
        theme,
        style,
        state,
        default_tab,
        active_tab,
        show_tab_switcher,
        shop,
        links: snapshot.links.iter().map(link_card).collect(),
        collections,
        products,
        links_empty_message: (!links_available).then(|| LINKS_EMPTY_MESSAGE.to_string()),
        shop_empty_message: (settings.is_visible && !snapshot.has_shop_content())
            .then(|| SHOP_EMPTY_MESSAGE.to_string()),
    }
}

/// View for a fetch that has not produced content: theme only, no tabs.
fn pending_view(theme: ThemeConfig, style: ResolvedStyle, state: PresentationState) -> ProfileView {
    ProfileView {
        show_branding: !theme.hide_branding,
        theme,
        style,
        state,
        default_tab: ContentTab::Links,
        active_tab: ContentTab::Links,
        show_tab_switcher: false,
        shop: None,
        links: Vec::new(),
        collections: Vec::new(),
        products: Vec::new(),
        links_empty_message: None,
        shop_empty_message: None,
    }
}

fn link_card(link: &Link) -> LinkCard {
    let video = video::classify(&link.url);
    let thumbnail_url = link
        .image_url()
        .map(str::to_string)
        .or_else(|| video.thumbnail_url.clone());

    LinkCard {
        id: link.id.clone(),
        title: link.title.clone(),
        url: link.url.clone(),
        thumbnail_url,
        analytics: analytics::metadata_from_video(&link.id, &video),
        video,
    }
}

fn product_card(product: &Product) -> ProductCard {
    ProductCard {
        id: product.id.clone(),
        title: product.title.clone(),
        image: product.image_url().map(str::to_string),
        price_label: format_price(product.price, product.currency.as_deref()),
    }
}

fn collection_card(collection: &Collection, products: &[Product]) -> CollectionCard {
    let visual = collections::resolve_collection_visual(collection, products);
    CollectionCard {
        id: collection.id.clone(),
        title: collection.title.clone(),
        grid: visual.grid(),
        visual,
        expanded: collections::initial_expansion_state(collection, products),
        products: collections::card_products(collection, products)
            .into_iter()
            .map(product_card)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ShopSettings;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn link(id: &str, url: &str, order: i64, active: bool) -> Link {
        Link {
            id: id.into(),
            title: id.to_uppercase(),
            url: url.into(),
            is_active: active,
            order,
            image: None,
        }
    }

    fn product(id: &str, image: &str, collection_id: Option<&str>) -> Product {
        Product {
            id: id.into(),
            title: id.into(),
            image: image.into(),
            price: Some(10.0),
            currency: Some("USD".into()),
            collection_id: collection_id.map(str::to_string),
            is_active: true,
        }
    }

    fn storefront() -> ContentSnapshot {
        ContentSnapshot {
            links: vec![
                link("b", "https://youtu.be/dQw4w9WgXcQ", 2, true),
                link("a", "https://example.com", 1, true),
                link("hidden", "https://example.com/old", 0, false),
            ],
            products: vec![
                product("p1", "one.jpg", Some("c1")),
                product("p2", "", None),
            ],
            collections: vec![Collection {
                id: "c1".into(),
                title: "Favourites".into(),
                image: None,
                product_ids: vec!["p1".into()],
                is_active: true,
            }],
            shop_settings: ShopSettings {
                is_visible: true,
                is_main_tab: true,
                title: "Shop".into(),
                description: "Things I use".into(),
            },
        }
    }

    fn view(load: ContentLoad) -> ProfileView {
        build_profile_view(&RawThemeConfig::default(), &load, &RenderContext::default())
    }

    #[test]
    fn loading_view_keeps_theme_and_hides_tabs() {
        let v = view(ContentLoad::Loading);
        assert_eq!(v.state, PresentationState::Loading);
        assert_eq!(v.theme, ThemeConfig::default());
        assert!(!v.show_tab_switcher);
        assert!(v.links.is_empty());
        assert!(v.links_empty_message.is_none());
    }

    #[test]
    fn failed_fetch_surfaces_error_state() {
        let v = view(ContentLoad::Failed {
            message: "upstream timeout".into(),
        });
        assert_matches!(v.state, PresentationState::Error { ref message } if message == "upstream timeout");
    }

    #[test]
    fn ready_storefront() {
        let v = view(ContentLoad::Loaded(storefront()));
        assert_eq!(v.state, PresentationState::Ready);
        assert_eq!(v.default_tab, ContentTab::Shop);
        assert!(v.show_tab_switcher);
        assert!(v.show_branding);

        let ids: Vec<_> = v.links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);

        let video_card = &v.links[1];
        assert!(video_card.video.is_video);
        assert!(video_card.analytics.is_video);
        assert_eq!(
            video_card.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg")
        );

        let card = &v.collections[0];
        assert!(card.expanded);
        assert_eq!(card.grid, Some(CompositeGrid::Single));
        assert_eq!(card.products[0].price_label.as_deref(), Some("$10.00"));

        assert_eq!(v.products.len(), 1);
        assert_eq!(v.products[0].id, "p2");
        assert!(v.products[0].image.is_none());
        assert_eq!(v.shop.as_ref().map(|s| s.title.as_str()), Some("Shop"));
    }

    #[test]
    fn asymmetric_membership_shows_each_product_once() {
        let mut snapshot = storefront();
        snapshot.products = vec![product("p1", "one.jpg", Some("c1")), product("p2", "two.jpg", None)];
        snapshot.collections[0].product_ids = vec!["p2".into()];

        let v = view(ContentLoad::Loaded(snapshot));
        let on_card: Vec<_> = v.collections[0].products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(on_card, ["p1", "p2"]);
        assert!(v.products.is_empty());
    }

    #[test]
    fn empty_profile() {
        let v = view(ContentLoad::Loaded(ContentSnapshot::default()));
        assert_eq!(v.state, PresentationState::Empty);
        assert_eq!(v.default_tab, ContentTab::Links);
        assert_eq!(v.links_empty_message.as_deref(), Some(LINKS_EMPTY_MESSAGE));
        assert!(v.shop_empty_message.is_none());
    }

    #[test]
    fn visible_empty_shop_gets_message() {
        let mut snapshot = storefront();
        snapshot.products.clear();
        snapshot.collections.clear();
        let v = view(ContentLoad::Loaded(snapshot));
        assert_eq!(v.state, PresentationState::Ready);
        assert_eq!(v.default_tab, ContentTab::Links);
        assert!(!v.show_tab_switcher);
        assert_eq!(v.shop_empty_message.as_deref(), Some(SHOP_EMPTY_MESSAGE));
    }

    #[test]
    fn inactive_collection_is_not_counted_for_shop_tab() {
        let mut snapshot = storefront();
        snapshot.products.clear();
        snapshot.collections[0].is_active = false;
        let v = view(ContentLoad::Loaded(snapshot));
        assert_eq!(v.default_tab, ContentTab::Links);
        assert!(v.collections.is_empty());
    }

    #[test]
    fn theme_flows_into_style_and_branding() {
        let raw: RawThemeConfig = serde_json::from_value(json!({
            "hideBranding": true,
            "maxWidth": "large",
            "buttonStyle": "pill",
        }))
        .unwrap();
        let v = build_profile_view(
            &raw,
            &ContentLoad::Loaded(storefront()),
            &RenderContext {
                viewport: Viewport { width_px: Some(390) },
                requested_tab: None,
            },
        );
        assert!(!v.show_branding);
        assert_eq!(v.style.container_style.max_width_px, 390);
        assert_eq!(v.style.link_card_radius, style::CssLength::Px(50));
    }

    #[test]
    fn view_serializes_for_front_ends() {
        let v = view(ContentLoad::Loaded(storefront()));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["state"]["kind"], "ready");
        assert_eq!(json["defaultTab"], "shop");
        assert_eq!(json["collections"][0]["visual"]["kind"], "composite");
        assert_eq!(json["links"][1]["video"]["platform"], "youtube");
    }

    #[test]
    fn requested_tab_is_honoured_only_while_valid() {
        let context = RenderContext {
            viewport: Viewport::default(),
            requested_tab: Some(ContentTab::Links),
        };
        let v = build_profile_view(&RawThemeConfig::default(), &ContentLoad::Loaded(storefront()), &context);
        assert_eq!(v.default_tab, ContentTab::Shop);
        assert_eq!(v.active_tab, ContentTab::Links);

        let mut emptied = storefront();
        emptied.products.clear();
        emptied.collections.clear();
        let shop_context = RenderContext {
            requested_tab: Some(ContentTab::Shop),
            ..context
        };
        let v = build_profile_view(&RawThemeConfig::default(), &ContentLoad::Loaded(emptied), &shop_context);
        assert_eq!(v.active_tab, ContentTab::Links);
    }
}
