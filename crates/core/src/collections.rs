//! Collection visuals and membership.
//!
//! A collection has two membership directions that are not kept in sync by
//! the content API: `collection.productIds` and `product.collectionId`.
//! Visuals and expansion resolve membership through `productIds`. What a
//! card lists is reconciled by id across both directions, and a product is
//! standalone only when no card lists it, so every product appears exactly
//! once on the shop tab.

use serde::Serialize;
use ts_rs::TS;

use crate::content::{Collection, Product};

/// Maximum number of member photos in a composite thumbnail.
pub const MAX_COMPOSITE_IMAGES: usize = 4;

/// What to render as a collection's visual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[ts(export)]
pub enum CollectionVisual {
    /// The collection's own cover image.
    ExplicitImage { url: String },
    /// A 1-4 cell grid of member product photos.
    Composite { images: Vec<String> },
    /// No usable image; render the generic icon.
    Placeholder,
}

/// Cell arrangement for a composite thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CompositeGrid {
    /// One photo filling the tile.
    Single,
    /// Two photos side by side.
    Split,
    /// One large photo with two stacked beside it.
    Feature,
    /// Two by two.
    Quad,
}

impl CollectionVisual {
    /// Grid arrangement for a composite, `None` for the other kinds.
    pub fn grid(&self) -> Option<CompositeGrid> {
        match self {
            CollectionVisual::Composite { images } => match images.len() {
                0 => None,
                1 => Some(CompositeGrid::Single),
                2 => Some(CompositeGrid::Split),
                3 => Some(CompositeGrid::Feature),
                _ => Some(CompositeGrid::Quad),
            },
            _ => None,
        }
    }
}

/// Products listed in `collection.productIds`, in the order of `products`.
///
/// Ids in `productIds` with no matching product are ignored.
pub fn member_products<'a>(collection: &Collection, products: &'a [Product]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| collection.product_ids.iter().any(|id| *id == p.id))
        .collect()
}

/// Whether `product` belongs to `collection` through either direction.
fn belongs_to(collection: &Collection, product: &Product) -> bool {
    collection.product_ids.iter().any(|id| *id == product.id)
        || product.collection_ref() == Some(collection.id.as_str())
}

/// Products a collection card lists, in the order of `products`.
///
/// Union of `productIds` members and products whose `collectionId` points
/// at the collection.
pub fn card_products<'a>(collection: &Collection, products: &'a [Product]) -> Vec<&'a Product> {
    products.iter().filter(|p| belongs_to(collection, p)).collect()
}

/// Decide a collection's visual: explicit cover, member composite, or icon.
pub fn resolve_collection_visual(collection: &Collection, products: &[Product]) -> CollectionVisual {
    if let Some(url) = collection.image_url() {
        return CollectionVisual::ExplicitImage {
            url: url.to_string(),
        };
    }

    let images: Vec<String> = member_products(collection, products)
        .into_iter()
        .filter_map(Product::image_url)
        .take(MAX_COMPOSITE_IMAGES)
        .map(str::to_string)
        .collect();

    if images.is_empty() {
        CollectionVisual::Placeholder
    } else {
        CollectionVisual::Composite { images }
    }
}

/// Whether a collection card starts expanded.
///
/// Expanded iff the collection has exactly 1 or exactly 3 members. This is a
/// deliberate layout policy carried over from the shipped product, not a
/// "small collections" threshold: 2 and 4 stay collapsed.
pub fn initial_expansion_state(collection: &Collection, products: &[Product]) -> bool {
    matches!(member_products(collection, products).len(), 1 | 3)
}

/// Ids in `collection.productIds` that match no product.
pub fn orphaned_product_ids<'a>(collection: &'a Collection, products: &[Product]) -> Vec<&'a str> {
    collection
        .product_ids
        .iter()
        .filter(|id| !products.iter().any(|p| p.id == **id))
        .map(String::as_str)
        .collect()
}

/// Products listed outside any collection card.
///
/// A product is standalone when no collection in `collections` lists it:
/// its `collectionId` is unset or names a missing collection, and no
/// present collection carries its id in `productIds`.
pub fn standalone_products<'a>(products: &'a [Product], collections: &[Collection]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| !collections.iter().any(|c| belongs_to(c, p)))
        .collect()
}

/// Products whose `collectionId` points at `collection_id`.
pub fn products_by_collection_id<'a>(products: &'a [Product], collection_id: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.collection_ref() == Some(collection_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn product(id: &str, image: &str) -> Product {
        Product {
            id: id.to_string(),
            title: id.to_string(),
            image: image.to_string(),
            price: None,
            currency: None,
            collection_id: None,
            is_active: true,
        }
    }

    fn collection(image: Option<&str>, ids: &[&str]) -> Collection {
        Collection {
            id: "col".to_string(),
            title: "Picks".to_string(),
            image: image.map(str::to_string),
            product_ids: ids.iter().map(|s| s.to_string()).collect(),
            is_active: true,
        }
    }

    fn five_products() -> Vec<Product> {
        vec![
            product("p1", "A"),
            product("p2", ""),
            product("p3", "B"),
            product("p4", "C"),
            product("p5", "D"),
        ]
    }

    #[test]
    fn explicit_image_always_wins() {
        let products = five_products();
        let c = collection(Some("cover.jpg"), &["p1", "p3"]);
        assert_eq!(
            resolve_collection_visual(&c, &products),
            CollectionVisual::ExplicitImage {
                url: "cover.jpg".to_string()
            }
        );
    }

    #[test]
    fn composite_skips_missing_images_and_caps_at_four() {
        let products = five_products();
        let c = collection(None, &["p1", "p2", "p3", "p4", "p5"]);
        let visual = resolve_collection_visual(&c, &products);
        assert_eq!(
            visual,
            CollectionVisual::Composite {
                images: vec!["A".into(), "B".into(), "C".into(), "D".into()]
            }
        );
        assert_eq!(visual.grid(), Some(CompositeGrid::Quad));
    }

    #[test]
    fn composite_follows_product_order_not_id_order() {
        let products = five_products();
        let c = collection(None, &["p4", "p1"]);
        assert_matches!(
            resolve_collection_visual(&c, &products),
            CollectionVisual::Composite { images } if images == ["A", "C"]
        );
    }

    #[test]
    fn blank_cover_falls_through_to_composite() {
        let products = five_products();
        let c = collection(Some(""), &["p3"]);
        let visual = resolve_collection_visual(&c, &products);
        assert_eq!(visual.grid(), Some(CompositeGrid::Single));
    }

    #[test]
    fn placeholder_without_any_image() {
        let products = five_products();
        assert_eq!(
            resolve_collection_visual(&collection(None, &["p2"]), &products),
            CollectionVisual::Placeholder
        );
        assert_eq!(
            resolve_collection_visual(&collection(None, &[]), &products),
            CollectionVisual::Placeholder
        );
        assert_eq!(CollectionVisual::Placeholder.grid(), None);
    }

    #[test]
    fn orphaned_ids_are_ignored() {
        let products = five_products();
        let c = collection(None, &["ghost", "p3"]);
        assert_eq!(member_products(&c, &products).len(), 1);
        assert_eq!(orphaned_product_ids(&c, &products), ["ghost"]);
    }

    #[test]
    fn expansion_is_one_or_three() {
        let products = five_products();
        let ids = ["p1", "p2", "p3", "p4"];
        for (count, expected) in [(0, false), (1, true), (2, false), (3, true), (4, false)] {
            assert_eq!(
                initial_expansion_state(&collection(None, &ids[..count]), &products),
                expected,
                "member count {count}"
            );
        }
    }

    #[test]
    fn expansion_counts_only_resolvable_members() {
        let products = five_products();
        let c = collection(None, &["p1", "ghost-1", "ghost-2"]);
        assert!(initial_expansion_state(&c, &products));
    }

    #[test]
    fn product_side_membership_is_independent() {
        let mut products = five_products();
        products[0].collection_id = Some("col".to_string());
        products[1].collection_id = Some(" ".to_string());

        let c = collection(None, &["p3"]);
        let by_product: Vec<_> = products_by_collection_id(&products, &c.id)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(by_product, ["p1"]);

        let standalone: Vec<_> = standalone_products(&products, std::slice::from_ref(&c))
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(standalone, ["p2", "p4", "p5"]);
    }

    #[test]
    fn card_lists_both_membership_directions_once() {
        let mut products = five_products();
        products[0].collection_id = Some("col".to_string());
        products[2].collection_id = Some("col".to_string());

        let c = collection(None, &["p3", "p4"]);
        let listed: Vec<_> = card_products(&c, &products)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(listed, ["p1", "p3", "p4"]);
    }

    #[test]
    fn product_pointing_at_missing_collection_is_standalone() {
        let mut products = five_products();
        products[0].collection_id = Some("deleted".to_string());
        let c = collection(None, &[]);
        let standalone = standalone_products(&products, std::slice::from_ref(&c));
        assert_eq!(standalone.len(), 5);
    }

    #[test]
    fn visual_serializes_with_kind_tag() {
        let json = serde_json::to_value(CollectionVisual::Composite {
            images: vec!["A".into()],
        })
        .unwrap();
        assert_eq!(json["kind"], "composite");
        let json = serde_json::to_value(CollectionVisual::ExplicitImage { url: "u".into() }).unwrap();
        assert_eq!(json["kind"], "explicit-image");
    }
}
