//! Vendor response shapes and the mapping into [`Product`].
//!
//! Every vendor field is optional. A missing field leaves the matching
//! product field empty; it never fails the transform.

use crate::signing::RegionEndpoint;
use crate::types::{Product, ProductImage};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsResponse {
    pub items_result: Option<ItemsResult>,
    pub errors: Option<Vec<ApiErrorDetail>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    pub items: Option<Vec<Item>>,
}

/// Entry of the vendor `Errors` array
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "ASIN")]
    pub asin: Option<String>,
    pub item_info: Option<ItemInfo>,
    pub offers: Option<Offers>,
    pub images: Option<Images>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemInfo {
    pub title: Option<DisplayValue>,
    pub by_line_info: Option<ByLineInfo>,
    pub features: Option<DisplayValues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayValue {
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayValues {
    pub display_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByLineInfo {
    pub brand: Option<DisplayValue>,
    pub manufacturer: Option<DisplayValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Offers {
    pub listings: Option<Vec<Listing>>,
    pub summaries: Option<Vec<Summary>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listing {
    pub price: Option<Price>,
    pub saving_basis: Option<Price>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Summary {
    pub lowest_price: Option<Price>,
    pub highest_price: Option<Price>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Price {
    pub display_amount: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Images {
    pub primary: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSet {
    pub large: Option<ImageInfo>,
    pub medium: Option<ImageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageInfo {
    #[serde(rename = "URL")]
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl GetItemsResponse {
    pub fn items(&self) -> &[Item] {
        self.items_result
            .as_ref()
            .and_then(|r| r.items.as_deref())
            .unwrap_or_default()
    }

    /// Vendor error messages joined for display
    pub fn error_summary(&self) -> Option<String> {
        let errors = self.errors.as_ref().filter(|e| !e.is_empty())?;
        Some(
            errors
                .iter()
                .map(|e| {
                    format!(
                        "{}: {}",
                        e.code.as_deref().unwrap_or("Error"),
                        e.message.as_deref().unwrap_or("")
                    )
                })
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

fn display(value: Option<&DisplayValue>) -> Option<String> {
    value.and_then(|v| v.display_value.clone())
}

fn amount(price: Option<&Price>) -> Option<String> {
    price.and_then(|p| p.display_amount.clone())
}

/// Map a vendor item into a [`Product`]
///
/// `url` is always synthesized from the marketplace domain and the ASIN.
pub fn transform_product(item: &Item, asin: &str, endpoint: &RegionEndpoint) -> Product {
    let info = item.item_info.as_ref();
    let by_line = info.and_then(|i| i.by_line_info.as_ref());

    let offers = item.offers.as_ref();
    let listing = offers
        .and_then(|o| o.listings.as_ref())
        .and_then(|l| l.first());
    let summary = offers
        .and_then(|o| o.summaries.as_ref())
        .and_then(|s| s.first());

    let listing_price = listing.and_then(|l| l.price.as_ref());
    let lowest_price = summary.and_then(|s| s.lowest_price.as_ref());

    let price = amount(listing_price).or_else(|| amount(lowest_price));
    let currency = listing_price
        .and_then(|p| p.currency.clone())
        .or_else(|| lowest_price.and_then(|p| p.currency.clone()));

    // Sale/list prices only exist when the listing carries a saving basis.
    let saving_basis = amount(listing.and_then(|l| l.saving_basis.as_ref()));
    let (sale_price, list_price) = match saving_basis {
        Some(basis) => (amount(listing_price), Some(basis)),
        None => (None, None),
    };

    let primary = item.images.as_ref().and_then(|i| i.primary.as_ref());
    let images = primary
        .and_then(|p| p.large.as_ref().or(p.medium.as_ref()))
        .and_then(|image| {
            image.url.clone().map(|url| ProductImage {
                url,
                width: image.width,
                height: image.height,
            })
        })
        .into_iter()
        .collect();

    Product {
        asin: asin.to_string(),
        title: display(info.and_then(|i| i.title.as_ref())),
        brand: display(by_line.and_then(|b| b.brand.as_ref()))
            .or_else(|| display(by_line.and_then(|b| b.manufacturer.as_ref()))),
        url: format!("https://{}/dp/{}", endpoint.marketplace_domain, asin),
        currency,
        price,
        sale_price,
        list_price,
        features: info
            .and_then(|i| i.features.as_ref())
            .and_then(|f| f.display_values.clone())
            .unwrap_or_default(),
        images,
        last_synced_at: None,
    }
}
