use serde::{Deserialize, Serialize};

/// Resources requested by the full GetItems variant
const GET_ITEMS_RESOURCES: &[&str] = &[
    "ItemInfo.Title",
    "ItemInfo.Features",
    "ItemInfo.ByLineInfo",
    "ItemInfo.ManufactureInfo",
    "ItemInfo.ProductInfo",
    "ItemInfo.TechnicalInfo",
    "Offers.Listings.Price",
    "Offers.Listings.SavingBasis",
    "Offers.Summaries.HighestPrice",
    "Offers.Summaries.LowestPrice",
    "Images.Primary.Large",
];

/// Resources requested by the compact variant
const COMPACT_RESOURCES: &[&str] = &[
    "Images.Primary.Medium",
    "ItemInfo.Title",
    "Offers.Listings.Price",
    "ItemInfo.Features",
];

/// Named presets selectable from the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantName {
    #[default]
    GetItems,
    Compact,
}

/// How a PA-API call is shaped: operation, path, target and resources
///
/// Both presets sign through the same code path; only this data differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVariant {
    pub operation: &'static str,
    pub path: &'static str,
    pub target_prefix: &'static str,
    pub content_encoding: Option<&'static str>,
    pub resources: &'static [&'static str],
}

impl ApiVariant {
    /// `/paapi5/getitems` with `ProductAdvertisingAPIv1` target and large images
    pub const fn get_items() -> Self {
        Self {
            operation: "GetItems",
            path: "/paapi5/getitems",
            target_prefix: "com.amazon.paapi5.v1.ProductAdvertisingAPIv1",
            content_encoding: Some("amz-1.0"),
            resources: GET_ITEMS_RESOURCES,
        }
    }

    /// `/paapi5` with the shorter target, medium images and fewer resources
    pub const fn compact() -> Self {
        Self {
            operation: "GetItems",
            path: "/paapi5",
            target_prefix: "com.amazon.paapi5.v1.ProductAdvertisingAPI",
            content_encoding: None,
            resources: COMPACT_RESOURCES,
        }
    }

    /// Value of the `X-Amz-Target` header
    pub fn target(&self) -> String {
        format!("{}.{}", self.target_prefix, self.operation)
    }
}

impl Default for ApiVariant {
    fn default() -> Self {
        Self::get_items()
    }
}

impl From<VariantName> for ApiVariant {
    fn from(name: VariantName) -> Self {
        match name {
            VariantName::GetItems => Self::get_items(),
            VariantName::Compact => Self::compact(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert_eq!(
            ApiVariant::get_items().target(),
            "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems"
        );
        assert_eq!(
            ApiVariant::compact().target(),
            "com.amazon.paapi5.v1.ProductAdvertisingAPI.GetItems"
        );
    }

    #[test]
    fn test_variant_name_from_config() {
        let name: VariantName = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(ApiVariant::from(name), ApiVariant::compact());
        assert_eq!(ApiVariant::from(VariantName::default()), ApiVariant::get_items());
    }
}
