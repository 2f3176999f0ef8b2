use crate::signing::RegionEndpoint;
use crate::types::PaapiError;
use crate::variant::ApiVariant;
use serde::Serialize;

const PARTNER_TYPE: &str = "Associates";

/// JSON body of a GetItems call
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsRequest<'a> {
    pub item_ids: Vec<&'a str>,
    pub partner_tag: &'a str,
    pub partner_type: &'static str,
    pub marketplace: &'static str,
    pub resources: &'static [&'static str],
}

impl<'a> GetItemsRequest<'a> {
    pub fn new(
        asins: &[&'a str],
        partner_tag: &'a str,
        endpoint: &RegionEndpoint,
        variant: &ApiVariant,
    ) -> Self {
        Self {
            item_ids: asins.to_vec(),
            partner_tag,
            partner_type: PARTNER_TYPE,
            marketplace: endpoint.marketplace_domain,
            resources: variant.resources,
        }
    }

    /// Serialize once; the returned string is both hashed and sent
    pub fn to_body(&self) -> Result<String, PaapiError> {
        serde_json::to_string(self)
            .map_err(|e| PaapiError::Internal(format!("Failed to serialize payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::resolve_endpoint;

    #[test]
    fn test_body_field_order_and_values() {
        let endpoint = resolve_endpoint("de");
        let variant = ApiVariant::compact();
        let body = GetItemsRequest::new(&["B0EXAMPLE1"], "tag-21", &endpoint, &variant)
            .to_body()
            .unwrap();
        assert_eq!(
            body,
            r#"{"ItemIds":["B0EXAMPLE1"],"PartnerTag":"tag-21","PartnerType":"Associates","Marketplace":"www.amazon.de","Resources":["Images.Primary.Medium","ItemInfo.Title","Offers.Listings.Price","ItemInfo.Features"]}"#
        );
    }
}
