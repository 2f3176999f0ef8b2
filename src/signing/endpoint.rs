/// Marketplace code used when a region is missing or unknown
pub const DEFAULT_REGION: &str = "com";

/// Regional PA-API endpoint for a marketplace code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionEndpoint {
    /// Host serving the PA-API, e.g. `webservices.amazon.co.uk`
    pub host: &'static str,
    /// AWS region used in the credential scope
    pub signing_region: &'static str,
    /// Storefront domain sent as `Marketplace` and used for product links
    pub marketplace_domain: &'static str,
}

const fn endpoint(
    host: &'static str,
    signing_region: &'static str,
    marketplace_domain: &'static str,
) -> RegionEndpoint {
    RegionEndpoint {
        host,
        signing_region,
        marketplace_domain,
    }
}

const US: RegionEndpoint = endpoint("webservices.amazon.com", "us-east-1", "www.amazon.com");

static ENDPOINTS: &[(&str, RegionEndpoint)] = &[
    ("com", US),
    ("ca", endpoint("webservices.amazon.ca", "us-east-1", "www.amazon.ca")),
    ("com.br", endpoint("webservices.amazon.com.br", "us-east-1", "www.amazon.com.br")),
    ("com.mx", endpoint("webservices.amazon.com.mx", "us-east-1", "www.amazon.com.mx")),
    ("co.uk", endpoint("webservices.amazon.co.uk", "eu-west-1", "www.amazon.co.uk")),
    ("de", endpoint("webservices.amazon.de", "eu-west-1", "www.amazon.de")),
    ("fr", endpoint("webservices.amazon.fr", "eu-west-1", "www.amazon.fr")),
    ("it", endpoint("webservices.amazon.it", "eu-west-1", "www.amazon.it")),
    ("es", endpoint("webservices.amazon.es", "eu-west-1", "www.amazon.es")),
    ("nl", endpoint("webservices.amazon.nl", "eu-west-1", "www.amazon.nl")),
    ("pl", endpoint("webservices.amazon.pl", "eu-west-1", "www.amazon.pl")),
    ("se", endpoint("webservices.amazon.se", "eu-west-1", "www.amazon.se")),
    ("com.be", endpoint("webservices.amazon.com.be", "eu-west-1", "www.amazon.com.be")),
    ("com.tr", endpoint("webservices.amazon.com.tr", "eu-west-1", "www.amazon.com.tr")),
    ("ae", endpoint("webservices.amazon.ae", "eu-west-1", "www.amazon.ae")),
    ("sa", endpoint("webservices.amazon.sa", "eu-west-1", "www.amazon.sa")),
    ("eg", endpoint("webservices.amazon.eg", "eu-west-1", "www.amazon.eg")),
    ("in", endpoint("webservices.amazon.in", "ap-south-1", "www.amazon.in")),
    ("co.jp", endpoint("webservices.amazon.co.jp", "ap-northeast-1", "www.amazon.co.jp")),
    ("com.au", endpoint("webservices.amazon.com.au", "us-west-2", "www.amazon.com.au")),
    ("sg", endpoint("webservices.amazon.sg", "us-west-2", "www.amazon.sg")),
];

/// Look up a marketplace code, returning None when it is not in the table
pub fn lookup_endpoint(region: &str) -> Option<RegionEndpoint> {
    let region = region.trim();
    ENDPOINTS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(region))
        .map(|(_, endpoint)| *endpoint)
}

/// Resolve a marketplace code to its endpoint
///
/// Unknown codes fall back to the US marketplace. The fallback is logged so a
/// misconfigured region shows up in the relay logs instead of silently
/// querying the wrong storefront.
pub fn resolve_endpoint(region: &str) -> RegionEndpoint {
    lookup_endpoint(region).unwrap_or_else(|| {
        tracing::warn!(
            "Unknown Amazon region '{}', falling back to '{}'",
            region,
            DEFAULT_REGION
        );
        US
    })
}
