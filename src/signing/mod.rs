mod endpoint;
mod request;
pub mod signature;

pub use endpoint::{DEFAULT_REGION, RegionEndpoint, lookup_endpoint, resolve_endpoint};
pub use request::{SignedRequest, sign_request};
pub use signature::{
    ALGORITHM, AuthorizationInfo, CredentialScope, SERVICE, SigningKeyChain,
    build_authorization_header, build_canonical_request, build_string_to_sign,
    date_stamp, derive_signing_key, derive_signing_key_chain, format_amz_date, hash_payload,
    parse_authorization_header, sign, signed_header_names,
};
