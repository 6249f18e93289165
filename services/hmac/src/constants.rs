use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by the Duo signer.
pub const DUO_INTEGRATION_KEY: &str = "IKEY";
pub const DUO_SECRET_KEY: &str = "SKEY";
pub const DUO_API_HOST: &str = "HOST";
pub const DUO_SIGNATURE_VERSION: &str = "DUO_SIGNATURE_VERSION";

// Headers emitted by the Duo signer.
pub const X_DUO_DATE: &str = "x-duo-date";
pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Prefix of caller headers covered by the v5 signature.
pub const X_DUO_HEADER_PREFIX: &str = "x-duo-";

/// AsciiSet for Duo parameter encoding.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static DUO_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
