//! Canonical string construction for Duo request signing.
//!
//! Everything in this module is pure: the same input always produces the
//! same bytes, which is what makes signatures reproducible on the server.

use std::collections::BTreeMap;

use duosign_core::hash::hex_sha512;
use http::Method;
use percent_encoding::utf8_percent_encode;

use crate::constants::*;

/// Percent-encode a parameter key or value.
///
/// Only the RFC 3986 unreserved characters are kept as is, so space becomes
/// `%20` and never `+`.
pub fn encode(s: &str) -> String {
    utf8_percent_encode(s, &DUO_QUERY_ENCODE_SET).to_string()
}

/// Build the canonical parameter string.
///
/// ## Format
///
/// ```text
/// encode(k1) + "=" + encode(v1) + "&" + encode(k2) + "=" + encode(v2) ...
/// ```
///
/// Pairs are sorted by encoded key, then by encoded value. The `=` is kept
/// for empty values.
pub fn canonicalize_params(params: &BTreeMap<String, String>) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    pairs.sort();

    let mut s = String::with_capacity(16);
    for (idx, (k, v)) in pairs.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&k);
        s.push('=');
        s.push_str(&v);
    }

    s
}

/// Construct the string to sign for signature version 2.
///
/// ## Format
///
/// ```text
/// Date + "\n" +
/// METHOD + "\n" +
/// host + "\n" +
/// path + "\n" +
/// CanonicalizedParams
/// ```
///
/// The last line is present even if there are no params.
pub fn canonicalize(
    date: &str,
    method: &Method,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    [
        date.to_string(),
        method.as_str().to_ascii_uppercase(),
        host.to_ascii_lowercase(),
        path.to_string(),
        canonicalize_params(params),
    ]
    .join("\n")
}

/// Construct the string to sign for signature version 5.
///
/// ## Format
///
/// ```text
/// Date + "\n" +
/// METHOD + "\n" +
/// host + "\n" +
/// path + "\n" +
/// CanonicalizedParams + "\n" +
/// HexSha512(Body) + "\n" +
/// HexSha512(CanonicalizedXDuoHeaders)
/// ```
///
/// `body` is `None` for methods without body, which hashes the empty string.
pub fn canonicalize_v5(
    date: &str,
    method: &Method,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
    body: Option<&str>,
    headers: &BTreeMap<String, String>,
) -> String {
    [
        canonicalize(date, method, host, path, params),
        hex_sha512(body.unwrap_or_default().as_bytes()),
        hex_sha512(canonicalize_x_duo_headers(headers).as_bytes()),
    ]
    .join("\n")
}

/// Build the canonical `x-duo-*` header string.
///
/// Header names are lower-cased and sorted, names and values are joined by NUL.
/// Headers without the `x-duo-` prefix are not signed.
pub fn canonicalize_x_duo_headers(headers: &BTreeMap<String, String>) -> String {
    let lowered: BTreeMap<String, &str> = headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.as_str()))
        .filter(|(k, _)| k.starts_with(X_DUO_HEADER_PREFIX))
        .collect();

    let mut parts = Vec::with_capacity(lowered.len() * 2);
    for (k, v) in &lowered {
        parts.push(k.as_str());
        parts.push(*v);
    }

    parts.join("\0")
}
