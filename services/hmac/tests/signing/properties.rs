use std::collections::BTreeMap;

use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;
use duosign_core::SignRequest;
use duosign_hmac::canonical::canonicalize;
use duosign_hmac::{Credential, DuoRequest, RequestSigner, SignatureVersion};
use hmac::{Hmac, Mac};
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use sha1::Sha1;

fn credential() -> Credential {
    Credential::new(
        "DIABCDEFGHIJKLMNOPQR",
        "1234567890abcdefghijklmnopqrstuvwxyz1234",
        "api-XXXXXXXX.duosecurity.com",
    )
}

fn fixed_signer() -> RequestSigner {
    RequestSigner::new().with_time(Utc.with_ymd_and_hms(2025, 7, 30, 0, 0, 0).unwrap())
}

#[test]
fn test_signing_is_deterministic() -> Result<()> {
    let req = DuoRequest::new("GET", "/admin/v1/users")?.with_parameter("username", "root");

    for version in [SignatureVersion::V2, SignatureVersion::V5] {
        let signer = fixed_signer().with_signature_version(version);
        let first = signer.sign_request(&credential(), &req)?;
        let second = signer.sign_request(&credential(), &req)?;
        assert_eq!(first, second, "Failed on version: {version}");
    }
    Ok(())
}

#[test]
fn test_parameter_order_does_not_matter() -> Result<()> {
    let forward = DuoRequest::from_value(json!({
        "method": "GET",
        "path": "/admin/v1/users",
        "parameters": {"a": "1", "b": "2", "c": "3", "d d": "4"},
    }))?;
    let backward = DuoRequest::from_value(json!({
        "method": "GET",
        "path": "/admin/v1/users",
        "parameters": {"d d": "4", "c": "3", "b": "2", "a": "1"},
    }))?;

    let forward = fixed_signer().sign_request(&credential(), &forward)?;
    let backward = fixed_signer().sign_request(&credential(), &backward)?;
    assert_eq!(forward.headers["Authorization"], backward.headers["Authorization"]);
    assert_eq!(forward.uri, backward.uri);
    Ok(())
}

#[test]
fn test_encoded_query_decodes_to_original() -> Result<()> {
    let original = BTreeMap::from([
        ("name".to_string(), "First Last".to_string()),
        ("filter".to_string(), "a&b=c".to_string()),
        ("plus".to_string(), "1+1".to_string()),
        ("snow man".to_string(), "\u{2603}".to_string()),
    ]);
    let mut req = DuoRequest::new("GET", "/admin/v1/users")?;
    req.parameters = original.clone();

    let signed = fixed_signer().sign_request(&credential(), &req)?;
    let (_, query) = signed.uri.split_once('?').expect("query must be present");
    assert!(!query.contains('+'));
    assert!(!query.contains(' '));

    let decoded: BTreeMap<String, String> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    assert_eq!(decoded, original);
    Ok(())
}

#[test]
fn test_authorization_matches_independent_hmac() -> Result<()> {
    let cred = credential();
    let req = DuoRequest::new("POST", "/admin/v2/policies")?
        .with_parameter("policy_name", "new-test-policy");
    let signed = fixed_signer().sign_request(&cred, &req)?;

    let date = &signed.headers["x-duo-date"];
    let canonical = canonicalize(date, &Method::POST, &cred.api_host, &req.path, &req.parameters);
    assert_eq!(
        canonical,
        "Thu, 30 Jul 2025 00:00:00 -0000\n\
         POST\n\
         api-xxxxxxxx.duosecurity.com\n\
         /admin/v2/policies\n\
         policy_name=new-test-policy"
    );

    let mut mac = Hmac::<Sha1>::new_from_slice(cred.secret_key.as_bytes())
        .expect("hmac accepts keys of any length");
    mac.update(canonical.as_bytes());
    let digest = hex::encode(mac.finalize().into_bytes());

    let auth = signed.headers["Authorization"]
        .strip_prefix("Basic ")
        .expect("authorization must be basic");
    let decoded = String::from_utf8(base64_decode(auth))?;
    assert_eq!(decoded, format!("{}:{}", cred.integration_key, digest));
    Ok(())
}

#[test]
fn test_headers_are_complete_with_current_time() -> Result<()> {
    let before = Utc::now().timestamp();
    let req = DuoRequest::new("GET", "/auth/v2/check")?;
    let signed = RequestSigner::new().sign_request(&credential(), &req)?;
    let after = Utc::now().timestamp();

    let date = &signed.headers["x-duo-date"];
    assert!(date.ends_with(" -0000"));
    let parsed = chrono::DateTime::parse_from_rfc2822(date)?.timestamp();
    assert!(before <= parsed && parsed <= after);

    assert!(signed.headers["Authorization"].starts_with("Basic "));
    Ok(())
}

#[test]
fn test_body_presence_policy() -> Result<()> {
    let cases = vec![
        ("GET", json!({}), None),
        ("DELETE", json!({"a": "1"}), None),
        ("POST", json!({"policy_name": "new-test-policy"}), Some(r#"{"policy_name":"new-test-policy"}"#)),
        ("put", json!({"b": "2", "a": "1"}), Some(r#"{"a":"1","b":"2"}"#)),
        ("PATCH", json!({}), Some("{}")),
    ];

    for (method, parameters, body) in cases {
        let req = DuoRequest::from_value(json!({
            "method": method,
            "path": "/admin/v1/settings",
            "parameters": parameters,
        }))?;
        let signed = fixed_signer().sign_request(&credential(), &req)?;
        assert_eq!(signed.body.as_deref(), body, "Failed on method: {method}");
        assert_eq!(
            signed.headers.get("Content-type").is_some(),
            body.is_some(),
            "Failed on method: {method}"
        );
    }
    Ok(())
}

#[test]
fn test_versions_produce_different_signatures() -> Result<()> {
    let req = DuoRequest::new("GET", "/auth/v2/check")?;

    let v2 = fixed_signer().sign_request(&credential(), &req)?;
    let v5 = fixed_signer()
        .with_signature_version(SignatureVersion::V5)
        .sign_request(&credential(), &req)?;
    assert_ne!(v2.headers["Authorization"], v5.headers["Authorization"]);
    assert_eq!(v2.headers["x-duo-date"], v5.headers["x-duo-date"]);
    Ok(())
}

fn base64_decode(s: &str) -> Vec<u8> {
    use base64::Engine;
    base64::prelude::BASE64_STANDARD
        .decode(s)
        .expect("authorization must be valid base64")
}
