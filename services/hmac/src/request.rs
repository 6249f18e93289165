//! Request model accepted by the Duo signer.

use std::collections::BTreeMap;

use duosign_core::{Error, Result};
use http::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A request to be signed for the Duo Admin or Auth API.
///
/// Parameters and headers are kept in ordered maps, so iteration order never
/// depends on how the caller built them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuoRequest {
    /// HTTP method, always upper-cased.
    pub method: Method,
    /// Absolute API path like `/admin/v1/users`.
    pub path: String,
    /// Request parameters, sent as query for `GET`-like methods and as JSON body otherwise.
    pub parameters: BTreeMap<String, String>,
    /// Extra headers to send along with the signed ones.
    pub headers: BTreeMap<String, String>,
}

impl DuoRequest {
    /// Create a new request without parameters or headers.
    ///
    /// `method` is case-insensitive and `path` must start with `/`.
    pub fn new(method: &str, path: &str) -> Result<Self> {
        let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())?;

        if !path.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "path '{path}' must start with '/'"
            )));
        }

        Ok(Self {
            method,
            path: path.to_string(),
            parameters: BTreeMap::new(),
            headers: BTreeMap::new(),
        })
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Add an extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parse a request from its JSON representation.
    ///
    /// ```json
    /// {"method": "GET", "path": "/auth/v2/check", "parameters": {}, "headers": {}}
    /// ```
    pub fn from_slice(bs: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bs)
            .map_err(|e| Error::request_invalid("request body is not valid JSON").with_source(e))?;
        Self::from_value(value)
    }

    /// Parse a request from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::request_invalid("request body must be a JSON object"));
        }

        let raw: RawRequest = serde_json::from_value(value)?;
        raw.try_into()
    }
}

/// The loosely typed shape of an inbound request, before validation.
///
/// `null` is treated the same as an absent field.
#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    method: Option<Value>,
    #[serde(default)]
    path: Option<Value>,
    #[serde(default)]
    parameters: Option<Value>,
    #[serde(default)]
    headers: Option<Value>,
}

impl TryFrom<RawRequest> for DuoRequest {
    type Error = Error;

    fn try_from(raw: RawRequest) -> Result<Self> {
        let method = raw.method.ok_or_else(|| Error::missing_field("method"))?;
        let path = raw.path.ok_or_else(|| Error::missing_field("path"))?;
        let parameters = raw.parameters.ok_or_else(|| Error::missing_field("parameters"))?;

        let Value::String(method) = method else {
            return Err(Error::request_invalid("'method' must be a string"));
        };
        let Value::String(path) = path else {
            return Err(Error::request_invalid("'path' must be a string"));
        };

        let mut req = DuoRequest::new(&method, &path)?;
        req.parameters = parameters_from_value(parameters)?;
        if let Some(headers) = raw.headers {
            req.headers = headers_from_value(headers)?;
        }

        Ok(req)
    }
}

fn parameters_from_value(value: Value) -> Result<BTreeMap<String, String>> {
    let Value::Object(map) = value else {
        return Err(Error::request_invalid("'parameters' must be an object"));
    };

    string_map(map, Error::parameter_invalid)
}

fn headers_from_value(value: Value) -> Result<BTreeMap<String, String>> {
    match value {
        Value::Object(map) => string_map(map, |name| {
            Error::request_invalid(format!("header '{name}' must be a string"))
        }),
        _ => Err(Error::request_invalid("'headers' must be an object")),
    }
}

fn string_map(
    map: Map<String, Value>,
    on_invalid: impl Fn(&str) -> Error,
) -> Result<BTreeMap<String, String>> {
    map.into_iter()
        .map(|(k, v)| match v {
            Value::String(v) => Ok((k, v)),
            _ => Err(on_invalid(&k)),
        })
        .collect()
}
