// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use duosign_core::{utils::Redact, SigningCredential};

/// Credential for a Duo Admin or Auth API integration.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Integration key (ikey), the public identifier of the integration.
    pub integration_key: String,
    /// Secret key (skey) used to key the HMAC.
    pub secret_key: String,
    /// API hostname like `api-xxxxxxxx.duosecurity.com`, without scheme.
    ///
    /// Kept as given; only the canonical string lower-cases it.
    pub api_host: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// `api_host` may be given with an `https://` scheme or a trailing `/`,
    /// both are stripped.
    pub fn new(
        integration_key: impl Into<String>,
        secret_key: impl Into<String>,
        api_host: impl AsRef<str>,
    ) -> Self {
        Self {
            integration_key: integration_key.into(),
            secret_key: secret_key.into(),
            api_host: normalize_host(api_host.as_ref()),
        }
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);

    host.trim_end_matches('/').to_string()
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("integration_key", &Redact::from(&self.integration_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("api_host", &Redact::from(&self.api_host))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.integration_key.is_empty() && !self.secret_key.is_empty() && !self.api_host.is_empty()
    }
}
