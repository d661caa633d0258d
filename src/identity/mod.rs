// Copyright 2019-2020 Dmitry Tantsur <dtantsur@protonmail.com>
// Copyright 2026 The mos-tests Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Password authentication against the Identity V3 API.

mod catalog;
pub(crate) mod protocol;

use chrono::{DateTime, Duration, FixedOffset};
use reqwest::blocking::Client;
use reqwest::Url;

use super::auth::Password;
use super::common::protocol::now;
use super::{Error, ErrorKind, Result};

pub use self::catalog::ServiceCatalog;

const TOKEN_HEADER: &str = "x-subject-token";

/// Tokens this close to expiration are renewed.
const EXPIRATION_MARGIN_SECONDS: i64 = 30;

/// A token with its service catalog.
#[derive(Clone, Debug)]
pub struct AuthToken {
    pub(crate) value: String,
    pub(crate) expires_at: DateTime<FixedOffset>,
    pub(crate) catalog: ServiceCatalog,
}

impl AuthToken {
    /// Whether the token is about to expire.
    pub fn is_expiring(&self) -> bool {
        self.expires_at - now() < Duration::seconds(EXPIRATION_MARGIN_SECONDS)
    }
}

/// URL of the token endpoint for the given auth URL.
pub(crate) fn token_url(auth_url: &str) -> Result<Url> {
    let mut url = Url::parse(auth_url).map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Invalid auth URL {}: {}", auth_url, e),
        )
    })?;

    let has_version = url
        .path_segments()
        .map(|mut segments| segments.any(|s| s == "v3"))
        .unwrap_or(false);

    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Auth URL {} cannot be a base", auth_url),
            )
        })?;
        let _ = segments.pop_if_empty();
        if !has_version {
            let _ = segments.push("v3");
        }
        let _ = segments.extend(&["auth", "tokens"]);
    }

    Ok(url)
}

/// Request a new token.
pub(crate) fn authenticate(client: &Client, auth: &Password) -> Result<AuthToken> {
    let url = token_url(&auth.auth_url)?;
    let body = protocol::ProjectScopedAuthRoot::new(
        protocol::PasswordIdentity::new(
            auth.user_name.clone(),
            auth.password.clone(),
            auth.user_domain_name.clone(),
        ),
        auth.project_name.as_ref().map(|project| {
            protocol::ProjectScope::new(project.clone(), auth.project_domain_name.clone())
        }),
    );

    debug!("Requesting a token for user {} from {}", auth.user_name, url);
    let resp = client.post(url).json(&body).send()?;
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().unwrap_or_default();
        error!("Authentication failed with HTTP {}: {}", status, message);
        let kind = match ErrorKind::from_status(status) {
            ErrorKind::ResourceNotFound => ErrorKind::AuthenticationFailed,
            other => other,
        };
        return Err(Error::new_with_details(kind, Some(status), Some(message)));
    }

    let value = resp
        .headers()
        .get(TOKEN_HEADER)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidResponse,
                "Identity service did not return a token",
            )
        })?
        .to_str()
        .map_err(|e| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!("Invalid token header: {}", e),
            )
        })?
        .to_string();

    let root: protocol::TokenRoot = resp.json()?;
    debug!("Received a token expiring at {}", root.token.expires_at);
    Ok(AuthToken {
        value,
        expires_at: root.token.expires_at,
        catalog: ServiceCatalog::new(root.token.catalog),
    })
}
