// Copyright 2017 Dmitry Tantsur <divius.inside@gmail.com>
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

//! Authentication and connection configuration.
//!
//! Only password authentication against Identity API v3 is supported. The
//! configuration can be built by hand, read from the usual `OS_*`
//! environment variables or taken from a `clouds.yaml` file.
//!
//! # Examples
//!
//! Creating a configuration by hand:
//!
//! ```rust,no_run
//! use mos_tests::auth::{CloudConfig, Password};
//!
//! let auth = Password::new("https://my.cloud.com/identity", "admin", "pa$$w0rd", "Default")
//!     .with_project_scope("project1", "Default");
//! let config = CloudConfig::new(auth).with_endpoint_interface("internal");
//! let os = mos_tests::Cloud::new(config).expect("Cannot create a session");
//! ```
//!
//! Reading it from environment variables:
//!
//! ```rust,no_run
//! let config = mos_tests::auth::from_env().expect("Incomplete environment");
//! ```

use std::env;
use std::fmt;

use super::session::EndpointFilters;
use super::{Error, ErrorKind, Result};

mod config;

pub use self::config::from_config;

const DEFAULT_DOMAIN: &str = "Default";
const DEFAULT_INTERFACE: &str = "public";

/// Password credentials for Identity API v3.
#[derive(Clone)]
pub struct Password {
    pub(crate) auth_url: String,
    pub(crate) user_name: String,
    pub(crate) password: String,
    pub(crate) user_domain_name: String,
    pub(crate) project_name: Option<String>,
    pub(crate) project_domain_name: String,
}

/// Everything needed to create a session.
#[derive(Clone, Debug)]
pub struct CloudConfig {
    pub(crate) auth: Password,
    pub(crate) filters: EndpointFilters,
    pub(crate) insecure: bool,
}

impl Password {
    /// Create password credentials without a scope.
    pub fn new<U, S1, S2, S3>(auth_url: U, user_name: S1, password: S2, user_domain_name: S3) -> Password
    where
        U: Into<String>,
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Password {
            auth_url: auth_url.into(),
            user_name: user_name.into(),
            password: password.into(),
            user_domain_name: user_domain_name.into(),
            project_name: None,
            project_domain_name: String::from(DEFAULT_DOMAIN),
        }
    }

    /// Scope authentication to the given project.
    pub fn with_project_scope<S1, S2>(mut self, project_name: S1, project_domain_name: S2) -> Password
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.project_name = Some(project_name.into());
        self.project_domain_name = project_domain_name.into();
        self
    }

    /// Authentication URL.
    #[inline]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// User name.
    #[inline]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Project name (if project scoped).
    #[inline]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Password")
            .field("auth_url", &self.auth_url)
            .field("user_name", &self.user_name)
            .field("password", &"<hidden>")
            .field("user_domain_name", &self.user_domain_name)
            .field("project_name", &self.project_name)
            .field("project_domain_name", &self.project_domain_name)
            .finish()
    }
}

impl CloudConfig {
    /// Create a configuration using the public interface in any region.
    pub fn new(auth: Password) -> CloudConfig {
        CloudConfig {
            auth,
            filters: EndpointFilters::default(),
            insecure: false,
        }
    }

    /// Credentials in use.
    #[inline]
    pub fn auth(&self) -> &Password {
        &self.auth
    }

    /// Endpoint filters in use.
    #[inline]
    pub fn endpoint_filters(&self) -> &EndpointFilters {
        &self.filters
    }

    /// Whether TLS certificates are not verified.
    #[inline]
    pub fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Use the given endpoint interface (`public`, `internal` or `admin`).
    pub fn with_endpoint_interface<S: Into<String>>(mut self, interface: S) -> CloudConfig {
        self.filters.interface = interface.into();
        self
    }

    /// Only use endpoints from the given region.
    pub fn with_region<S: Into<String>>(mut self, region: S) -> CloudConfig {
        self.filters.region = Some(region.into());
        self
    }

    /// Disable TLS certificate verification.
    pub fn with_insecure(mut self, insecure: bool) -> CloudConfig {
        self.insecure = insecure;
        self
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn require<F>(getter: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    getter(name).filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Environment variable {} is not set", name),
        )
    })
}

/// Create a configuration from the given variable lookup.
pub(crate) fn from_vars<F>(getter: F) -> Result<CloudConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let auth_url = require(&getter, "OS_AUTH_URL")?;
    let user_name = require(&getter, "OS_USERNAME")?;
    let password = require(&getter, "OS_PASSWORD")?;
    let project_name = require(&getter, "OS_PROJECT_NAME")
        .or_else(|_| require(&getter, "OS_TENANT_NAME"))
        .map_err(|_| {
            Error::new(
                ErrorKind::InvalidConfig,
                "Neither OS_PROJECT_NAME nor OS_TENANT_NAME is set",
            )
        })?;
    let user_domain = getter("OS_USER_DOMAIN_NAME").unwrap_or_else(|| String::from(DEFAULT_DOMAIN));
    let project_domain =
        getter("OS_PROJECT_DOMAIN_NAME").unwrap_or_else(|| String::from(DEFAULT_DOMAIN));

    let auth = Password::new(auth_url, user_name, password, user_domain)
        .with_project_scope(project_name, project_domain);
    let mut config = CloudConfig::new(auth)
        .with_endpoint_interface(getter("OS_INTERFACE").unwrap_or_else(|| String::from(DEFAULT_INTERFACE)))
        .with_insecure(getter("OS_INSECURE").map_or(false, |v| parse_bool(&v)));
    if let Some(region) = getter("OS_REGION_NAME").filter(|v| !v.is_empty()) {
        config = config.with_region(region);
    }

    debug!("Loaded configuration from environment: {:?}", config);
    Ok(config)
}

/// Create a configuration from environment variables.
///
/// Requires `OS_AUTH_URL`, `OS_USERNAME`, `OS_PASSWORD` and either
/// `OS_PROJECT_NAME` or `OS_TENANT_NAME`. Domains default to `Default`,
/// the interface to `public`.
pub fn from_env() -> Result<CloudConfig> {
    from_vars(|name| env::var(name).ok())
}
