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

//! Service types known to the harness.

use std::fmt;

use reqwest::Url;

use super::{Error, ErrorKind, Result};

/// A service type with its API version suffix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ServiceType {
    /// Service type to look up in the catalog.
    pub catalog_type: &'static str,
    /// Version suffix to append to the endpoint if it is missing.
    pub version_suffix: Option<&'static str>,
}

/// Compute API (Nova). The catalog entry carries the version.
pub const COMPUTE: ServiceType = ServiceType {
    catalog_type: "compute",
    version_suffix: None,
};

/// Image API (Glance) v2.
pub const IMAGE: ServiceType = ServiceType {
    catalog_type: "image",
    version_suffix: Some("v2"),
};

/// Network API (Neutron) v2.0.
pub const NETWORK: ServiceType = ServiceType {
    catalog_type: "network",
    version_suffix: Some("v2.0"),
};

/// Orchestration API (Heat). The catalog entry carries version and project.
pub const ORCHESTRATION: ServiceType = ServiceType {
    catalog_type: "orchestration",
    version_suffix: None,
};

impl ServiceType {
    /// Build a full URL from a catalog endpoint and path segments.
    pub fn join_url(&self, mut endpoint: Url, path: &[&str]) -> Result<Url> {
        let has_version = self.version_suffix.map_or(true, |suffix| {
            endpoint
                .path_segments()
                .map(|mut segments| segments.any(|s| s == suffix))
                .unwrap_or(false)
        });

        {
            let mut segments = endpoint.path_segments_mut().map_err(|_| {
                Error::new(
                    ErrorKind::InvalidResponse,
                    format!("Endpoint for {} cannot be a base URL", self),
                )
            })?;
            let _ = segments.pop_if_empty();
            if !has_version {
                if let Some(suffix) = self.version_suffix {
                    let _ = segments.push(suffix);
                }
            }
            let _ = segments.extend(path);
        }

        Ok(endpoint)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.catalog_type)
    }
}
