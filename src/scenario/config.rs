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

//! Scenario knobs.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::super::{Error, ErrorKind, Result};

/// Settings shared by the scenarios.
///
/// Every field can be overridden with a `MOS_*` environment variable, see
/// [from_env](#method.from_env).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// Directory with Heat templates (`MOS_TEMPLATES_DIR`).
    pub templates_dir: PathBuf,
    /// Guest image to upload (`MOS_IMAGE_PATH`).
    pub image_path: PathBuf,
    /// Name for the uploaded image (`MOS_IMAGE_NAME`).
    pub image_name: String,
    /// Name for the booted server (`MOS_SERVER_NAME`).
    pub server_name: String,
    /// Name for the security group (`MOS_SECURITY_GROUP`).
    pub security_group_name: String,
    /// Substring of the flavor to copy (`MOS_FLAVOR_HINT`).
    pub flavor_hint: String,
    /// Substring of the preferred network name (`MOS_NETWORK_HINT`).
    pub network_hint: String,
    /// Flavor to use when no flavor matches the hint (`MOS_FALLBACK_FLAVOR`).
    pub fallback_flavor_id: String,
    /// Number of echo requests (`MOS_PING_COUNT`).
    pub ping_count: u32,
    /// Seconds between echo requests (`MOS_PING_INTERVAL`).
    pub ping_interval: u32,
}

impl Default for ScenarioConfig {
    fn default() -> ScenarioConfig {
        ScenarioConfig {
            templates_dir: PathBuf::from("templates"),
            image_path: PathBuf::from("/tmp/trusty-server-cloudimg-amd64-disk1.img"),
            image_name: String::from("MyTestSystem"),
            server_name: String::from("MyTestSystemWithNova"),
            security_group_name: String::from("ms_compatibility"),
            flavor_hint: String::from("medium"),
            network_hint: String::from("internal"),
            fallback_flavor_id: String::from("3"),
            ping_count: 4,
            ping_interval: 4,
        }
    }
}

fn parse_number<T: FromStr>(name: &str, value: String) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("{} must be a non-negative integer, got {}", name, value),
        )
    })
}

impl ScenarioConfig {
    /// Create a configuration from the given variable lookup.
    pub(crate) fn from_vars<F>(getter: F) -> Result<ScenarioConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| getter(name).filter(|v| !v.is_empty());
        let mut config = ScenarioConfig::default();

        if let Some(value) = get("MOS_TEMPLATES_DIR") {
            config.templates_dir = PathBuf::from(value);
        }
        if let Some(value) = get("MOS_IMAGE_PATH") {
            config.image_path = PathBuf::from(value);
        }
        if let Some(value) = get("MOS_IMAGE_NAME") {
            config.image_name = value;
        }
        if let Some(value) = get("MOS_SERVER_NAME") {
            config.server_name = value;
        }
        if let Some(value) = get("MOS_SECURITY_GROUP") {
            config.security_group_name = value;
        }
        if let Some(value) = get("MOS_FLAVOR_HINT") {
            config.flavor_hint = value;
        }
        if let Some(value) = get("MOS_NETWORK_HINT") {
            config.network_hint = value;
        }
        if let Some(value) = get("MOS_FALLBACK_FLAVOR") {
            config.fallback_flavor_id = value;
        }
        if let Some(value) = get("MOS_PING_COUNT") {
            config.ping_count = parse_number("MOS_PING_COUNT", value)?;
        }
        if let Some(value) = get("MOS_PING_INTERVAL") {
            config.ping_interval = parse_number("MOS_PING_INTERVAL", value)?;
        }

        debug!("Loaded scenario configuration: {:?}", config);
        Ok(config)
    }

    /// Create a configuration from `MOS_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults. Fails with
    /// `InvalidConfig` if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<ScenarioConfig> {
        ScenarioConfig::from_vars(|name| env::var(name).ok())
    }
}
