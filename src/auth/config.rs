// Copyright 2018 Dmitry Tantsur <divius.inside@gmail.com>
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

//! Support for cloud configuration file.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::super::{Error, ErrorKind, Result};
use super::{CloudConfig, Password, DEFAULT_DOMAIN};

#[derive(Debug, Clone, Deserialize)]
struct Auth {
    auth_url: String,
    password: String,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    project_domain_name: Option<String>,
    username: String,
    #[serde(default)]
    user_domain_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Cloud {
    auth: Auth,
    #[serde(default)]
    region_name: Option<String>,
    #[serde(default)]
    interface: Option<String>,
    #[serde(default)]
    verify: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct Root {
    clouds: HashMap<String, Cloud>,
}

fn find_config() -> Option<PathBuf> {
    let current = Path::new("./clouds.yaml");
    if current.is_file() {
        match current.canonicalize() {
            Ok(val) => return Some(val),
            Err(e) => warn!("Cannot canonicalize {:?}: {}", current, e),
        }
    }

    if let Some(mut home) = dirs::home_dir() {
        home.push(".config/openstack/clouds.yaml");
        if home.is_file() {
            return Some(home);
        }
    } else {
        warn!("Cannot find home directory");
    }

    let abs = PathBuf::from("/etc/openstack/clouds.yaml");
    if abs.is_file() {
        Some(abs)
    } else {
        None
    }
}

/// Build a configuration for the named cloud from `clouds.yaml` contents.
pub(crate) fn from_yaml(contents: &str, cloud_name: &str) -> Result<CloudConfig> {
    let mut clouds: Root = serde_yaml::from_str(contents).map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Cannot parse clouds.yaml: {}", e),
        )
    })?;

    let cloud = clouds.clouds.remove(cloud_name).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("No such cloud: {}", cloud_name),
        )
    })?;

    let auth = cloud.auth;
    let mut password = Password::new(
        auth.auth_url,
        auth.username,
        auth.password,
        auth.user_domain_name
            .unwrap_or_else(|| String::from(DEFAULT_DOMAIN)),
    );
    if let Some(project) = auth.project_name {
        password = password.with_project_scope(
            project,
            auth.project_domain_name
                .unwrap_or_else(|| String::from(DEFAULT_DOMAIN)),
        );
    }

    let mut config = CloudConfig::new(password).with_insecure(!cloud.verify.unwrap_or(true));
    if let Some(interface) = cloud.interface {
        config = config.with_endpoint_interface(interface);
    }
    if let Some(region) = cloud.region_name {
        config = config.with_region(region);
    }
    Ok(config)
}

/// Create a configuration for the named cloud from `clouds.yaml`.
///
/// The file is searched in the current directory, then in
/// `~/.config/openstack` and finally in `/etc/openstack`.
pub fn from_config<S: AsRef<str>>(cloud_name: S) -> Result<CloudConfig> {
    let path = find_config().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidConfig,
            "clouds.yaml was not found in any location",
        )
    })?;
    debug!("Using cloud configuration from {:?}", path);

    let mut contents = String::new();
    let _ = File::open(&path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot read {:?}: {}", path, e),
            )
        })?;

    from_yaml(&contents, cloud_name.as_ref())
}
