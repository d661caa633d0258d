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

//! JSON structures and protocol bits for the Compute API.

#![allow(non_snake_case)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::net::IpAddr;

use super::super::common::protocol::Ref;
use super::super::common::ResourceStatus;

protocol_enum! {
    #[doc = "Possible server statuses."]
    enum ServerStatus = Unknown {
        Active = "ACTIVE",
        Building = "BUILD",
        Deleted = "DELETED",
        Error = "ERROR",
        HardRebooting = "HARD_REBOOT",
        Migrating = "MIGRATING",
        Paused = "PAUSED",
        Rebooting = "REBOOT",
        Rebuilding = "REBUILD",
        Resizing = "RESIZE",
        RevertingResize = "REVERT_RESIZE",
        ShutOff = "SHUTOFF",
        Suspended = "SUSPENDED",
        Rescuing = "RESCUE",
        Shelved = "SHELVED",
        ShelvedOffloaded = "SHELVED_OFFLOADED",
        SoftDeleted = "SOFT_DELETED",
        Unknown = "UNKNOWN",
        UpdatingPassword = "PASSWORD",
        VerifyingResize = "VERIFY_RESIZE"
    }
}

impl Default for ServerStatus {
    fn default() -> ServerStatus {
        ServerStatus::Unknown
    }
}

impl ResourceStatus for ServerStatus {
    fn is_in_progress(&self) -> bool {
        matches!(
            self,
            ServerStatus::Building
                | ServerStatus::HardRebooting
                | ServerStatus::Migrating
                | ServerStatus::Rebooting
                | ServerStatus::Rebuilding
                | ServerStatus::Resizing
                | ServerStatus::RevertingResize
                | ServerStatus::UpdatingPassword
        )
    }

    fn is_deleted(&self) -> bool {
        matches!(self, ServerStatus::Deleted | ServerStatus::SoftDeleted)
    }
}

protocol_enum! {
    #[doc = "Type of a server address."]
    enum AddressType {
        Fixed = "fixed",
        Floating = "floating"
    }
}

/// Address of a server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerAddress {
    /// IP (v4 of v6) address.
    pub addr: IpAddr,
    /// Address type (if known).
    #[serde(rename = "OS-EXT-IPS:type", default)]
    pub addr_type: Option<AddressType>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub addresses: HashMap<String, Vec<ServerAddress>>,
    #[serde(default, deserialize_with = "lenient_ref")]
    pub flavor: Option<Ref>,
    pub id: String,
    // Servers booted from volume report an empty string here.
    #[serde(default, deserialize_with = "lenient_ref")]
    pub image: Option<Ref>,
    pub name: String,
    pub status: ServerStatus,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerRoot {
    pub server: Server,
}

#[derive(Clone, Debug, Serialize)]
pub struct ServerNetwork {
    pub uuid: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ServerCreate {
    pub flavorRef: String,
    pub imageRef: String,
    pub name: String,
    pub networks: Vec<ServerNetwork>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ServerCreateRoot {
    pub server: ServerCreate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreatedServerRoot {
    pub server: Ref,
}

#[derive(Clone, Debug, Serialize)]
pub struct AddSecurityGroup {
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AddSecurityGroupRoot {
    pub addSecurityGroup: AddSecurityGroup,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Flavor {
    #[serde(default)]
    pub disk: u64,
    pub id: String,
    pub name: String,
    pub ram: u64,
    pub vcpus: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlavorRoot {
    pub flavor: Flavor,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlavorsRoot {
    pub flavors: Vec<Flavor>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FlavorCreate {
    pub name: String,
    pub ram: u64,
    pub vcpus: u32,
    pub disk: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FlavorCreateRoot {
    pub flavor: FlavorCreate,
}

fn lenient_ref<'de, D>(deserializer: D) -> Result<Option<Ref>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[allow(dead_code)]
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeRef {
        Ref(Ref),
        Other(serde::de::IgnoredAny),
    }

    let value: Option<MaybeRef> = serde::Deserialize::deserialize(deserializer)?;
    Ok(match value {
        Some(MaybeRef::Ref(r)) => Some(r),
        _ => None,
    })
}

#[cfg(test)]
mod test {
    use super::super::super::common::ResourceStatus;
    use super::{ServerRoot, ServerStatus};

    #[test]
    fn test_server_status() {
        assert!(ServerStatus::Building.is_in_progress());
        assert!(!ServerStatus::Active.is_in_progress());
        assert!(!ServerStatus::Error.is_in_progress());
        assert!(ServerStatus::Deleted.is_deleted());
        assert!(!ServerStatus::Error.is_deletion_failed());
        assert_eq!("SOMETHING_NEW".parse::<ServerStatus>().unwrap(), ServerStatus::Unknown);
    }

    #[test]
    fn test_parse_server() {
        let root: ServerRoot = serde_json::from_str(
            r#"{"server": {
                "id": "9168b536-cd40-4630-b43f-b259807c6e87",
                "name": "MyTestSystemWithNova",
                "status": "BUILD",
                "flavor": {"id": "3", "links": []},
                "image": "",
                "addresses": {
                    "internal": [
                        {"addr": "192.168.0.3", "version": 4, "OS-EXT-IPS:type": "fixed"}
                    ]
                }
            }}"#,
        )
        .unwrap();
        assert_eq!(root.server.status, ServerStatus::Building);
        assert!(root.server.image.is_none());
        assert_eq!(root.server.flavor.unwrap().id, "3");
        assert_eq!(root.server.addresses["internal"][0].addr.to_string(), "192.168.0.3");
    }
}
