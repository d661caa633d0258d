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

//! JSON structures and protocol bits for the Network API.

#![allow(missing_docs)]

use std::net;

use ipnet::IpNet;

use super::super::common::ResourceStatus;

protocol_enum! {
    #[doc = "Possible network and port statuses."]
    enum NetworkStatus = Unknown {
        Active = "ACTIVE",
        Down = "DOWN",
        Building = "BUILD",
        Error = "ERROR",
        Unknown = "UNKNOWN"
    }
}

protocol_enum! {
    #[doc = "Possible floating IP statuses."]
    enum FloatingIpStatus = Unknown {
        Active = "ACTIVE",
        Down = "DOWN",
        Error = "ERROR",
        Unknown = "UNKNOWN"
    }
}

impl ResourceStatus for FloatingIpStatus {
    fn is_in_progress(&self) -> bool {
        false
    }
}

protocol_enum! {
    #[doc = "Direction of a security group rule."]
    enum RuleDirection {
        Ingress = "ingress",
        Egress = "egress"
    }
}

protocol_enum! {
    #[doc = "Ethernet type of a security group rule."]
    enum RuleEtherType {
        IPv4 = "IPv4",
        IPv6 = "IPv6"
    }
}

protocol_enum! {
    #[doc = "IP protocol of a security group rule."]
    enum RuleProtocol {
        Icmp = "icmp",
        Tcp = "tcp",
        Udp = "udp"
    }
}

/// A network.
#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    #[serde(rename = "router:external", default)]
    pub external: Option<bool>,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<NetworkStatus>,
    #[serde(default)]
    pub subnets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworksRoot {
    pub networks: Vec<Network>,
}

/// A port's IP address.
#[derive(Debug, Clone, Deserialize)]
pub struct PortIpAddress {
    pub ip_address: net::IpAddr,
    pub subnet_id: String,
}

/// A port.
#[derive(Debug, Clone, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub fixed_ips: Vec<PortIpAddress>,
    pub id: String,
    pub mac_address: String,
    pub network_id: String,
    pub status: NetworkStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortsRoot {
    pub ports: Vec<Port>,
}

/// A security group rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityGroupRule {
    pub direction: RuleDirection,
    pub ethertype: RuleEtherType,
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_max: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_min: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<RuleProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_ip_prefix: Option<IpNet>,
    pub security_group_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityGroupRuleRoot {
    pub security_group_rule: SecurityGroupRule,
}

/// A security group.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityGroup {
    #[serde(default)]
    pub description: Option<String>,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub security_group_rules: Vec<SecurityGroupRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityGroupRoot {
    pub security_group: SecurityGroup,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupCreateRoot {
    pub security_group: SecurityGroupCreate,
}

/// A floating IP.
#[derive(Debug, Clone, Deserialize)]
pub struct FloatingIp {
    #[serde(default)]
    pub fixed_ip_address: Option<net::IpAddr>,
    pub floating_ip_address: net::IpAddr,
    pub floating_network_id: String,
    pub id: String,
    #[serde(default)]
    pub port_id: Option<String>,
    pub status: FloatingIpStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloatingIpRoot {
    pub floatingip: FloatingIp,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingIpCreate {
    pub floating_network_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingIpCreateRoot {
    pub floatingip: FloatingIpCreate,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingIpUpdate {
    pub port_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingIpUpdateRoot {
    pub floatingip: FloatingIpUpdate,
}

#[cfg(test)]
mod test {
    use super::{
        FloatingIpUpdate, FloatingIpUpdateRoot, NetworksRoot, RuleDirection, RuleEtherType,
        RuleProtocol, SecurityGroupRule, SecurityGroupRuleRoot,
    };

    #[test]
    fn test_parse_networks() {
        let root: NetworksRoot = serde_json::from_str(
            r#"{"networks": [
                {"id": "n1", "name": "admin_internal_net", "status": "ACTIVE",
                 "router:external": false, "subnets": ["s1"]},
                {"id": "n2", "name": "admin_floating_net", "status": "ACTIVE",
                 "router:external": true, "subnets": []}
            ]}"#,
        )
        .unwrap();
        assert_eq!(root.networks[0].external, Some(false));
        assert_eq!(root.networks[1].external, Some(true));
    }

    #[test]
    fn test_rule_serialization() {
        let rule = SecurityGroupRuleRoot {
            security_group_rule: SecurityGroupRule {
                direction: RuleDirection::Ingress,
                ethertype: RuleEtherType::IPv4,
                id: String::new(),
                port_range_max: Some(80),
                port_range_min: Some(80),
                protocol: Some(RuleProtocol::Tcp),
                remote_ip_prefix: Some("0.0.0.0/0".parse().unwrap()),
                security_group_id: String::from("sg1"),
            },
        };
        let value = serde_json::to_value(&rule).unwrap();
        let inner = &value["security_group_rule"];
        assert_eq!(inner["direction"], "ingress");
        assert_eq!(inner["protocol"], "tcp");
        assert_eq!(inner["remote_ip_prefix"], "0.0.0.0/0");
        assert!(inner.get("id").is_none());
    }

    #[test]
    fn test_disassociate_serializes_null() {
        let body = FloatingIpUpdateRoot {
            floatingip: FloatingIpUpdate { port_id: None },
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"floatingip":{"port_id":null}}"#
        );
    }
}
