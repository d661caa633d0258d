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

//! Foundation bits exposing the Network API.

use std::fmt::Debug;

use serde::Serialize;

use super::super::service::NETWORK;
use super::super::session::Session;
use super::super::Result;
use super::protocol::*;

/// Create a floating IP.
pub fn create_floating_ip(session: &Session, request: FloatingIpCreate) -> Result<FloatingIp> {
    debug!("Creating a new floating IP with {:?}", request);
    let body = FloatingIpCreateRoot { floatingip: request };
    let root: FloatingIpRoot = session.post_json(NETWORK, &["floatingips"], &body)?;
    debug!("Created floating IP {:?}", root.floatingip);
    Ok(root.floatingip)
}

/// Create a security group.
pub fn create_security_group(
    session: &Session,
    request: SecurityGroupCreate,
) -> Result<SecurityGroup> {
    debug!("Creating a new security group with {:?}", request);
    let body = SecurityGroupCreateRoot {
        security_group: request,
    };
    let root: SecurityGroupRoot = session.post_json(NETWORK, &["security-groups"], &body)?;
    debug!("Created security group {:?}", root.security_group);
    Ok(root.security_group)
}

/// Create a security group rule.
pub fn create_security_group_rule(
    session: &Session,
    request: SecurityGroupRule,
) -> Result<SecurityGroupRule> {
    debug!("Creating a new security group rule with {:?}", request);
    let body = SecurityGroupRuleRoot {
        security_group_rule: request,
    };
    let root: SecurityGroupRuleRoot =
        session.post_json(NETWORK, &["security-group-rules"], &body)?;
    debug!("Created security group rule {:?}", root.security_group_rule);
    Ok(root.security_group_rule)
}

/// Delete a floating IP.
pub fn delete_floating_ip<S: AsRef<str>>(session: &Session, id: S) -> Result<()> {
    debug!("Deleting floating IP {}", id.as_ref());
    session.delete(NETWORK, &["floatingips", id.as_ref()])?;
    debug!("Floating IP {} was deleted", id.as_ref());
    Ok(())
}

/// Delete a security group.
pub fn delete_security_group<S: AsRef<str>>(session: &Session, id: S) -> Result<()> {
    debug!("Deleting security group {}", id.as_ref());
    session.delete(NETWORK, &["security-groups", id.as_ref()])?;
    debug!("Security group {} was deleted", id.as_ref());
    Ok(())
}

/// Get a floating IP.
pub fn get_floating_ip<S: AsRef<str>>(session: &Session, id: S) -> Result<FloatingIp> {
    trace!("Get floating IP by ID {}", id.as_ref());
    let root: FloatingIpRoot = session.get_json(NETWORK, &["floatingips", id.as_ref()])?;
    trace!("Received {:?}", root.floatingip);
    Ok(root.floatingip)
}

/// Get a security group.
pub fn get_security_group<S: AsRef<str>>(session: &Session, id: S) -> Result<SecurityGroup> {
    trace!("Get security group by ID {}", id.as_ref());
    let root: SecurityGroupRoot = session.get_json(NETWORK, &["security-groups", id.as_ref()])?;
    trace!("Received {:?}", root.security_group);
    Ok(root.security_group)
}

/// List networks.
pub fn list_networks<Q: Serialize + Debug>(session: &Session, query: &Q) -> Result<Vec<Network>> {
    trace!("Listing networks with {:?}", query);
    let root: NetworksRoot = session.get_json_query(NETWORK, &["networks"], query)?;
    trace!("Received networks: {:?}", root.networks);
    Ok(root.networks)
}

/// List ports.
pub fn list_ports<Q: Serialize + Debug>(session: &Session, query: &Q) -> Result<Vec<Port>> {
    trace!("Listing ports with {:?}", query);
    let root: PortsRoot = session.get_json_query(NETWORK, &["ports"], query)?;
    trace!("Received ports: {:?}", root.ports);
    Ok(root.ports)
}

/// Update a floating IP.
pub fn update_floating_ip<S: AsRef<str>>(
    session: &Session,
    id: S,
    update: FloatingIpUpdate,
) -> Result<FloatingIp> {
    debug!("Updating floating IP {} with {:?}", id.as_ref(), update);
    let body = FloatingIpUpdateRoot { floatingip: update };
    let root: FloatingIpRoot = session.put_json(NETWORK, &["floatingips", id.as_ref()], &body)?;
    debug!("Updated floating IP {:?}", root.floatingip);
    Ok(root.floatingip)
}
