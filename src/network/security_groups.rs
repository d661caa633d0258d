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

//! Security groups and their rules.

use std::rc::Rc;

use ipnet::IpNet;

use super::super::common::Refresh;
use super::super::session::Session;
use super::super::Result;
use super::{api, protocol};

/// Structure representing a security group.
#[derive(Clone, Debug)]
pub struct SecurityGroup {
    session: Rc<Session>,
    inner: protocol::SecurityGroup,
}

/// A request to create a security group.
#[derive(Clone, Debug)]
pub struct NewSecurityGroup {
    session: Rc<Session>,
    inner: protocol::SecurityGroupCreate,
}

/// A rule to add to a security group.
#[derive(Clone, Debug)]
pub struct NewSecurityGroupRule {
    direction: protocol::RuleDirection,
    ethertype: protocol::RuleEtherType,
    protocol: Option<protocol::RuleProtocol>,
    port_range: Option<(u16, u16)>,
    remote_ip_prefix: Option<IpNet>,
}

impl SecurityGroup {
    /// Load a SecurityGroup object.
    pub(crate) fn load<Id: AsRef<str>>(session: Rc<Session>, id: Id) -> Result<SecurityGroup> {
        let inner = api::get_security_group(&session, id)?;
        Ok(SecurityGroup { session, inner })
    }

    transparent_property! {
        #[doc = "Security group description."]
        description: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Security group name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "Rules as of the last refresh."]
        security_group_rules: ref Vec<protocol::SecurityGroupRule>
    }

    /// Add a rule to this security group.
    pub fn add_rule(&mut self, rule: NewSecurityGroupRule) -> Result<protocol::SecurityGroupRule> {
        let (port_range_min, port_range_max) = match rule.port_range {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        let request = protocol::SecurityGroupRule {
            direction: rule.direction,
            ethertype: rule.ethertype,
            id: String::new(),
            port_range_max,
            port_range_min,
            protocol: rule.protocol,
            remote_ip_prefix: rule.remote_ip_prefix,
            security_group_id: self.inner.id.clone(),
        };
        let created = api::create_security_group_rule(&self.session, request)?;
        self.inner.security_group_rules.push(created.clone());
        Ok(created)
    }

    /// Delete the security group.
    pub fn delete(self) -> Result<()> {
        api::delete_security_group(&self.session, &self.inner.id)
    }
}

impl Refresh for SecurityGroup {
    /// Refresh the security group.
    fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_security_group(&self.session, &self.inner.id)?;
        Ok(())
    }
}

impl NewSecurityGroup {
    /// Start creating a security group.
    pub(crate) fn new(session: Rc<Session>, name: String) -> NewSecurityGroup {
        NewSecurityGroup {
            session,
            inner: protocol::SecurityGroupCreate {
                name,
                description: None,
            },
        }
    }

    /// Request creation of the security group.
    pub fn create(self) -> Result<SecurityGroup> {
        let inner = api::create_security_group(&self.session, self.inner)?;
        Ok(SecurityGroup {
            session: self.session,
            inner,
        })
    }

    /// Set the description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> NewSecurityGroup {
        self.inner.description = Some(description.into());
        self
    }
}

impl NewSecurityGroupRule {
    /// An IPv4 ingress rule for the given protocol from anywhere.
    pub fn ingress(ip_protocol: protocol::RuleProtocol) -> NewSecurityGroupRule {
        NewSecurityGroupRule {
            direction: protocol::RuleDirection::Ingress,
            ethertype: protocol::RuleEtherType::IPv4,
            protocol: Some(ip_protocol),
            port_range: None,
            remote_ip_prefix: None,
        }
    }

    /// Set the direction.
    pub fn with_direction(mut self, direction: protocol::RuleDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the ethernet type.
    pub fn with_ethertype(mut self, ethertype: protocol::RuleEtherType) -> Self {
        self.ethertype = ethertype;
        self
    }

    /// Limit the rule to a port range (inclusive).
    pub fn with_port_range(mut self, min: u16, max: u16) -> Self {
        self.port_range = Some((min, max));
        self
    }

    /// Limit the rule to a remote CIDR.
    pub fn with_remote_ip_prefix(mut self, prefix: IpNet) -> Self {
        self.remote_ip_prefix = Some(prefix);
        self
    }
}
