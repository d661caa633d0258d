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

//! Floating IP support.

use std::net;
use std::rc::Rc;
use std::time::Duration;

use super::super::common::{DeletionWaiter, Refresh, TrackedResource, DEFAULT_DELAY};
use super::super::session::Session;
use super::super::Result;
use super::{api, protocol};

/// Structure representing a single floating IP.
#[derive(Clone, Debug)]
pub struct FloatingIp {
    session: Rc<Session>,
    inner: protocol::FloatingIp,
}

/// A request to create a floating IP.
#[derive(Clone, Debug)]
pub struct NewFloatingIp {
    session: Rc<Session>,
    inner: protocol::FloatingIpCreate,
}

impl FloatingIp {
    /// Load a FloatingIp object.
    pub(crate) fn load<Id: AsRef<str>>(session: Rc<Session>, id: Id) -> Result<FloatingIp> {
        let inner = api::get_floating_ip(&session, id)?;
        Ok(FloatingIp { session, inner })
    }

    transparent_property! {
        #[doc = "IP address of the port associated with the IP (if any)."]
        fixed_ip_address: Option<net::IpAddr>
    }

    transparent_property! {
        #[doc = "Floating IP address"]
        floating_ip_address: net::IpAddr
    }

    transparent_property! {
        #[doc = "ID of the network this floating IP belongs to."]
        floating_network_id: ref String
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    /// Whether the floating IP is associated.
    pub fn is_associated(&self) -> bool {
        self.inner.port_id.is_some()
    }

    transparent_property! {
        #[doc = "ID of the port this IP is attached to (if any)."]
        port_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Status of the floating IP."]
        status: protocol::FloatingIpStatus
    }

    /// Associate this floating IP with a port.
    pub fn associate<S: Into<String>>(&mut self, port_id: S) -> Result<()> {
        let update = protocol::FloatingIpUpdate {
            port_id: Some(port_id.into()),
        };
        self.inner = api::update_floating_ip(&self.session, &self.inner.id, update)?;
        Ok(())
    }

    /// Dissociate this floating IP from its port.
    pub fn dissociate(&mut self) -> Result<()> {
        let update = protocol::FloatingIpUpdate { port_id: None };
        self.inner = api::update_floating_ip(&self.session, &self.inner.id, update)?;
        Ok(())
    }

    /// Delete the floating IP.
    pub fn delete(self) -> Result<DeletionWaiter<FloatingIp>> {
        api::delete_floating_ip(&self.session, &self.inner.id)?;
        Ok(DeletionWaiter::new(self, Duration::new(60, 0), DEFAULT_DELAY))
    }
}

impl Refresh for FloatingIp {
    /// Refresh the floating IP.
    fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_floating_ip(&self.session, &self.inner.id)?;
        Ok(())
    }
}

impl TrackedResource for FloatingIp {
    type Status = protocol::FloatingIpStatus;

    const KIND: &'static str = "floating IP";

    fn resource_id(&self) -> &str {
        &self.inner.id
    }

    fn resource_status(&self) -> protocol::FloatingIpStatus {
        self.inner.status
    }
}

impl NewFloatingIp {
    /// Start creating a floating IP on the given network.
    pub(crate) fn new(session: Rc<Session>, floating_network_id: String) -> NewFloatingIp {
        NewFloatingIp {
            session,
            inner: protocol::FloatingIpCreate {
                floating_network_id,
            },
        }
    }

    /// Request creation of the floating IP.
    pub fn create(self) -> Result<FloatingIp> {
        let inner = api::create_floating_ip(&self.session, self.inner)?;
        Ok(FloatingIp {
            session: self.session,
            inner,
        })
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use waiter::Waiter;

    use super::super::super::session::test::MockCloud;
    use super::NewFloatingIp;

    fn fip_json(port: &str) -> String {
        format!(
            r#"{{"floatingip": {{"id": "f1", "floating_ip_address": "172.16.0.130",
                 "floating_network_id": "ext", "port_id": {}, "status": "DOWN"}}}}"#,
            port
        )
    }

    #[test]
    fn test_floating_ip_lifecycle() {
        let cloud = MockCloud::start(|method, path, body| match (method, path) {
            ("POST", "/network/v2.0/floatingips") => {
                assert_eq!(body, r#"{"floatingip":{"floating_network_id":"ext"}}"#);
                (201, fip_json("null"))
            }
            ("PUT", "/network/v2.0/floatingips/f1") => {
                assert_eq!(body, r#"{"floatingip":{"port_id":"p1"}}"#);
                (200, fip_json(r#""p1""#))
            }
            ("DELETE", "/network/v2.0/floatingips/f1") => (204, String::new()),
            ("GET", "/network/v2.0/floatingips/f1") => (404, String::from("{}")),
            _ => (400, String::from("unexpected request")),
        });

        let mut fip = NewFloatingIp::new(cloud.session(), "ext".into())
            .create()
            .unwrap();
        assert!(!fip.is_associated());
        assert_eq!(fip.floating_ip_address().to_string(), "172.16.0.130");
        fip.associate("p1").unwrap();
        assert_eq!(fip.port_id().as_deref(), Some("p1"));
        fip.delete()
            .unwrap()
            .with_delay(Duration::from_millis(10))
            .wait()
            .unwrap();
    }
}
