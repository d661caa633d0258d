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

//! Port listing via Network API.

use std::rc::Rc;

use super::super::session::Session;
use super::super::utils::{self, Query};
use super::super::Result;
use super::{api, protocol};

/// A query to port list.
#[derive(Clone, Debug)]
pub struct PortQuery {
    session: Rc<Session>,
    query: Query,
}

/// Structure representing a port.
#[derive(Clone, Debug)]
pub struct Port {
    inner: protocol::Port,
}

impl Port {
    transparent_property! {
        #[doc = "ID of the owning device (if any)."]
        device_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Fixed IP addresses of the port."]
        fixed_ips: ref Vec<protocol::PortIpAddress>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "MAC address of the port."]
        mac_address: ref String
    }

    transparent_property! {
        #[doc = "ID of the network this port belongs to."]
        network_id: ref String
    }

    transparent_property! {
        #[doc = "Port status."]
        status: protocol::NetworkStatus
    }
}

impl PortQuery {
    pub(crate) fn new(session: Rc<Session>) -> PortQuery {
        PortQuery {
            session,
            query: Query::new(),
        }
    }

    query_filter! {
        #[doc = "Filter by the owning device, for example a server ID."]
        with_device_id -> device_id
    }

    query_filter! {
        #[doc = "Filter by network ID."]
        with_network_id -> network_id
    }

    /// Execute this request and return all results.
    pub fn all(self) -> Result<Vec<Port>> {
        debug!("Fetching ports with {:?}", self.query);
        Ok(api::list_ports(&self.session, &self.query.0)?
            .into_iter()
            .map(|inner| Port { inner })
            .collect())
    }

    /// Return one and exactly one result.
    ///
    /// Fails with `ResourceNotFound` if the query produces no results and
    /// with `TooManyItems` if the query produces more than one result.
    pub fn one(self) -> Result<Port> {
        debug!("Fetching one port with {:?}", self.query);
        utils::one(
            self.all()?,
            "Port with given filters not found",
            "Too many ports found with given filters",
        )
    }
}
