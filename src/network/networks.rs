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

//! Network listing via Network API.

use std::rc::Rc;

use super::super::session::Session;
use super::super::utils::{self, Query};
use super::super::Result;
use super::{api, protocol};

/// A query to network list.
#[derive(Clone, Debug)]
pub struct NetworkQuery {
    session: Rc<Session>,
    query: Query,
}

/// Structure representing a single network.
#[derive(Clone, Debug)]
pub struct Network {
    inner: protocol::Network,
}

impl Network {
    transparent_property! {
        #[doc = "Whether the network is external (if available)."]
        external: Option<bool>
    }

    /// Whether the network is external, treating unknown as not external.
    pub fn is_external(&self) -> bool {
        self.inner.external.unwrap_or(false)
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Network name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "Network status (if available)."]
        status: Option<protocol::NetworkStatus>
    }

    transparent_property! {
        #[doc = "IDs of subnets of this network."]
        subnets: ref Vec<String>
    }
}

impl NetworkQuery {
    pub(crate) fn new(session: Rc<Session>) -> NetworkQuery {
        NetworkQuery {
            session,
            query: Query::new(),
        }
    }

    query_filter! {
        #[doc = "Filter by network name."]
        with_name -> name
    }

    /// Filter by whether the network is external.
    pub fn with_external(mut self, value: bool) -> Self {
        self.query.push("router:external", value);
        self
    }

    /// Execute this request and return all results.
    pub fn all(self) -> Result<Vec<Network>> {
        debug!("Fetching networks with {:?}", self.query);
        Ok(api::list_networks(&self.session, &self.query.0)?
            .into_iter()
            .map(|inner| Network { inner })
            .collect())
    }

    /// Return one and exactly one result.
    ///
    /// Fails with `ResourceNotFound` if the query produces no results and
    /// with `TooManyItems` if the query produces more than one result.
    pub fn one(self) -> Result<Network> {
        debug!("Fetching one network with {:?}", self.query);
        utils::one(
            self.all()?,
            "Network with given filters not found",
            "Too many networks found with given filters",
        )
    }
}

#[cfg(test)]
mod test {
    use super::super::super::session::test::MockCloud;
    use super::super::super::ErrorKind;
    use super::NetworkQuery;

    #[test]
    fn test_external_networks() {
        let cloud = MockCloud::start(|_, path, _| {
            assert_eq!(path, "/network/v2.0/networks?router%3Aexternal=true");
            (
                200,
                String::from(
                    r#"{"networks": [{"id": "n2", "name": "admin_floating_net",
                        "router:external": true, "status": "ACTIVE"}]}"#,
                ),
            )
        });
        let network = NetworkQuery::new(cloud.session()).with_external(true).one().unwrap();
        assert_eq!(network.id(), "n2");
        assert!(network.is_external());
    }

    #[test]
    fn test_no_networks() {
        let cloud = MockCloud::start(|_, _, _| (200, String::from(r#"{"networks": []}"#)));
        let err = NetworkQuery::new(cloud.session())
            .with_name("missing")
            .one()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }
}
