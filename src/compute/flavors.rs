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

//! Flavor management via Compute API.

use std::rc::Rc;

use super::super::common::Refresh;
use super::super::session::Session;
use super::super::utils::Query;
use super::super::Result;
use super::{api, protocol};

/// Structure representing a flavor.
#[derive(Clone, Debug)]
pub struct Flavor {
    session: Rc<Session>,
    inner: protocol::Flavor,
}

/// A query to flavor list.
#[derive(Clone, Debug)]
pub struct FlavorQuery {
    session: Rc<Session>,
    query: Query,
}

/// A request to create a flavor.
#[derive(Clone, Debug)]
pub struct NewFlavor {
    session: Rc<Session>,
    inner: protocol::FlavorCreate,
}

impl Flavor {
    /// Create a flavor object.
    pub(crate) fn new(session: Rc<Session>, inner: protocol::Flavor) -> Flavor {
        Flavor { session, inner }
    }

    /// Load a Flavor object.
    pub(crate) fn load<Id: AsRef<str>>(session: Rc<Session>, id: Id) -> Result<Flavor> {
        let inner = api::get_flavor(&session, id)?;
        Ok(Flavor::new(session, inner))
    }

    transparent_property! {
        #[doc = "Root disk size in GiB."]
        disk: u64
    }

    transparent_property! {
        #[doc = "Flavor unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Flavor name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "RAM size in MiB."]
        ram: u64
    }

    transparent_property! {
        #[doc = "VCPU count."]
        vcpus: u32
    }

    /// Start creating a copy of this flavor with a new name.
    pub fn copy<S: Into<String>>(&self, name: S) -> NewFlavor {
        NewFlavor::new(self.session.clone(), name.into(), self.inner.ram, self.inner.vcpus)
            .with_disk(self.inner.disk)
    }

    /// Delete the flavor.
    pub fn delete(self) -> Result<()> {
        api::delete_flavor(&self.session, &self.inner.id)
    }
}

impl Refresh for Flavor {
    /// Refresh the flavor.
    fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_flavor(&self.session, &self.inner.id)?;
        Ok(())
    }
}

impl FlavorQuery {
    pub(crate) fn new(session: Rc<Session>) -> FlavorQuery {
        FlavorQuery {
            session,
            query: Query::new(),
        }
    }

    query_filter! {
        #[doc = "Filter by minimum RAM in MiB."]
        with_min_ram -> minRam: u64
    }

    query_filter! {
        #[doc = "Filter by minimum disk size in GiB."]
        with_min_disk -> minDisk: u64
    }

    /// Execute this request and return all results.
    pub fn all(self) -> Result<Vec<Flavor>> {
        debug!("Fetching flavors with {:?}", self.query);
        let session = self.session;
        Ok(api::list_flavors(&session, &self.query.0)?
            .into_iter()
            .map(|item| Flavor::new(session.clone(), item))
            .collect())
    }
}

impl NewFlavor {
    /// Start creating a flavor.
    pub(crate) fn new(session: Rc<Session>, name: String, ram: u64, vcpus: u32) -> NewFlavor {
        NewFlavor {
            session,
            inner: protocol::FlavorCreate {
                name,
                ram,
                vcpus,
                disk: 0,
                id: None,
            },
        }
    }

    /// Request creation of the flavor.
    pub fn create(self) -> Result<Flavor> {
        let inner = api::create_flavor(&self.session, self.inner)?;
        Ok(Flavor::new(self.session, inner))
    }

    /// Set the root disk size in GiB.
    pub fn with_disk(mut self, disk: u64) -> NewFlavor {
        self.inner.disk = disk;
        self
    }

    /// Set an explicit ID instead of a generated one.
    pub fn with_id<S: Into<String>>(mut self, id: S) -> NewFlavor {
        self.inner.id = Some(id.into());
        self
    }

    /// Set the RAM size in MiB.
    pub fn with_ram(mut self, ram: u64) -> NewFlavor {
        self.inner.ram = ram;
        self
    }

    /// Set the VCPU count.
    pub fn with_vcpus(mut self, vcpus: u32) -> NewFlavor {
        self.inner.vcpus = vcpus;
        self
    }
}

#[cfg(test)]
mod test {
    use super::super::super::session::test::MockCloud;
    use super::{Flavor, FlavorQuery};

    const FLAVORS: &str = r#"{"flavors": [
        {"id": "1", "name": "m1.tiny", "ram": 512, "vcpus": 1, "disk": 1},
        {"id": "3", "name": "m1.medium", "ram": 4096, "vcpus": 2, "disk": 40}
    ]}"#;

    #[test]
    fn test_list_flavors() {
        let cloud = MockCloud::start(|_, path, _| {
            assert_eq!(path, "/compute/v2.1/flavors/detail?minRam=512");
            (200, String::from(FLAVORS))
        });
        let flavors = FlavorQuery::new(cloud.session()).with_min_ram(512).all().unwrap();
        assert_eq!(flavors.len(), 2);
        assert_eq!(flavors[1].name(), "m1.medium");
        assert_eq!(flavors[1].ram(), 4096);
        assert_eq!(flavors[1].disk(), 40);
    }

    #[test]
    fn test_copy_flavor() {
        let cloud = MockCloud::start(|method, path, body| match (method, path) {
            ("GET", "/compute/v2.1/flavors/3") => (
                200,
                String::from(
                    r#"{"flavor": {"id": "3", "name": "m1.medium", "ram": 4096, "vcpus": 2, "disk": 40}}"#,
                ),
            ),
            ("POST", "/compute/v2.1/flavors") => {
                let value: serde_json::Value = serde_json::from_str(body).unwrap();
                let flavor = &value["flavor"];
                assert_eq!(flavor["name"], "copy.of.m1.medium");
                assert_eq!(flavor["vcpus"], 1);
                assert_eq!(flavor["ram"], 4096);
                assert_eq!(flavor["disk"], 40);
                (
                    200,
                    String::from(
                        r#"{"flavor": {"id": "42", "name": "copy.of.m1.medium", "ram": 4096, "vcpus": 1, "disk": 40}}"#,
                    ),
                )
            }
            ("DELETE", "/compute/v2.1/flavors/42") => (202, String::new()),
            _ => (400, String::from("unexpected request")),
        });

        let medium = Flavor::load(cloud.session(), "3").unwrap();
        let copy = medium.copy("copy.of.m1.medium").with_vcpus(1).create().unwrap();
        assert_eq!(copy.id(), "42");
        assert_eq!(copy.vcpus(), 1);
        copy.delete().unwrap();
        assert_eq!(
            cloud.requests().last().map(String::as_str),
            Some("DELETE /compute/v2.1/flavors/42")
        );
    }
}
