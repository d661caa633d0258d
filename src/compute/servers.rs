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

//! Server management via Compute API.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use waiter::{Waiter, WaiterCurrentState};

use super::super::common::{DeletionWaiter, Refresh, StatusWaiter, TrackedResource, DEFAULT_DELAY};
use super::super::session::Session;
use super::super::{Error, Result};
use super::{api, protocol};

/// Time budget for a server to boot.
pub const SERVER_BOOT_TIMEOUT: Duration = Duration::from_secs(1200);

/// Delay between polls while a server is booting.
pub const SERVER_BOOT_DELAY: Duration = Duration::from_secs(5);

const SERVER_DELETE_TIMEOUT: Duration = Duration::from_secs(300);

/// Structure representing a single server.
#[derive(Clone, Debug)]
pub struct Server {
    session: Rc<Session>,
    inner: protocol::Server,
}

/// A request to create a server.
#[derive(Clone, Debug)]
pub struct NewServer {
    session: Rc<Session>,
    name: String,
    flavor: String,
    image: String,
    networks: Vec<String>,
}

/// Waiter for server to be created.
///
/// Polls every 5 seconds while the server is building and fails unless
/// the server becomes `ACTIVE`.
#[derive(Debug)]
pub struct ServerCreationWaiter {
    inner: StatusWaiter<Server>,
}

impl Server {
    /// Create a new Server object.
    pub(crate) fn new(session: Rc<Session>, inner: protocol::Server) -> Server {
        Server { session, inner }
    }

    /// Load a Server object.
    pub(crate) fn load<Id: AsRef<str>>(session: Rc<Session>, id: Id) -> Result<Server> {
        let inner = api::get_server(&session, id)?;
        Ok(Server::new(session, inner))
    }

    transparent_property! {
        #[doc = "IPv4 and IPv6 addresses by network name."]
        addresses: ref HashMap<String, Vec<protocol::ServerAddress>>
    }

    /// ID of the flavor used to create this server (if known).
    pub fn flavor_id(&self) -> Option<&str> {
        self.inner.flavor.as_ref().map(|f| f.id.as_str())
    }

    transparent_property! {
        #[doc = "Server unique ID."]
        id: ref String
    }

    /// ID of the image used to create this server (if any).
    pub fn image_id(&self) -> Option<&str> {
        self.inner.image.as_ref().map(|i| i.id.as_str())
    }

    transparent_property! {
        #[doc = "Server name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "Server status."]
        status: protocol::ServerStatus
    }

    /// Add a security group (by name) to the server.
    pub fn add_security_group<S: Into<String>>(&self, group_name: S) -> Result<()> {
        api::add_security_group(&self.session, &self.inner.id, group_name)
    }

    /// Delete the server.
    pub fn delete(self) -> Result<DeletionWaiter<Server>> {
        api::delete_server(&self.session, &self.inner.id)?;
        Ok(DeletionWaiter::new(self, SERVER_DELETE_TIMEOUT, DEFAULT_DELAY))
    }
}

impl Refresh for Server {
    /// Refresh the server.
    fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_server(&self.session, &self.inner.id)?;
        Ok(())
    }
}

impl TrackedResource for Server {
    type Status = protocol::ServerStatus;

    const KIND: &'static str = "server";

    fn resource_id(&self) -> &str {
        &self.inner.id
    }

    fn resource_status(&self) -> protocol::ServerStatus {
        self.inner.status
    }
}

impl NewServer {
    /// Start creating a server.
    pub(crate) fn new(session: Rc<Session>, name: String, flavor: String, image: String) -> NewServer {
        NewServer {
            session,
            name,
            flavor,
            image,
            networks: Vec::new(),
        }
    }

    /// Request creation of the server.
    pub fn create(self) -> Result<ServerCreationWaiter> {
        let request = protocol::ServerCreate {
            flavorRef: self.flavor,
            imageRef: self.image,
            name: self.name,
            networks: self
                .networks
                .into_iter()
                .map(|uuid| protocol::ServerNetwork { uuid })
                .collect(),
        };

        let server_id = api::create_server(&self.session, request)?;
        Ok(ServerCreationWaiter {
            inner: StatusWaiter::new(
                Server::load(self.session, server_id)?,
                protocol::ServerStatus::Active,
                SERVER_BOOT_TIMEOUT,
                SERVER_BOOT_DELAY,
            ),
        })
    }

    /// Add a network (by ID) to attach the server to.
    pub fn add_network<S: Into<String>>(&mut self, network_id: S) {
        self.networks.push(network_id.into());
    }

    /// Add a network (by ID) to attach the server to.
    pub fn with_network<S: Into<String>>(mut self, network_id: S) -> NewServer {
        self.add_network(network_id);
        self
    }
}

impl ServerCreationWaiter {
    /// Current state of the server.
    pub fn current_state(&self) -> &Server {
        self.inner.waiter_current_state()
    }

    /// Override the delay between polls.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inner = self.inner.with_delay(delay);
        self
    }

    /// Override the wait timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.with_timeout(timeout);
        self
    }
}

impl Waiter<Server, Error> for ServerCreationWaiter {
    fn default_wait_timeout(&self) -> Option<Duration> {
        self.inner.default_wait_timeout()
    }

    fn default_delay(&self) -> Duration {
        self.inner.default_delay()
    }

    fn timeout_error(&self) -> Error {
        self.inner.timeout_error()
    }

    fn poll(&mut self) -> Result<Option<Server>> {
        self.inner.poll()
    }
}

impl WaiterCurrentState<Server> for ServerCreationWaiter {
    fn waiter_current_state(&self) -> &Server {
        self.current_state()
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use waiter::Waiter;

    use super::super::super::session::test::MockCloud;
    use super::super::super::ErrorKind;
    use super::super::protocol::ServerStatus;
    use super::{NewServer, Server, SERVER_BOOT_DELAY};

    fn server_json(status: &str) -> String {
        format!(
            r#"{{"server": {{"id": "srv1", "name": "vm", "status": "{}",
                 "flavor": {{"id": "3"}}, "image": {{"id": "img1"}},
                 "addresses": {{}}}}}}"#,
            status
        )
    }

    fn scripted_server(statuses: &'static [&'static str]) -> MockCloud {
        let polls = AtomicUsize::new(0);
        MockCloud::start(move |method, path, body| match (method, path) {
            ("POST", "/compute/v2.1/servers") => {
                assert!(body.contains(r#""flavorRef":"3""#));
                assert!(body.contains(r#""networks":[{"uuid":"net1"}]"#));
                (202, String::from(r#"{"server": {"id": "srv1"}}"#))
            }
            ("POST", "/compute/v2.1/servers/srv1/action") => (202, String::new()),
            ("DELETE", "/compute/v2.1/servers/srv1") => (204, String::new()),
            ("GET", "/compute/v2.1/servers/srv1") => {
                let idx = polls.fetch_add(1, Ordering::SeqCst).min(statuses.len() - 1);
                match statuses[idx] {
                    "" => (404, String::from(r#"{"itemNotFound": {}}"#)),
                    status => (200, server_json(status)),
                }
            }
            _ => (400, String::from("unexpected request")),
        })
    }

    fn new_server(cloud: &MockCloud) -> NewServer {
        NewServer::new(cloud.session(), "vm".into(), "3".into(), "img1".into()).with_network("net1")
    }

    #[test]
    fn test_server_boot() {
        let cloud = scripted_server(&["BUILD", "BUILD", "ACTIVE"]);
        let waiter = new_server(&cloud).create().unwrap();
        assert_eq!(waiter.default_delay(), SERVER_BOOT_DELAY);
        let server = waiter.with_delay(Duration::from_millis(10)).wait().unwrap();
        assert_eq!(server.status(), ServerStatus::Active);
        assert_eq!(server.flavor_id(), Some("3"));
        assert_eq!(server.image_id(), Some("img1"));
    }

    #[test]
    fn test_server_boot_error() {
        let cloud = scripted_server(&["BUILD", "ERROR"]);
        let err = new_server(&cloud)
            .create()
            .unwrap()
            .with_delay(Duration::from_millis(10))
            .wait()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert!(err.to_string().contains("ERROR"));
    }

    #[test]
    fn test_add_security_group() {
        let cloud = scripted_server(&["ACTIVE"]);
        let server = Server::load(cloud.session(), "srv1").unwrap();
        server.add_security_group("ms_compatibility").unwrap();
        assert!(cloud
            .requests()
            .contains(&String::from("POST /compute/v2.1/servers/srv1/action")));
    }

    #[test]
    fn test_delete_server() {
        let cloud = scripted_server(&["ACTIVE", "ACTIVE", ""]);
        let server = Server::load(cloud.session(), "srv1").unwrap();
        server
            .delete()
            .unwrap()
            .with_delay(Duration::from_millis(10))
            .wait()
            .unwrap();
    }

    #[test]
    fn test_delete_errored_server() {
        let cloud = scripted_server(&["ERROR", "ERROR", "ERROR", ""]);
        let server = Server::load(cloud.session(), "srv1").unwrap();
        assert_eq!(server.status(), ServerStatus::Error);
        server
            .delete()
            .unwrap()
            .with_delay(Duration::from_millis(10))
            .wait()
            .unwrap();
        assert!(cloud
            .requests()
            .contains(&String::from("DELETE /compute/v2.1/servers/srv1")));
    }
}
