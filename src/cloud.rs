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

//! Cloud API.

use std::rc::Rc;
use std::time::Duration;

use waiter::Waiter;

use super::auth::{self, CloudConfig};
use super::compute::{Flavor, FlavorQuery, NewFlavor, NewServer, Server};
use super::image::{Image, ImageQuery, NewImage};
use super::network::{
    FloatingIp, NetworkQuery, NewFloatingIp, NewSecurityGroup, PortQuery, SecurityGroup,
};
use super::orchestration::{NewStack, Stack, StackQuery, StackStatus};
use super::session::Session;
use super::{ErrorKind, Result};

/// OpenStack cloud API.
///
/// Provides high-level API for working with OpenStack clouds. All objects
/// returned from a `Cloud` share its session.
#[derive(Debug, Clone)]
pub struct Cloud {
    session: Rc<Session>,
}

impl Cloud {
    /// Create a new cloud object with a given configuration.
    ///
    /// See [`auth` module](auth/index.html) for details on how to authenticate
    /// against OpenStack clouds.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// fn cloud() -> mos_tests::Result<mos_tests::Cloud> {
    ///     let auth = mos_tests::auth::Password::new(
    ///             "https://cloud.example.com",
    ///             "user1", "pa$$word", "Default")
    ///         .with_project_scope("project1", "Default");
    ///     mos_tests::Cloud::new(mos_tests::auth::CloudConfig::new(auth))
    /// }
    ///
    /// # fn main() { cloud().unwrap(); }
    /// ```
    ///
    /// # See Also
    ///
    /// * [from_config](#method.from_config) to create a Cloud from clouds.yaml
    /// * [from_env](#method.from_env) to create a Cloud from environment variables
    pub fn new(config: CloudConfig) -> Result<Cloud> {
        Ok(Cloud {
            session: Rc::new(Session::new(config)?),
        })
    }

    /// Create a new cloud object from a configuration file
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # fn cloud_from_config() -> mos_tests::Result<()> {
    /// let os = mos_tests::Cloud::from_config("cloud-1")?;
    /// # Ok(()) }
    /// # fn main() { cloud_from_config().unwrap(); }
    /// ```
    pub fn from_config<S: AsRef<str>>(cloud_name: S) -> Result<Cloud> {
        Cloud::new(auth::from_config(cloud_name)?)
    }

    /// Create a new cloud object from environment variables.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # fn cloud_from_env() -> mos_tests::Result<()> {
    /// let os = mos_tests::Cloud::from_env()?;
    /// # Ok(()) }
    /// # fn main() { cloud_from_env().unwrap(); }
    /// ```
    pub fn from_env() -> Result<Cloud> {
        Cloud::new(auth::from_env()?)
    }

    #[cfg(test)]
    pub(crate) fn from_session(session: Rc<Session>) -> Cloud {
        Cloud { session }
    }

    /// Refresh this `Cloud` object (renew token, refetch service catalog, etc).
    pub fn refresh(&self) -> Result<()> {
        self.session.refresh()
    }

    /// Delete a stack by its name and wait for it to disappear.
    ///
    /// Does nothing if no such stack exists.
    pub fn clean_stack<S: AsRef<str>>(&self, name: S) -> Result<()> {
        let name = name.as_ref();
        let stack = match self.get_stack(name) {
            Ok(stack) => stack,
            Err(ref e) if e.kind() == ErrorKind::ResourceNotFound => {
                debug!("Stack {} does not exist, nothing to clean", name);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        debug!("Removing stack {} ({})", name, stack.id());
        match stack.delete() {
            Ok(waiter) => waiter.wait(),
            Err(ref e) if e.kind() == ErrorKind::ResourceNotFound => {
                debug!("Stack {} disappeared before deletion", name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Build a query against flavor list.
    ///
    /// The returned object is a builder that should be used to construct
    /// the query.
    pub fn find_flavors(&self) -> FlavorQuery {
        FlavorQuery::new(self.session.clone())
    }

    /// Build a query against image list.
    ///
    /// The returned object is a builder that should be used to construct
    /// the query.
    pub fn find_images(&self) -> ImageQuery {
        ImageQuery::new(self.session.clone())
    }

    /// Build a query against network list.
    ///
    /// The returned object is a builder that should be used to construct
    /// the query.
    pub fn find_networks(&self) -> NetworkQuery {
        NetworkQuery::new(self.session.clone())
    }

    /// Build a query against port list.
    ///
    /// The returned object is a builder that should be used to construct
    /// the query.
    pub fn find_ports(&self) -> PortQuery {
        PortQuery::new(self.session.clone())
    }

    /// Build a query against stack list.
    ///
    /// The returned object is a builder that should be used to construct
    /// the query.
    pub fn find_stacks(&self) -> StackQuery {
        StackQuery::new(self.session.clone())
    }

    /// Find a flavor by its ID.
    pub fn get_flavor<Id: AsRef<str>>(&self, id: Id) -> Result<Flavor> {
        Flavor::load(self.session.clone(), id)
    }

    /// Find a floating IP by its ID.
    pub fn get_floating_ip<Id: AsRef<str>>(&self, id: Id) -> Result<FloatingIp> {
        FloatingIp::load(self.session.clone(), id)
    }

    /// Find an image by its ID.
    pub fn get_image<Id: AsRef<str>>(&self, id: Id) -> Result<Image> {
        Image::load(self.session.clone(), id)
    }

    /// Find a security group by its ID.
    pub fn get_security_group<Id: AsRef<str>>(&self, id: Id) -> Result<SecurityGroup> {
        SecurityGroup::load(self.session.clone(), id)
    }

    /// Find a server by its ID.
    pub fn get_server<Id: AsRef<str>>(&self, id: Id) -> Result<Server> {
        Server::load(self.session.clone(), id)
    }

    /// Find a stack by its name or ID.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let os = mos_tests::Cloud::from_env().expect("Unable to authenticate");
    /// let stack = os.get_stack("MyTestSystem").expect("Unable to get a stack");
    /// ```
    pub fn get_stack<Id: AsRef<str>>(&self, id_or_name: Id) -> Result<Stack> {
        Stack::load(self.session.clone(), id_or_name)
    }

    /// Prepare a new flavor for creation.
    pub fn new_flavor<S: Into<String>>(&self, name: S, ram: u64, vcpus: u32) -> NewFlavor {
        NewFlavor::new(self.session.clone(), name.into(), ram, vcpus)
    }

    /// Prepare a new floating IP for creation on an external network.
    pub fn new_floating_ip<S: Into<String>>(&self, floating_network_id: S) -> NewFloatingIp {
        NewFloatingIp::new(self.session.clone(), floating_network_id.into())
    }

    /// Prepare a new image for creation.
    ///
    /// The image record is created first, its data is uploaded separately.
    pub fn new_image<S: Into<String>>(&self, name: S) -> NewImage {
        NewImage::new(self.session.clone(), name.into())
    }

    /// Prepare a new security group for creation.
    pub fn new_security_group<S: Into<String>>(&self, name: S) -> NewSecurityGroup {
        NewSecurityGroup::new(self.session.clone(), name.into())
    }

    /// Prepare a new server for creation.
    ///
    /// This call returns a `NewServer` object, which is a builder to populate
    /// server fields.
    pub fn new_server<S1, S2, S3>(&self, name: S1, flavor: S2, image: S3) -> NewServer
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        NewServer::new(self.session.clone(), name.into(), flavor.into(), image.into())
    }

    /// Prepare a new stack for creation.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let os = mos_tests::Cloud::from_env().expect("Unable to authenticate");
    /// let template = mos_tests::orchestration::read_template("templates", "empty_heat_template.yaml")
    ///     .expect("Cannot read template");
    /// let stack = os
    ///     .new_stack("MyTestSystem", template)
    ///     .create_and_wait()
    ///     .expect("Cannot create a stack");
    /// ```
    pub fn new_stack<S1, S2>(&self, name: S1, template: S2) -> NewStack
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        NewStack::new(self.session.clone(), name.into(), template.into())
    }

    /// Check whether a stack with exactly this name exists.
    pub fn stack_exists<S: AsRef<str>>(&self, name: S) -> Result<bool> {
        let name = name.as_ref();
        let exists = self
            .find_stacks()
            .with_name(name)
            .all()?
            .iter()
            .any(|stack| stack.name() == name);
        debug!("Stack {} exists: {}", name, exists);
        Ok(exists)
    }

    /// Wait for a stack to reach the given status.
    ///
    /// The stack is looked up by name. Fails with `ResourceNotFound` if it
    /// does not exist and with `OperationTimedOut` if the status is not
    /// reached in `timeout_minutes`.
    pub fn wait_for_stack_status<S: AsRef<str>>(
        &self,
        name: S,
        expected: StackStatus,
        timeout_minutes: u64,
    ) -> Result<Stack> {
        let stack = self.get_stack(name)?;
        debug!(
            "Waiting up to {} minute(s) for stack {} to reach {}",
            timeout_minutes,
            stack.name(),
            expected
        );
        stack
            .wait_for_status(expected, Duration::from_secs(timeout_minutes * 60))
            .wait()
    }
}
