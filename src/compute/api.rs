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

//! Foundation bits exposing the Compute API.

use std::fmt::Debug;

use serde::Serialize;

use super::super::service::COMPUTE;
use super::super::session::Session;
use super::super::Result;
use super::protocol::*;

/// Add a security group to a server.
pub fn add_security_group<S1, S2>(session: &Session, server_id: S1, group_name: S2) -> Result<()>
where
    S1: AsRef<str>,
    S2: Into<String>,
{
    let body = AddSecurityGroupRoot {
        addSecurityGroup: AddSecurityGroup {
            name: group_name.into(),
        },
    };
    trace!(
        "Adding security group {} to server {}",
        body.addSecurityGroup.name,
        server_id.as_ref()
    );
    session.post_no_content(COMPUTE, &["servers", server_id.as_ref(), "action"], &body)?;
    debug!(
        "Added security group {} to server {}",
        body.addSecurityGroup.name,
        server_id.as_ref()
    );
    Ok(())
}

/// Create a flavor.
pub fn create_flavor(session: &Session, request: FlavorCreate) -> Result<Flavor> {
    debug!("Creating a flavor with {:?}", request);
    let body = FlavorCreateRoot { flavor: request };
    let root: FlavorRoot = session.post_json(COMPUTE, &["flavors"], &body)?;
    debug!("Created flavor {:?}", root.flavor);
    Ok(root.flavor)
}

/// Create a server.
pub fn create_server(session: &Session, request: ServerCreate) -> Result<String> {
    debug!("Creating a server with {:?}", request);
    let body = ServerCreateRoot { server: request };
    let root: CreatedServerRoot = session.post_json(COMPUTE, &["servers"], &body)?;
    trace!("Requested creation of server {}", root.server.id);
    Ok(root.server.id)
}

/// Delete a flavor.
pub fn delete_flavor<S: AsRef<str>>(session: &Session, id: S) -> Result<()> {
    debug!("Deleting flavor {}", id.as_ref());
    session.delete(COMPUTE, &["flavors", id.as_ref()])?;
    debug!("Flavor {} was deleted", id.as_ref());
    Ok(())
}

/// Delete a server.
pub fn delete_server<S: AsRef<str>>(session: &Session, id: S) -> Result<()> {
    debug!("Deleting server {}", id.as_ref());
    session.delete(COMPUTE, &["servers", id.as_ref()])?;
    debug!("Successfully requested deletion of server {}", id.as_ref());
    Ok(())
}

/// Get a flavor by its ID.
pub fn get_flavor<S: AsRef<str>>(session: &Session, id: S) -> Result<Flavor> {
    trace!("Get compute flavor {}", id.as_ref());
    let root: FlavorRoot = session.get_json(COMPUTE, &["flavors", id.as_ref()])?;
    trace!("Received {:?}", root.flavor);
    Ok(root.flavor)
}

/// Get a server by its ID.
pub fn get_server<S: AsRef<str>>(session: &Session, id: S) -> Result<Server> {
    trace!("Get compute server {}", id.as_ref());
    let root: ServerRoot = session.get_json(COMPUTE, &["servers", id.as_ref()])?;
    trace!("Received {:?}", root.server);
    Ok(root.server)
}

/// List flavors with details.
pub fn list_flavors<Q: Serialize + Debug>(session: &Session, query: &Q) -> Result<Vec<Flavor>> {
    trace!("Listing compute flavors with {:?}", query);
    let root: FlavorsRoot = session.get_json_query(COMPUTE, &["flavors", "detail"], query)?;
    trace!("Received flavors: {:?}", root.flavors);
    Ok(root.flavors)
}
