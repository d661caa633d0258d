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

//! Foundation bits exposing the Orchestration API.

use std::fmt::Debug;

use serde::Serialize;

use super::super::service::ORCHESTRATION;
use super::super::session::Session;
use super::super::Result;
use super::protocol::*;

/// Create a stack.
pub fn create_stack(session: &Session, request: StackCreate) -> Result<String> {
    debug!("Creating a stack {}", request.stack_name);
    let root: StackCreatedRoot = session.post_json(ORCHESTRATION, &["stacks"], &request)?;
    trace!("Requested creation of stack {}", root.stack.id);
    Ok(root.stack.id)
}

/// Delete a stack.
pub fn delete_stack<S1, S2>(session: &Session, name: S1, id: S2) -> Result<()>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    debug!("Deleting stack {} ({})", name.as_ref(), id.as_ref());
    session.delete(ORCHESTRATION, &["stacks", name.as_ref(), id.as_ref()])?;
    debug!("Stack {} was scheduled for deletion", id.as_ref());
    Ok(())
}

/// Get a stack by its name or ID.
pub fn get_stack<S: AsRef<str>>(session: &Session, name_or_id: S) -> Result<Stack> {
    trace!("Fetching stack {}", name_or_id.as_ref());
    let root: StackRoot = session.get_json(ORCHESTRATION, &["stacks", name_or_id.as_ref()])?;
    trace!("Received {:?}", root.stack);
    Ok(root.stack)
}

/// Get a stack by both its name and ID, skipping the redirect.
pub fn get_stack_by_name_and_id<S1, S2>(session: &Session, name: S1, id: S2) -> Result<Stack>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    trace!("Fetching stack {}/{}", name.as_ref(), id.as_ref());
    let root: StackRoot =
        session.get_json(ORCHESTRATION, &["stacks", name.as_ref(), id.as_ref()])?;
    trace!("Received {:?}", root.stack);
    Ok(root.stack)
}

/// List stacks.
pub fn list_stacks<Q: Serialize + Debug>(session: &Session, query: &Q) -> Result<Vec<Stack>> {
    trace!("Listing stacks with {:?}", query);
    let root: StacksRoot = session.get_json_query(ORCHESTRATION, &["stacks"], query)?;
    trace!("Received stacks: {:?}", root.stacks);
    Ok(root.stacks)
}
