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

//! Stack management via Orchestration API.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use waiter::{Waiter, WaiterCurrentState};

use super::super::common::{DeletionWaiter, Refresh, StatusWaiter, TrackedResource, DEFAULT_DELAY};
use super::super::session::Session;
use super::super::utils::{self, Query};
use super::super::{Error, Result};
use super::{api, protocol};

/// Time budget for stack creation and deletion.
pub const STACK_TIMEOUT: Duration = Duration::from_secs(600);

/// Default budget, in minutes, for waiting on an arbitrary stack status.
pub const STACK_STATUS_TIMEOUT_MINUTES: u64 = 60;

/// Structure representing a single stack.
#[derive(Clone, Debug)]
pub struct Stack {
    session: Rc<Session>,
    inner: protocol::Stack,
}

/// A query to stack list.
#[derive(Clone, Debug)]
pub struct StackQuery {
    session: Rc<Session>,
    query: Query,
}

/// A request to create a stack.
#[derive(Clone, Debug)]
pub struct NewStack {
    session: Rc<Session>,
    name: String,
    template: String,
    parameters: HashMap<String, serde_json::Value>,
    environment: Option<String>,
    timeout_mins: Option<u32>,
    disable_rollback: bool,
}

/// Waiter for a stack to be created.
#[derive(Debug)]
pub struct StackCreationWaiter {
    inner: StatusWaiter<Stack>,
}

impl Stack {
    /// Create a new Stack object.
    pub(crate) fn new(session: Rc<Session>, inner: protocol::Stack) -> Stack {
        Stack { session, inner }
    }

    /// Load a Stack object by its name or ID.
    pub(crate) fn load<Id: AsRef<str>>(session: Rc<Session>, id: Id) -> Result<Stack> {
        let inner = api::get_stack(&session, id)?;
        Ok(Stack::new(session, inner))
    }

    transparent_property! {
        #[doc = "Creation date and time (if known)."]
        creation_time: Option<DateTime<FixedOffset>>
    }

    transparent_property! {
        #[doc = "Stack description."]
        description: ref Option<String>
    }

    transparent_property! {
        #[doc = "Stack unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Stack name."]
        name: ref String
    }

    /// Stack status.
    #[inline]
    pub fn status(&self) -> protocol::StackStatus {
        self.inner.status.parsed
    }

    /// Stack status exactly as reported by the service.
    #[inline]
    pub fn status_text(&self) -> &str {
        &self.inner.status.text
    }

    transparent_property! {
        #[doc = "Explanation of the current status."]
        status_reason: ref Option<String>
    }

    transparent_property! {
        #[doc = "Last update date and time (if any)."]
        updated_time: Option<DateTime<FixedOffset>>
    }

    /// Wait for the stack to reach the given status.
    ///
    /// The waiter keeps polling while the stack is in progress and fails
    /// as soon as it settles in a different status.
    pub fn wait_for_status(
        self,
        target: protocol::StackStatus,
        timeout: Duration,
    ) -> StatusWaiter<Stack> {
        StatusWaiter::new(self, target, timeout, DEFAULT_DELAY)
    }

    /// Delete the stack.
    pub fn delete(self) -> Result<DeletionWaiter<Stack>> {
        api::delete_stack(&self.session, &self.inner.name, &self.inner.id)?;
        Ok(DeletionWaiter::new(self, STACK_TIMEOUT, DEFAULT_DELAY))
    }
}

impl Refresh for Stack {
    /// Refresh the stack.
    fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_stack_by_name_and_id(&self.session, &self.inner.name, &self.inner.id)?;
        Ok(())
    }
}

impl TrackedResource for Stack {
    type Status = protocol::StackStatus;

    const KIND: &'static str = "stack";

    fn resource_id(&self) -> &str {
        &self.inner.id
    }

    fn resource_status(&self) -> protocol::StackStatus {
        self.inner.status.parsed
    }

    fn status_text(&self) -> String {
        self.inner.status.text.clone()
    }
}

impl StackQuery {
    pub(crate) fn new(session: Rc<Session>) -> StackQuery {
        StackQuery {
            session,
            query: Query::new(),
        }
    }

    query_filter! {
        #[doc = "Filter by stack name."]
        with_name -> name
    }

    query_filter! {
        #[doc = "Filter by stack status."]
        with_status -> status: protocol::StackStatus
    }

    query_filter! {
        #[doc = "Limit the number of stacks returned."]
        with_limit -> limit: usize
    }

    /// Execute this request and return all results.
    pub fn all(self) -> Result<Vec<Stack>> {
        debug!("Fetching stacks with {:?}", self.query);
        let session = self.session;
        Ok(api::list_stacks(&session, &self.query.0)?
            .into_iter()
            .map(|item| Stack::new(session.clone(), item))
            .collect())
    }

    /// Return one and exactly one result.
    ///
    /// Fails with `ResourceNotFound` if the query produces no results and
    /// with `TooManyItems` if the query produces more than one result.
    pub fn one(self) -> Result<Stack> {
        debug!("Fetching one stack with {:?}", self.query);
        utils::one(
            self.all()?,
            "Stack with given filters not found",
            "Too many stacks found with given filters",
        )
    }
}

impl NewStack {
    /// Start creating a stack.
    pub(crate) fn new(session: Rc<Session>, name: String, template: String) -> NewStack {
        NewStack {
            session,
            name,
            template,
            parameters: HashMap::new(),
            environment: None,
            timeout_mins: None,
            disable_rollback: true,
        }
    }

    /// Request creation of the stack.
    pub fn create(self) -> Result<StackCreationWaiter> {
        let request = protocol::StackCreate {
            stack_name: self.name,
            template: self.template,
            parameters: self.parameters,
            environment: self.environment,
            timeout_mins: self.timeout_mins,
            disable_rollback: self.disable_rollback,
        };

        let name = request.stack_name.clone();
        let id = api::create_stack(&self.session, request)?;
        let inner = api::get_stack_by_name_and_id(&self.session, &name, &id)?;
        Ok(StackCreationWaiter {
            inner: Stack::new(self.session, inner).wait_for_status(
                protocol::StackStatus::CREATE_COMPLETE,
                STACK_TIMEOUT,
            ),
        })
    }

    /// Create the stack and wait for `CREATE_COMPLETE`.
    pub fn create_and_wait(self) -> Result<Stack> {
        self.create()?.wait()
    }

    /// Add a template parameter.
    pub fn with_parameter<K, V>(mut self, key: K, value: V) -> NewStack
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        let _ = self.parameters.insert(key.into(), value.into());
        self
    }

    /// Set the environment (in YAML or JSON).
    pub fn with_environment<S: Into<String>>(mut self, environment: S) -> NewStack {
        self.environment = Some(environment.into());
        self
    }

    /// Set the server-side timeout in minutes.
    pub fn with_timeout_mins(mut self, timeout_mins: u32) -> NewStack {
        self.timeout_mins = Some(timeout_mins);
        self
    }

    /// Whether to disable rollback on failure (the default).
    pub fn with_disable_rollback(mut self, disable_rollback: bool) -> NewStack {
        self.disable_rollback = disable_rollback;
        self
    }
}

impl StackCreationWaiter {
    /// Current state of the stack.
    pub fn current_state(&self) -> &Stack {
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

impl Waiter<Stack, Error> for StackCreationWaiter {
    fn default_wait_timeout(&self) -> Option<Duration> {
        self.inner.default_wait_timeout()
    }

    fn default_delay(&self) -> Duration {
        self.inner.default_delay()
    }

    fn timeout_error(&self) -> Error {
        self.inner.timeout_error()
    }

    fn poll(&mut self) -> Result<Option<Stack>> {
        self.inner.poll()
    }
}

impl WaiterCurrentState<Stack> for StackCreationWaiter {
    fn waiter_current_state(&self) -> &Stack {
        self.current_state()
    }
}
