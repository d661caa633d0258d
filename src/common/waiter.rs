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

//! Waiters.
//!
//! Both waiters implement `waiter::Waiter`: the deadline is checked between
//! polls only, so a wait may overrun its budget by up to one delay. Errors
//! from a refresh abort the wait immediately.

use std::time::Duration;

use waiter::{Waiter, WaiterCurrentState};

use super::super::{Error, ErrorKind, Result};
use super::{ResourceStatus, TrackedResource};

/// Delay between polls used by most waiters.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Wait for a resource to reach a status.
///
/// Polling continues while the status is in progress. Reaching the target
/// yields the refreshed resource, any other settled status yields an
/// `UnexpectedStatus` error.
#[derive(Debug)]
pub struct StatusWaiter<T: TrackedResource> {
    inner: T,
    target: T::Status,
    wait_timeout: Duration,
    delay: Duration,
}

/// Wait for resource deletion.
///
/// The resource is considered gone when refreshing it returns
/// `ResourceNotFound` or when it reports a deleted status.
#[derive(Debug)]
pub struct DeletionWaiter<T> {
    inner: T,
    wait_timeout: Duration,
    delay: Duration,
}

impl<T: TrackedResource> StatusWaiter<T> {
    /// Create a waiter for the given resource and target status.
    pub fn new(
        inner: T,
        target: T::Status,
        wait_timeout: Duration,
        delay: Duration,
    ) -> StatusWaiter<T> {
        StatusWaiter {
            inner,
            target,
            wait_timeout,
            delay,
        }
    }

    /// Status this waiter is waiting for.
    #[inline]
    pub fn target(&self) -> T::Status {
        self.target
    }

    /// Override the delay between polls.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Override the wait timeout.
    pub fn with_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }
}

impl<T: TrackedResource> WaiterCurrentState<T> for StatusWaiter<T> {
    fn waiter_current_state(&self) -> &T {
        &self.inner
    }
}

impl<T: TrackedResource + Clone> Waiter<T, Error> for StatusWaiter<T> {
    fn default_wait_timeout(&self) -> Option<Duration> {
        Some(self.wait_timeout)
    }

    fn default_delay(&self) -> Duration {
        self.delay
    }

    fn timeout_error(&self) -> Error {
        Error::new(
            ErrorKind::OperationTimedOut,
            format!(
                "Timeout waiting for {} {} to reach status {}, last status is {}",
                T::KIND,
                self.inner.resource_id(),
                self.target,
                self.inner.status_text()
            ),
        )
    }

    fn poll(&mut self) -> Result<Option<T>> {
        self.inner.refresh()?;
        let current = self.inner.resource_status();
        if current == self.target {
            debug!(
                "{} {} reached status {}",
                T::KIND,
                self.inner.resource_id(),
                current
            );
            Ok(Some(self.inner.clone()))
        } else if current.is_in_progress() {
            trace!(
                "Still waiting for {} {} to get to status {}, current is {}",
                T::KIND,
                self.inner.resource_id(),
                self.target,
                current
            );
            Ok(None)
        } else {
            debug!(
                "{} {} settled in status {} instead of {}",
                T::KIND,
                self.inner.resource_id(),
                current,
                self.target
            );
            Err(Error::new(
                ErrorKind::UnexpectedStatus,
                format!(
                    "{} {} is in status {}, expected {}",
                    T::KIND,
                    self.inner.resource_id(),
                    self.inner.status_text(),
                    self.target
                ),
            ))
        }
    }
}

impl<T> DeletionWaiter<T> {
    /// Create a waiter for the given resource.
    pub fn new(inner: T, wait_timeout: Duration, delay: Duration) -> DeletionWaiter<T> {
        DeletionWaiter {
            inner,
            wait_timeout,
            delay,
        }
    }

    /// Override the delay between polls.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Override the wait timeout.
    pub fn with_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }
}

impl<T> WaiterCurrentState<T> for DeletionWaiter<T> {
    fn waiter_current_state(&self) -> &T {
        &self.inner
    }
}

impl<T: TrackedResource> Waiter<(), Error> for DeletionWaiter<T> {
    fn default_wait_timeout(&self) -> Option<Duration> {
        Some(self.wait_timeout)
    }

    fn default_delay(&self) -> Duration {
        self.delay
    }

    fn timeout_error(&self) -> Error {
        Error::new(
            ErrorKind::OperationTimedOut,
            format!(
                "Timeout waiting for {} {} to be deleted, last status is {}",
                T::KIND,
                self.inner.resource_id(),
                self.inner.status_text()
            ),
        )
    }

    fn poll(&mut self) -> Result<Option<()>> {
        match self.inner.refresh() {
            Ok(..) => {
                let current = self.inner.resource_status();
                if current.is_deleted() {
                    debug!(
                        "{} {} was deleted, status {}",
                        T::KIND,
                        self.inner.resource_id(),
                        current
                    );
                    Ok(Some(()))
                } else if current.is_deletion_failed() {
                    debug!(
                        "Failed to delete {} {} - status is {}",
                        T::KIND,
                        self.inner.resource_id(),
                        current
                    );
                    Err(Error::new(
                        ErrorKind::UnexpectedStatus,
                        format!(
                            "{} {} could not be deleted, status is {}",
                            T::KIND,
                            self.inner.resource_id(),
                            self.inner.status_text()
                        ),
                    ))
                } else {
                    trace!(
                        "Still waiting for {} {} to be deleted, current status is {}",
                        T::KIND,
                        self.inner.resource_id(),
                        current
                    );
                    Ok(None)
                }
            }
            Err(ref e) if e.kind() == ErrorKind::ResourceNotFound => {
                debug!("{} {} was deleted", T::KIND, self.inner.resource_id());
                Ok(Some(()))
            }
            Err(e) => {
                debug!(
                    "Failed to delete {} {} - {}",
                    T::KIND,
                    self.inner.resource_id(),
                    e
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use waiter::{Waiter, WaiterCurrentState};

    use super::super::super::{Error, ErrorKind, Result};
    use super::super::{Refresh, ResourceStatus, TrackedResource};
    use super::{DeletionWaiter, StatusWaiter};

    protocol_enum! {
        #[doc = "Statuses of a fake resource."]
        enum FakeStatus {
            Building = "BUILDING",
            Ready = "READY",
            Broken = "BROKEN",
            Deleting = "DELETING",
            Gone = "GONE",
            DeleteFailed = "DELETE_FAILED"
        }
    }

    impl ResourceStatus for FakeStatus {
        fn is_in_progress(&self) -> bool {
            matches!(self, FakeStatus::Building | FakeStatus::Deleting)
        }

        fn is_deleted(&self) -> bool {
            *self == FakeStatus::Gone
        }

        fn is_deletion_failed(&self) -> bool {
            *self == FakeStatus::DeleteFailed
        }
    }

    /// A resource following a script; `None` means the service returns 404.
    ///
    /// The last entry repeats forever.
    #[derive(Debug, Clone)]
    struct FakeResource {
        script: Rc<Vec<Option<FakeStatus>>>,
        polls: Rc<Cell<usize>>,
        status: FakeStatus,
    }

    impl FakeResource {
        fn new(script: Vec<Option<FakeStatus>>) -> FakeResource {
            FakeResource {
                script: Rc::new(script),
                polls: Rc::new(Cell::new(0)),
                status: FakeStatus::Building,
            }
        }
    }

    impl Refresh for FakeResource {
        fn refresh(&mut self) -> Result<()> {
            let pos = self.polls.get();
            self.polls.set(pos + 1);
            let idx = pos.min(self.script.len() - 1);
            match self.script[idx] {
                Some(status) => {
                    self.status = status;
                    Ok(())
                }
                None => Err(Error::new(ErrorKind::ResourceNotFound, "no such resource")),
            }
        }
    }

    impl TrackedResource for FakeResource {
        type Status = FakeStatus;

        const KIND: &'static str = "fake";

        fn resource_id(&self) -> &str {
            "fake-id"
        }

        fn resource_status(&self) -> FakeStatus {
            self.status
        }
    }

    fn status_waiter(script: Vec<Option<FakeStatus>>) -> StatusWaiter<FakeResource> {
        StatusWaiter::new(
            FakeResource::new(script),
            FakeStatus::Ready,
            Duration::from_millis(200),
            Duration::from_millis(1),
        )
    }

    fn deletion_waiter(script: Vec<Option<FakeStatus>>) -> DeletionWaiter<FakeResource> {
        DeletionWaiter::new(
            FakeResource::new(script),
            Duration::from_millis(200),
            Duration::from_millis(1),
        )
    }

    #[test]
    fn test_status_waiter_success() {
        let waiter = status_waiter(vec![
            Some(FakeStatus::Building),
            Some(FakeStatus::Building),
            Some(FakeStatus::Ready),
        ]);
        let polls = waiter.waiter_current_state().polls.clone();
        let result = waiter.wait().unwrap();
        assert_eq!(result.resource_status(), FakeStatus::Ready);
        assert_eq!(polls.get(), 3);
    }

    #[test]
    fn test_status_waiter_unexpected_status() {
        let waiter = status_waiter(vec![Some(FakeStatus::Building), Some(FakeStatus::Broken)]);
        let err = waiter.wait().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert!(err.to_string().contains("BROKEN"));
    }

    #[test]
    fn test_status_waiter_timeout() {
        let waiter = status_waiter(vec![Some(FakeStatus::Building)])
            .with_timeout(Duration::from_millis(20));
        let err = waiter.wait().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationTimedOut);
        assert!(err.to_string().contains("last status is BUILDING"));
    }

    #[test]
    fn test_status_waiter_error_aborts() {
        let waiter = status_waiter(vec![Some(FakeStatus::Building), None]);
        let polls = waiter.waiter_current_state().polls.clone();
        let err = waiter.wait().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(polls.get(), 2);
    }

    #[test]
    fn test_status_waiter_target_in_progress() {
        let waiter = StatusWaiter::new(
            FakeResource::new(vec![Some(FakeStatus::Building)]),
            FakeStatus::Building,
            Duration::from_millis(200),
            Duration::from_millis(1),
        );
        assert_eq!(waiter.target(), FakeStatus::Building);
        let result = waiter.wait().unwrap();
        assert_eq!(result.resource_status(), FakeStatus::Building);
    }

    #[test]
    fn test_deletion_waiter_not_found() {
        let waiter = deletion_waiter(vec![Some(FakeStatus::Deleting), None]);
        waiter.wait().unwrap();
    }

    #[test]
    fn test_deletion_waiter_deleted_status() {
        let waiter = deletion_waiter(vec![
            Some(FakeStatus::Ready),
            Some(FakeStatus::Deleting),
            Some(FakeStatus::Gone),
        ]);
        let polls = waiter.waiter_current_state().polls.clone();
        waiter.wait().unwrap();
        assert_eq!(polls.get(), 3);
    }

    #[test]
    fn test_deletion_waiter_failed() {
        let waiter = deletion_waiter(vec![
            Some(FakeStatus::Deleting),
            Some(FakeStatus::DeleteFailed),
        ]);
        let err = waiter.wait().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert!(err.to_string().contains("DELETE_FAILED"));
    }

    #[test]
    fn test_deletion_waiter_timeout() {
        let waiter =
            deletion_waiter(vec![Some(FakeStatus::Deleting)]).with_timeout(Duration::from_millis(20));
        let err = waiter.wait().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationTimedOut);
        assert!(err.to_string().contains("DELETING"));
    }
}
