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

//! Types and traits shared between services.

use std::fmt::{Debug, Display};

use super::super::Result;

/// Trait representing something that can be refreshed.
pub trait Refresh {
    /// Refresh the resource representation.
    fn refresh(&mut self) -> Result<()>;
}

/// Classification of a status reported by a service.
pub trait ResourceStatus: Copy + Debug + Display + PartialEq {
    /// Whether the resource is still transitioning.
    ///
    /// Waiters keep polling while this is true.
    fn is_in_progress(&self) -> bool;

    /// Whether the status means the resource is gone.
    fn is_deleted(&self) -> bool {
        false
    }

    /// Whether the status means a deletion attempt has failed.
    fn is_deletion_failed(&self) -> bool {
        false
    }
}

/// A remote resource with a status that can be polled.
pub trait TrackedResource: Refresh + Debug {
    /// Status type of the resource.
    type Status: ResourceStatus;

    /// Human-readable resource kind used in messages.
    const KIND: &'static str;

    /// Unique ID of the resource.
    fn resource_id(&self) -> &str;

    /// Status as of the last refresh.
    fn resource_status(&self) -> Self::Status;

    /// Status as of the last refresh, as it appears in messages.
    fn status_text(&self) -> String {
        self.resource_status().to_string()
    }
}
