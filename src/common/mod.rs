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

//! Types and traits shared by all API parts.
//!
//! The central piece is the resource lifecycle poller: a resource that can
//! [refresh](trait.Refresh.html) itself and report a classified
//! [status](trait.ResourceStatus.html) can be handed to a
//! [StatusWaiter](struct.StatusWaiter.html) or a
//! [DeletionWaiter](struct.DeletionWaiter.html).

pub(crate) mod protocol;
mod types;
mod waiter;

pub use self::types::{Refresh, ResourceStatus, TrackedResource};
pub use self::waiter::{DeletionWaiter, StatusWaiter, DEFAULT_DELAY};
