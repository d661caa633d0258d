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

//! Orchestration API (Heat) support.
//!
//! Stacks are created from templates read with [read_template] and tracked
//! with the waiters from [common](../common/index.html):
//!
//! ```rust,no_run
//! use waiter::Waiter;
//!
//! let os = mos_tests::Cloud::from_env().expect("Unable to authenticate");
//! os.clean_stack("mos-empty").expect("Cannot remove an old stack");
//! let template = mos_tests::orchestration::read_template("templates", "empty_heat_template.yaml")
//!     .expect("Cannot read template");
//! let stack = os
//!     .new_stack("mos-empty", template)
//!     .create_and_wait()
//!     .expect("Stack was not created");
//! stack.delete().expect("Cannot delete").wait().expect("Stack was not deleted");
//! ```

mod api;
mod protocol;
mod stacks;
mod templates;

pub use self::protocol::{StackAction, StackState, StackStatus};
pub use self::stacks::{
    NewStack, Stack, StackCreationWaiter, StackQuery, STACK_STATUS_TIMEOUT_MINUTES, STACK_TIMEOUT,
};
pub use self::templates::read_template;

#[cfg(test)]
pub(crate) use self::stacks::test::{scripted_stack, stack_json};
