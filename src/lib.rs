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

//! Integration test harness for OpenStack clouds.
//!
//! The crate provides a small blocking client for the services the harness
//! touches and a family of waiters that poll a resource until it reaches
//! an expected status.
//!
//! # Features
//!
//! * [Authentication](auth/index.html) from environment or `clouds.yaml`
//! * [Stack lifecycle helpers](orchestration/index.html)
//! * [Servers and flavors](compute/index.html)
//! * [Images](image/index.html)
//! * [Networks, security groups and floating IPs](network/index.html)
//! * [End-to-end scenarios](scenario/index.html)
//!
//! # Example
//!
//! ```rust,no_run
//! use waiter::Waiter;
//!
//! let os = mos_tests::Cloud::from_env().expect("Unable to authenticate");
//! let template = mos_tests::orchestration::read_template("templates", "empty_heat_template.yaml")
//!     .expect("Cannot read template");
//! let stack = os
//!     .new_stack("mos-empty", template)
//!     .create()
//!     .expect("Cannot request stack creation")
//!     .wait()
//!     .expect("Stack was not created");
//! println!("Stack {} is {}", stack.id(), stack.status());
//! ```

#![warn(missing_docs)]
#![deny(
    missing_debug_implementations,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    while_true
)]
#![allow(unused_results)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod utils;

pub mod auth;
mod cloud;
pub mod common;
pub mod compute;
mod error;
mod identity;
pub mod image;
pub mod network;
pub mod orchestration;
pub mod scenario;
mod service;
pub mod session;

pub use crate::cloud::Cloud;
pub use crate::common::{DeletionWaiter, Refresh, ResourceStatus, StatusWaiter, TrackedResource};
pub use crate::error::{Error, ErrorKind, Result};
