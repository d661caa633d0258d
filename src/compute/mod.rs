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

//! Compute API support.
//!
//! Currently supported functionality:
//!
//! * server creation, security groups and deletion
//! * flavor listing, creation and deletion
//!
//! # Examples
//!
//! ```rust,no_run
//! use waiter::Waiter;
//!
//! let os = mos_tests::Cloud::from_env().expect("Unable to authenticate");
//! let server = os
//!     .new_server("my-server", "3", "a1b2c3d4-image")
//!     .with_network("e5f6a7b8-network")
//!     .create()
//!     .expect("Unable to request server creation")
//!     .wait()
//!     .expect("Server did not become active");
//! println!("Server {} has addresses {:?}", server.id(), server.addresses());
//! ```

mod api;
mod flavors;
mod protocol;
mod servers;

pub use self::flavors::{Flavor, FlavorQuery, NewFlavor};
pub use self::protocol::{AddressType, ServerAddress, ServerStatus};
pub use self::servers::{
    NewServer, Server, ServerCreationWaiter, SERVER_BOOT_DELAY, SERVER_BOOT_TIMEOUT,
};
