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

use std::sync::Once;

static INIT: Once = Once::new();

fn set_up() -> mos_tests::Cloud {
    INIT.call_once(|| {
        env_logger::init();
    });

    mos_tests::Cloud::from_env().expect("Failed to create an identity provider from the environment")
}

#[test]
#[ignore]
fn test_list_flavors() {
    let os = set_up();
    let items = os.find_flavors().all().expect("Cannot list flavors");
    assert!(!items.is_empty());
}

#[test]
#[ignore]
fn test_list_images() {
    let os = set_up();
    let _ = os.find_images().all().expect("Cannot list images");
}

#[test]
#[ignore]
fn test_list_networks() {
    let os = set_up();
    let items = os.find_networks().all().expect("Cannot list networks");
    assert!(!items.is_empty());
    let _ = os
        .find_networks()
        .with_external(true)
        .all()
        .expect("Cannot list external networks");
}

#[test]
#[ignore]
fn test_list_stacks() {
    let os = set_up();
    let _ = os.find_stacks().all().expect("Cannot list stacks");
}
